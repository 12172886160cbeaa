//! # Zodiac signs
//!
//! Tropical signs of the zodiac, from an ecliptic longitude or from a calendar
//! date, and the sun / moon / rising summary of a birth chart computed from real
//! positions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::angles::normalize_deg360;
use crate::astrocartography::BirthData;
use crate::bodies::Body;
use crate::constants::Degree;
use crate::ephemeris::{EphemerisSource, PositionProvider};
use crate::ref_system::ascendant_ecliptic_longitude;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// First day `(month, day)` of each sign in the civil calendar, in sign order.
const CALENDAR_STARTS: [(u8, u8); 12] = [
    (3, 21),
    (4, 20),
    (5, 21),
    (6, 22),
    (7, 23),
    (8, 23),
    (9, 23),
    (10, 24),
    (11, 22),
    (12, 22),
    (1, 20),
    (2, 19),
];

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign containing an ecliptic longitude: 30° per sign from 0° Aries.
    pub fn from_ecliptic_longitude(lon: Degree) -> Self {
        let index = (normalize_deg360(lon) / 30.0).floor() as usize;
        Self::ALL[index.min(11)]
    }

    /// Sun sign of a calendar date, using the usual tropical date table.
    ///
    /// Return
    /// ------
    /// * `None` for a month outside 1–12 or a day that does not exist in that month
    ///   (29 February is accepted).
    pub fn from_calendar(month: u8, day: u8) -> Option<Self> {
        const DAYS_IN_MONTH: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        if !(1..=12).contains(&month) || day == 0 || day > DAYS_IN_MONTH[month as usize - 1] {
            return None;
        }

        let date = (month, day);
        // latest sign start not after the date; early January falls back to Capricorn
        Self::ALL
            .iter()
            .zip(CALENDAR_STARTS)
            .filter(|(_, start)| *start <= date)
            .max_by_key(|(_, start)| *start)
            .map(|(sign, _)| *sign)
            .or(Some(ZodiacSign::Capricorn))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            ZodiacSign::Aries => '♈',
            ZodiacSign::Taurus => '♉',
            ZodiacSign::Gemini => '♊',
            ZodiacSign::Cancer => '♋',
            ZodiacSign::Leo => '♌',
            ZodiacSign::Virgo => '♍',
            ZodiacSign::Libra => '♎',
            ZodiacSign::Scorpio => '♏',
            ZodiacSign::Sagittarius => '♐',
            ZodiacSign::Capricorn => '♑',
            ZodiacSign::Aquarius => '♒',
            ZodiacSign::Pisces => '♓',
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.glyph(), self.name())
    }
}

/// Sun, Moon and rising signs of a birth chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartSummary {
    pub sun: ZodiacSign,
    pub moon: ZodiacSign,
    pub rising: ZodiacSign,
    pub sun_longitude: Degree,
    pub moon_longitude: Degree,
    pub ascendant: Degree,
}

impl ChartSummary {
    /// Signs from the ecliptic longitudes of the Sun, the Moon and the Ascendant at birth.
    pub fn compute<S: EphemerisSource>(provider: &PositionProvider<S>, birth: &BirthData) -> Self {
        let jd = birth.jd;
        let (sun_longitude, _) = provider
            .position_at(Body::Sun, jd, birth.place)
            .ecliptic_or_derived(jd);
        let (moon_longitude, _) = provider
            .position_at(Body::Moon, jd, birth.place)
            .ecliptic_or_derived(jd);
        let ascendant = ascendant_ecliptic_longitude(birth.place.lat, birth.place.lon, jd);

        ChartSummary {
            sun: ZodiacSign::from_ecliptic_longitude(sun_longitude),
            moon: ZodiacSign::from_ecliptic_longitude(moon_longitude),
            rising: ZodiacSign::from_ecliptic_longitude(ascendant),
            sun_longitude,
            moon_longitude,
            ascendant,
        }
    }
}
