//! # Chart bodies
//!
//! Closed enumeration of the points for which lines can be drawn, with the
//! capability flag selecting how their position is obtained:
//!
//! | Capability | Bodies | Source |
//! |---|---|---|
//! | [`BodyCapability::VectorEphemeris`] | Sun, Moon, Mercury … Pluto | an [`EphemerisSource`](crate::ephemeris::EphemerisSource) geocentric vector |
//! | [`BodyCapability::MeanLongitude`] | North Node, Chiron, Lilith | linear mean-longitude model |
//! | [`BodyCapability::Derived`] | Part of Fortune | [`part_of_fortune`](crate::part_of_fortune) |
//!
//! Each body also carries the display metadata handed to the rendering surface
//! (name, glyph and default line color).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::acg_errors::AcgError;

/// How the position of a [`Body`] is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyCapability {
    VectorEphemeris,
    MeanLongitude,
    Derived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    Chiron,
    Lilith,
    PartOfFortune,
}

impl Body {
    /// Every body, in the order lines are drawn.
    pub const ALL: [Body; 14] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::NorthNode,
        Body::Chiron,
        Body::Lilith,
        Body::PartOfFortune,
    ];

    pub fn capability(&self) -> BodyCapability {
        match self {
            Body::NorthNode | Body::Chiron | Body::Lilith => BodyCapability::MeanLongitude,
            Body::PartOfFortune => BodyCapability::Derived,
            _ => BodyCapability::VectorEphemeris,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::NorthNode => "North Node",
            Body::Chiron => "Chiron",
            Body::Lilith => "Lilith",
            Body::PartOfFortune => "Part of Fortune",
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Body::Sun => '☉',
            Body::Moon => '☽',
            Body::Mercury => '☿',
            Body::Venus => '♀',
            Body::Mars => '♂',
            Body::Jupiter => '♃',
            Body::Saturn => '♄',
            Body::Uranus => '♅',
            Body::Neptune => '♆',
            Body::Pluto => '♇',
            Body::NorthNode => '☊',
            Body::Chiron => '⚷',
            Body::Lilith => '⚸',
            Body::PartOfFortune => '⊕',
        }
    }

    /// Default line color as a CSS hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Body::Sun => "#FFD700",
            Body::Moon => "#C0C0C0",
            Body::Mercury => "#87CEEB",
            Body::Venus => "#FF69B4",
            Body::Mars => "#FF4500",
            Body::Jupiter => "#FFA500",
            Body::Saturn => "#8B4513",
            Body::Uranus => "#40E0D0",
            Body::Neptune => "#4169E1",
            Body::Pluto => "#8A2BE2",
            Body::NorthNode => "#FFE4B5",
            Body::Chiron => "#CD853F",
            Body::Lilith => "#8B008B",
            Body::PartOfFortune => "#32CD32",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Body {
    type Err = AcgError;

    /// Parse a display name, case-insensitively ("north node", "Part of Fortune", …).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Body::ALL
            .iter()
            .copied()
            .find(|b| b.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AcgError::UnknownBody(s.to_string()))
    }
}
