use hifitime::{Epoch, TimeScale, Unit};

use crate::acg_errors::AcgError;
use crate::angles::normalize_deg360;
use crate::constants::{Degree, JulianDay, DAYS_PER_CENTURY, J2000_JD};

/// Julian Day of a UTC calendar instant (proleptic Gregorian calendar).
///
/// This is the Fliegel–Van Flandern integer day number, shifted so that the day
/// starts at noon, plus the fractional day from the time fields.
///
/// Arguments
/// ---------
/// * `year`, `month` (1–12), `day`: calendar date, already expressed in UTC.
/// * `hour`, `minute`, `second`: time of day in UTC.
///
/// Return
/// ------
/// * the Julian Day as a float.
///
/// Remarks
/// -------
/// * No validation is performed here: invalid fields yield a meaningless value.
///   Use [`BirthMoment::new`] to validate user input before calling the solvers.
pub fn julian_day(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: f64,
) -> JulianDay {
    let month = month as i64;
    let a = (14 - month).div_euclid(12);
    let y = year as i64 + 4800 - a;
    let m = month + 12 * a - 3;

    let jdn = day as i64 + (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4)
        - y.div_euclid(100)
        + y.div_euclid(400)
        - 32045;

    jdn as f64 + (hour as f64 - 12.0) / 24.0 + minute as f64 / 1440.0 + second / 86400.0
}

/// Julian centuries elapsed since J2000.0.
#[inline]
pub fn centuries_since_j2000(jd: JulianDay) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Compute the Greenwich Mean Sidereal Time plus an observer longitude, in degrees.
///
/// Uses the IAU 1982 expression of the mean sidereal time as a polynomial of the
/// Julian Day (Meeus, *Astronomical Algorithms*, eq. 12.4):
///
/// ```text
/// θ₀ = 280.46061837 + 360.98564736629·(JD − 2451545) + 0.000387933·T² − T³/38710000
/// ```
///
/// The result is reduced to one revolution and the observer longitude (east
/// positive) is added to yield the local sidereal time `LST = GMST + λ`.
///
/// # Arguments
/// * `jd` - Julian Day (UT)
/// * `longitude` - observer longitude in degrees, `0.0` for Greenwich
///
/// # Returns
/// * sidereal time in degrees, normalized to `[0, 360)`.
pub fn greenwich_sidereal_time(jd: JulianDay, longitude: Degree) -> Degree {
    let t = centuries_since_j2000(jd);
    let theta0 = 280.46061837 + 360.98564736629 * (jd - J2000_JD) + 0.000387933 * t * t
        - t * t * t / 38_710_000.0;

    normalize_deg360(normalize_deg360(theta0) + longitude)
}

/// A validated birth instant, converted to UTC.
///
/// The calendar fields are checked with [`hifitime`] (days per month, leap years)
/// and the local civil time is shifted by the UTC offset before the Julian Day is
/// derived. The Julian Day is computed once and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthMoment {
    jd: JulianDay,
}

impl BirthMoment {
    /// Build a birth instant from local civil time and a UTC offset in hours
    /// (e.g. `+3.0` for UTC+3).
    ///
    /// Return
    /// ------
    /// * `Err(AcgError::InvalidBirthData)` if a time field or the offset is out of range,
    /// * `Err(AcgError::Hifitime)` if the calendar date does not exist.
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        utc_offset_hours: f64,
    ) -> Result<Self, AcgError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(AcgError::InvalidBirthData(format!(
                "time of day out of range: {hour:02}:{minute:02}:{second:02}"
            )));
        }
        if !utc_offset_hours.is_finite() || utc_offset_hours.abs() > 14.0 {
            return Err(AcgError::InvalidBirthData(format!(
                "UTC offset out of range: {utc_offset_hours}"
            )));
        }

        let local =
            Epoch::maybe_from_gregorian(year, month, day, hour, minute, second, 0, TimeScale::UTC)?;
        let epoch_utc = local - Unit::Hour * utc_offset_hours;

        Ok(Self::from_epoch(epoch_utc))
    }

    /// Wrap an existing epoch; its UTC calendar representation defines the Julian Day.
    pub fn from_epoch(epoch: Epoch) -> Self {
        let (y, mo, d, h, mi, s, ns) = epoch.to_gregorian_utc();
        let jd = julian_day(y, mo, d, h, mi, s as f64 + ns as f64 * 1e-9);
        BirthMoment { jd }
    }

    /// Julian Day (UTC) of the birth instant.
    pub fn julian_day(&self) -> JulianDay {
        self.jd
    }
}
