//! # Part of Fortune
//!
//! Derived chart point combining the Ascendant with the Sun and Moon ecliptic
//! longitudes. The formula depends on whether the Sun is above the horizon at the
//! birth place:
//!
//! ```text
//! day chart   (alt > 0):  λ = Asc + Moon − Sun
//! night chart (alt ≤ 0):  λ = Asc + Sun − Moon
//! ```
//!
//! The point is placed on the ecliptic (β = 0) and converted to RA/Dec with the
//! mean obliquity of date, so it can feed either line solver like a tabulated body.

use crate::angles::normalize_deg360;
use crate::astrocartography::GeoPoint;
use crate::bodies::Body;
use crate::constants::{Degree, JulianDay, RADEG};
use crate::ephemeris::{EphemerisSource, Position, PositionProvider};
use crate::ref_system::ascendant_ecliptic_longitude;
use crate::time::greenwich_sidereal_time;

/// Result of a Part of Fortune computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartOfFortune {
    /// Ecliptic longitude of the point, `[0, 360)`.
    pub longitude: Degree,
    /// `true` when the Sun was above the horizon.
    pub day_chart: bool,
    /// Ecliptic longitude of the Ascendant used.
    pub ascendant: Degree,
    pub position: Position,
}

/// Altitude of a body above the horizon of `place` at `jd`, in degrees.
///
/// `sin(alt) = sin φ · sin δ + cos φ · cos δ · cos H`, with `H = LST − α`.
pub fn altitude(pos: &Position, jd: JulianDay, place: GeoPoint) -> Degree {
    let lst = greenwich_sidereal_time(jd, place.lon);
    let h = (lst - pos.ra) * RADEG;
    let phi = place.lat * RADEG;
    let dec = pos.dec * RADEG;

    let sin_alt = phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos();
    sin_alt.clamp(-1.0, 1.0).asin() / RADEG
}

/// Ecliptic longitude of the Part of Fortune from its three ingredients.
pub fn fortune_longitude(ascendant: Degree, sun: Degree, moon: Degree, day_chart: bool) -> Degree {
    if day_chart {
        normalize_deg360(ascendant + moon - sun)
    } else {
        normalize_deg360(ascendant + sun - moon)
    }
}

/// Compute the Part of Fortune for a birth instant and place.
///
/// Sun and Moon are taken from `provider`, so an external ephemeris also drives
/// this point.
pub fn part_of_fortune<S: EphemerisSource>(
    provider: &PositionProvider<S>,
    jd: JulianDay,
    place: GeoPoint,
) -> PartOfFortune {
    let sun = provider.tabulated(Body::Sun, jd);
    let moon = provider.tabulated(Body::Moon, jd);
    let (sun_lon, _) = sun.ecliptic_or_derived(jd);
    let (moon_lon, _) = moon.ecliptic_or_derived(jd);

    let ascendant = ascendant_ecliptic_longitude(place.lat, place.lon, jd);
    let day_chart = altitude(&sun, jd, place) > 0.0;
    let longitude = fortune_longitude(ascendant, sun_lon, moon_lon, day_chart);

    PartOfFortune {
        longitude,
        day_chart,
        ascendant,
        position: Position::from_ecliptic(longitude, 0.0, jd),
    }
}

#[cfg(test)]
mod part_of_fortune_test {
    use super::*;
    use crate::constants::J2000_JD;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fortune_longitude_branches() {
        assert_abs_diff_eq!(fortune_longitude(100.0, 30.0, 50.0, true), 120.0);
        assert_abs_diff_eq!(fortune_longitude(100.0, 30.0, 50.0, false), 80.0);
        assert_abs_diff_eq!(fortune_longitude(10.0, 350.0, 0.0, true), 20.0);
    }

    #[test]
    fn test_altitude_at_transit() {
        // a body on the local meridian culminates at 90 − |φ − δ|
        let jd = J2000_JD;
        let lst = greenwich_sidereal_time(jd, 0.0);
        let pos = Position::equatorial(lst, 10.0);
        let alt = altitude(&pos, jd, GeoPoint::new(40.0, 0.0));
        assert_abs_diff_eq!(alt, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_night_chart_branch() {
        // J2000.0 is noon UT: local midnight on the antimeridian
        let provider = PositionProvider::default();
        let place = GeoPoint::new(0.0, 180.0);
        let jd = J2000_JD;

        let pof = part_of_fortune(&provider, jd, place);
        assert!(!pof.day_chart);

        let (sun, _) = provider.tabulated(Body::Sun, jd).ecliptic_or_derived(jd);
        let (moon, _) = provider.tabulated(Body::Moon, jd).ecliptic_or_derived(jd);
        assert_abs_diff_eq!(
            pof.longitude,
            normalize_deg360(pof.ascendant + sun - moon),
            epsilon = 1e-9
        );
        assert_eq!(pof.position.ecl_lat, Some(0.0));
    }

    #[test]
    fn test_day_chart_branch() {
        let provider = PositionProvider::default();
        let pof = part_of_fortune(&provider, J2000_JD, GeoPoint::new(0.0, 0.0));
        assert!(pof.day_chart);
    }
}
