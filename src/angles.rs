//! # Angle normalization and longitude continuity
//!
//! Small helpers shared by every solver. All angles are in **degrees**.
//!
//! - [`normalize_deg360`] maps any angle to `[0, 360)`.
//! - [`normalize_deg180`] maps any angle to `(-180, 180]`. It is defined *through*
//!   [`normalize_deg360`] (normalize first, then shift values above 180 down by 360);
//!   the root finder relies on this exact definition for the sign of the residual
//!   close to the ±180° boundary.
//! - [`angular_diff_deg`] is the signed difference `a - b` wrapped to `(-180, 180]`.
//! - [`unwrap_longitude`] shifts a longitude by whole turns so that consecutive line
//!   vertices never jump by more than half a turn.

use crate::constants::Degree;

/// Normalize an angle to the interval `[0, 360)`.
///
/// Arguments
/// ---------
/// * `deg`: any finite angle in degrees.
///
/// Return
/// ------
/// * the equivalent angle in `[0, 360)`.
#[inline]
pub fn normalize_deg360(deg: Degree) -> Degree {
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-20 % 360 + 360 rounds to exactly 360
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Normalize an angle to the interval `(-180, 180]`.
///
/// The value is first reduced with [`normalize_deg360`], then shifted down by one
/// turn when it lies strictly above 180. Consequently `normalize_deg180(180.0) == 180.0`
/// and `normalize_deg180(-180.0) == 180.0`.
#[inline]
pub fn normalize_deg180(deg: Degree) -> Degree {
    let d = normalize_deg360(deg);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Signed angular difference `a - b`, wrapped to `(-180, 180]`.
#[inline]
pub fn angular_diff_deg(a: Degree, b: Degree) -> Degree {
    normalize_deg180(a - b)
}

/// Shift `lon` by whole turns so that `lon - prev_lon` lies in `[-180, 180]`.
///
/// Without a previous longitude, or when it is already within half a turn, the
/// value is returned unchanged. Otherwise the result is `prev_lon` plus the wrapped
/// difference, congruent to `lon` modulo 360 up to rounding.
///
/// Arguments
/// ---------
/// * `lon`: longitude to unwrap (degrees).
/// * `prev_lon`: longitude of the previous accepted vertex, if any.
///
/// Return
/// ------
/// * the unwrapped longitude.
pub fn unwrap_longitude(lon: Degree, prev_lon: Option<Degree>) -> Degree {
    let Some(prev) = prev_lon else {
        return lon;
    };
    let d = lon - prev;
    if (-180.0..=180.0).contains(&d) {
        lon
    } else {
        prev + normalize_deg180(d)
    }
}

#[cfg(test)]
mod angles_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_deg360() {
        assert_eq!(normalize_deg360(0.0), 0.0);
        assert_eq!(normalize_deg360(360.0), 0.0);
        assert_eq!(normalize_deg360(-90.0), 270.0);
        assert_eq!(normalize_deg360(725.0), 5.0);
        assert_eq!(normalize_deg360(-1e-20), 0.0);
    }

    #[test]
    fn test_normalize_deg180_boundaries() {
        assert_eq!(normalize_deg180(180.0), 180.0);
        assert_eq!(normalize_deg180(-180.0), 180.0);
        assert_eq!(normalize_deg180(181.0), -179.0);
        assert_eq!(normalize_deg180(-181.0), 179.0);
        assert_eq!(normalize_deg180(540.0), 180.0);
    }

    #[test]
    fn test_angular_diff() {
        assert_abs_diff_eq!(angular_diff_deg(10.0, 350.0), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(angular_diff_deg(350.0, 10.0), -20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unwrap_longitude() {
        assert_eq!(unwrap_longitude(-179.0, None), -179.0);
        assert_eq!(unwrap_longitude(-179.0, Some(179.0)), 181.0);
        assert_eq!(unwrap_longitude(179.0, Some(-179.0)), -181.0);
        assert_eq!(unwrap_longitude(10.0, Some(725.0)), 730.0);
        // half a turn on either side is kept as is
        assert_eq!(unwrap_longitude(-180.0, Some(0.0)), -180.0);
        assert_eq!(unwrap_longitude(180.0, Some(0.0)), 180.0);
    }

    #[test]
    fn test_unwrap_longitude_far_from_previous() {
        let v = unwrap_longitude(10.0, Some(1e17));
        assert!(v.is_finite());
        assert!((v - 1e17).abs() <= 180.0);

        let v = unwrap_longitude(-1e12 + 20.0, Some(5.0));
        assert!((v - 5.0).abs() <= 180.0);
        assert!(angular_diff_deg(v, -1e12 + 20.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_normalize360_range_and_idempotence(x in -1e6..1e6f64) {
            let n = normalize_deg360(x);
            prop_assert!((0.0..360.0).contains(&n));
            prop_assert_eq!(normalize_deg360(n), n);
        }

        #[test]
        fn prop_normalize180_range_and_period(x in -1e5..1e5f64) {
            let n = normalize_deg180(x);
            prop_assert!(n > -180.0 && n <= 180.0);
            let shifted = normalize_deg180(x + 360.0);
            // equality up to the rounding of x + 360
            let d = (shifted - n).abs();
            prop_assert!(d < 1e-9 || (d - 360.0).abs() < 1e-9);
        }

        #[test]
        fn prop_unwrap_congruent_and_close(lon in -1e4..1e4f64, prev in -1e4..1e4f64) {
            let v = unwrap_longitude(lon, Some(prev));
            prop_assert!((v - prev).abs() <= 180.0 + 1e-9);
            let turns = (v - lon) / 360.0;
            prop_assert!((turns - turns.round()).abs() < 1e-9);
        }
    }
}
