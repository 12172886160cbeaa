//! # Zodio lines (scan and bisection)
//!
//! Lines where the *zodiacal* Ascendant or Midheaven of a relocated chart equals
//! the body's ecliptic longitude (AC, MC) or its antipode (DC, IC).
//!
//! The relocated angle mixes sidereal time, latitude and obliquity non-linearly,
//! so the geographic longitude is found numerically:
//!
//! 1. the residual `f(λ) = angle(GMST + λ) − target`, wrapped to `(−180, 180]`,
//!    is sampled from −180° to 180° every `scan_step`;
//! 2. a sample with `|f|` below `direct_hit_tolerance` is a root as is;
//! 3. a sign change between two samples brackets a root, refined by bisection;
//! 4. among all roots, the one closest (after unwrapping) to a preferred
//!    longitude wins. For AC/DC sweeps the preference is the longitude found at
//!    the previous latitude, which keeps the curve continuous.
//!
//! The residual also changes sign where it wraps from +180° to −180°, and where
//! the Ascendant switches branch close to the polar circles. Such jumps are not
//! crossings of the target: a wrap never opens a bracket, and a refined bracket
//! whose residual is still larger than the scan step is dropped.

use log::trace;
use smallvec::SmallVec;

use crate::angles::{angular_diff_deg, normalize_deg180, unwrap_longitude};
use crate::astrocartography::{AngleKind, GeoPoint};
use crate::constants::{Degree, JulianDay};
use crate::ephemeris::Position;
use crate::line_params::LineParams;
use crate::ref_system::{ascendant_from_lst, mean_obliquity, midheaven_from_lst};
use crate::time::greenwich_sidereal_time;

/// Roots found by one longitude scan, rarely more than a handful.
pub type LongitudeRoots = SmallVec<[Degree; 4]>;

#[inline]
fn opposite_signs(a: f64, b: f64) -> bool {
    (a <= 0.0 && b >= 0.0) || (a >= 0.0 && b <= 0.0)
}

/// Bisection on `[a, b]` where `f(a)` is `fa`, assumed of opposite sign to `f(b)`.
///
/// Stops early when `|f(mid)| < tolerance`; otherwise returns the midpoint of the
/// final bracket after `max_iter` halvings.
fn bisect<F: Fn(Degree) -> Degree>(
    f: &F,
    mut a: Degree,
    mut b: Degree,
    mut fa: Degree,
    tolerance: Degree,
    max_iter: usize,
) -> Degree {
    for _ in 0..max_iter {
        let m = 0.5 * (a + b);
        let fm = f(m);
        if fm.abs() < tolerance {
            return m;
        }
        if opposite_signs(fa, fm) {
            b = m;
        } else {
            a = m;
            fa = fm;
        }
    }
    0.5 * (a + b)
}

/// Scan `[-180, 180]` for the zeros of a wrapped angular residual.
///
/// Arguments
/// ---------
/// * `f`: residual in degrees, expected in `(−180, 180]`.
/// * `params`: `scan_step`, `direct_hit_tolerance`, `bisection_tolerance`, `bisection_max_iter`.
///
/// Return
/// ------
/// * every root found, in scan order (possibly empty). A `scan_step` that is
///   not a finite positive number yields no root.
pub fn find_longitude_roots<F: Fn(Degree) -> Degree>(f: F, params: &LineParams) -> LongitudeRoots {
    let step = params.scan_step;
    let mut roots = LongitudeRoots::new();
    if !(step.is_finite() && step > 0.0) {
        return roots;
    }
    let n_steps = (360.0 / step + 1e-9).floor() as usize;

    let mut f0 = f(-180.0);

    for i in 1..=n_steps {
        let lon = -180.0 + i as f64 * step;
        let f1 = f(lon);

        if f1.abs() < params.direct_hit_tolerance {
            roots.push(lon);
        } else if opposite_signs(f0, f1) && (f1 - f0).abs() < 180.0 {
            let root = bisect(
                &f,
                lon - step,
                lon,
                f0,
                params.bisection_tolerance,
                params.bisection_max_iter,
            );
            // a jump of the residual (wrap or branch flip) also brackets a sign change
            if f(root).abs() < step {
                trace!("bracket [{}, {lon}] -> {root}", lon - step);
                roots.push(root);
            } else {
                trace!("bracket [{}, {lon}] is a discontinuity", lon - step);
            }
        }
        f0 = f1;
    }
    roots
}

/// Pick the root whose unwrapped value is closest to `prefer`.
pub fn select_root(roots: &[Degree], prefer: Degree) -> Option<Degree> {
    roots.iter().copied().min_by(|a, b| {
        let da = (unwrap_longitude(*a, Some(prefer)) - prefer).abs();
        let db = (unwrap_longitude(*b, Some(prefer)) - prefer).abs();
        da.total_cmp(&db)
    })
}

/// Longitude where `angle_fn(GMST + λ)` equals `target`, closest to `prefer`.
pub fn solve_longitude_for_target<A: Fn(Degree) -> Degree>(
    angle_fn: A,
    gmst: Degree,
    target: Degree,
    prefer: Degree,
    params: &LineParams,
) -> Option<Degree> {
    let residual = |lon: Degree| angular_diff_deg(angle_fn(gmst + lon), target);
    select_root(&find_longitude_roots(residual, params), prefer)
}

/// Ecliptic longitude the relocated angle must reach for `angle`.
fn target_longitude(ecl_lon: Degree, angle: AngleKind) -> Degree {
    match angle {
        AngleKind::AC | AngleKind::MC => ecl_lon,
        AngleKind::DC | AngleKind::IC => ecl_lon + 180.0,
    }
}

/// Compute a Zodio line for a body position.
///
/// Arguments
/// ---------
/// * `pos`: position of the body; its ecliptic longitude is derived if absent.
/// * `jd`: Julian Day (UT) of the chart.
/// * `angle`: which chart angle the line follows.
/// * `params`: grids, scan and bisection settings, minimum point count.
///
/// Return
/// ------
/// * `Some(points)` ordered by increasing latitude, longitudes unwrapped,
/// * `None` when fewer than `params.min_points` latitudes have a root.
///
/// Remarks
/// -------
/// * MC/IC do not depend on latitude: one solve, broadcast over the MC grid.
/// * AC/DC solve once per latitude, preferring the previous solution (0° at start).
pub fn zodio_line(
    pos: &Position,
    jd: JulianDay,
    angle: AngleKind,
    params: &LineParams,
) -> Option<Vec<GeoPoint>> {
    let gmst = greenwich_sidereal_time(jd, 0.0);
    let eps = mean_obliquity(jd);
    let (ecl_lon, _) = pos.ecliptic_or_derived(jd);
    let target = target_longitude(ecl_lon, angle);

    let points: Vec<GeoPoint> = match angle {
        AngleKind::MC | AngleKind::IC => {
            let root = solve_longitude_for_target(
                |lst| midheaven_from_lst(lst, eps),
                gmst,
                target,
                0.0,
                params,
            )?;
            let lon = normalize_deg180(root);
            params
                .mc_latitudes()
                .map(|lat| GeoPoint::new(lat, lon))
                .collect()
        }
        AngleKind::AC | AngleKind::DC => {
            let mut prev_lon: Option<Degree> = None;
            let mut points = Vec::new();
            for lat in params.zodio_latitudes() {
                let prefer = prev_lon.unwrap_or(0.0);
                let Some(root) = solve_longitude_for_target(
                    |lst| ascendant_from_lst(lat, lst, eps),
                    gmst,
                    target,
                    prefer,
                    params,
                ) else {
                    trace!("zodio {angle}: no root at lat {lat}");
                    continue;
                };
                let lon = unwrap_longitude(normalize_deg180(root), prev_lon);
                prev_lon = Some(lon);
                points.push(GeoPoint::new(lat, lon));
            }
            points
        }
    };

    (points.len() >= params.min_points).then_some(points)
}

#[cfg(test)]
mod zodio_test {
    use super::*;
    use crate::constants::J2000_JD;
    use crate::ref_system::ascendant_ecliptic_longitude;
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;

    #[test]
    fn test_roots_of_linear_residual() {
        let params = LineParams::default();
        // f(λ) = λ − 37.3 has a single root, away from the scan nodes
        let roots = find_longitude_roots(|lon| angular_diff_deg(lon, 37.3), &params);
        assert_eq!(roots.len(), 1);
        assert_abs_diff_eq!(roots[0], 37.3, epsilon = 0.01);
    }

    #[test]
    fn test_direct_hit_on_scan_node() {
        let params = LineParams::default();
        let roots = find_longitude_roots(|lon| angular_diff_deg(lon, 40.1), &params);
        assert!(roots.iter().any(|r| *r == 40.0));
    }

    #[test]
    fn test_wrap_jump_is_not_a_root() {
        let params = LineParams::default();
        // the residual wraps at λ = −142.7, the true root is at 37.3
        let roots = find_longitude_roots(|lon| angular_diff_deg(lon, 37.3), &params);
        assert!(roots.iter().all(|r| (r - 37.3).abs() < 0.01));
    }

    #[test]
    fn test_two_roots_and_preference() {
        let params = LineParams::default();
        // f(λ) = sin(2λ) crosses zero at −180, −90, 0, 90, 180
        let roots = find_longitude_roots(|lon| 10.0 * (2.0 * lon.to_radians()).sin(), &params);
        assert!(roots.len() >= 4);
        assert_abs_diff_eq!(select_root(&roots, 80.0).unwrap(), 90.0, epsilon = 0.01);
        assert_abs_diff_eq!(select_root(&roots, -10.0).unwrap(), 0.0, epsilon = 0.01);
        // preference is compared after unwrapping
        let r = select_root(&roots, 265.0).unwrap();
        assert_abs_diff_eq!(unwrap_longitude(r, Some(265.0)), 270.0, epsilon = 0.01);
        assert_eq!(select_root(&[], 0.0), None);
    }

    #[test]
    fn test_bisection_respects_iteration_cap() {
        let params = LineParams::builder()
            .bisection_max_iter(1)
            .bisection_tolerance(1e-9)
            .direct_hit_tolerance(1e-9)
            .build()
            .unwrap();
        let roots = find_longitude_roots(|lon| angular_diff_deg(lon, 37.3), &params);
        // one halving of [36, 38]: midpoint of [37, 38]
        assert_eq!(roots.as_slice(), &[37.5]);
    }

    #[test]
    fn test_midheaven_line_matches_target() {
        let jd = J2000_JD + 1234.5;
        let gmst = greenwich_sidereal_time(jd, 0.0);
        let eps = mean_obliquity(jd);
        let pos = Position::from_ecliptic(75.0, 0.0, jd);
        let params = LineParams::default();

        let mc = zodio_line(&pos, jd, AngleKind::MC, &params).unwrap();
        assert_eq!(mc.len(), 81);
        assert!(mc.iter().all(|p| p.lon == mc[0].lon));
        let lam = midheaven_from_lst(gmst + mc[0].lon, eps);
        assert!(angular_diff_deg(lam, 75.0).abs() < 0.3);

        let ic = zodio_line(&pos, jd, AngleKind::IC, &params).unwrap();
        let lam = midheaven_from_lst(gmst + ic[0].lon, eps);
        assert!(angular_diff_deg(lam, 255.0).abs() < 0.3);
    }

    #[test]
    fn test_ascendant_line_matches_target_and_is_continuous() {
        let jd = J2000_JD + 200.25;
        let pos = Position::from_ecliptic(130.0, 0.0, jd);
        let params = LineParams::default();

        let ac = zodio_line(&pos, jd, AngleKind::AC, &params).unwrap();
        for p in ac.iter().filter(|p| p.lat.abs() <= 60.0) {
            let asc = ascendant_ecliptic_longitude(p.lat, p.lon, jd);
            assert!(angular_diff_deg(asc, 130.0).abs() < 0.3, "lat {}", p.lat);
        }

        let max_jump = ac
            .iter()
            .filter(|p| p.lat.abs() <= 60.0)
            .tuple_windows()
            .map(|(a, b)| (b.lon - a.lon).abs())
            .fold(0.0, f64::max);
        assert!(max_jump < 4.0 * params.scan_step, "jump {max_jump}");
    }

    #[test]
    fn test_descendant_targets_antipode() {
        let jd = J2000_JD;
        let pos = Position::from_ecliptic(10.0, 0.0, jd);
        let dc = zodio_line(&pos, jd, AngleKind::DC, &LineParams::default()).unwrap();
        let eq = dc.iter().find(|p| p.lat == 0.0).unwrap();
        let asc = ascendant_ecliptic_longitude(0.0, eq.lon, jd);
        assert!(angular_diff_deg(asc, 190.0).abs() < 0.3);
    }

    #[test]
    fn test_unusable_scan_step_finds_nothing() {
        let pos = Position::from_ecliptic(10.0, 0.0, J2000_JD);
        for step in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let params = LineParams {
                scan_step: step,
                ..LineParams::default()
            };
            let roots = find_longitude_roots(|lon| angular_diff_deg(lon, 37.3), &params);
            assert!(roots.is_empty(), "step {step}");
            assert_eq!(zodio_line(&pos, J2000_JD, AngleKind::MC, &params), None);
        }
    }

    #[test]
    fn test_degenerate_line_is_none() {
        let params = LineParams::builder()
            .zodio_lat_range(0.0, 3.0)
            .build()
            .unwrap();
        let pos = Position::from_ecliptic(10.0, 0.0, J2000_JD);
        assert_eq!(zodio_line(&pos, J2000_JD, AngleKind::AC, &params), None);
    }
}
