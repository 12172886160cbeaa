//! # Mundo lines (closed form)
//!
//! Lines where a body physically crosses the local meridian (MC/IC) or horizon
//! (AC/DC), solved in closed form from its right ascension and declination.
//!
//! * **MC / IC**: the body culminates when `LST = α` (MC) or `LST = α + 180°` (IC),
//!   i.e. on the single longitude `normalize180(LST − GMST)`.
//! * **AC / DC**: at latitude `φ` the semi-diurnal arc `H₀` satisfies
//!   `cos H₀ = −tan φ · tan δ`; the body rises when `LST = α − H₀` and sets when
//!   `LST = α + H₀`. Latitudes where `|cos H₀| > 1` have no rising or setting and
//!   are skipped.

use log::trace;

use crate::angles::{normalize_deg180, unwrap_longitude};
use crate::astrocartography::{AngleKind, GeoPoint};
use crate::constants::{Degree, JulianDay, RADEG};
use crate::ephemeris::Position;
use crate::line_params::LineParams;
use crate::time::greenwich_sidereal_time;

/// Geographic longitude where the local sidereal time equals `lst`.
#[inline]
pub fn longitude_for_lst(lst: Degree, gmst: Degree) -> Degree {
    normalize_deg180(lst - gmst)
}

/// Semi-diurnal arc `H₀` (degrees) of a body at declination `dec` seen from latitude `lat`.
///
/// Return
/// ------
/// * `None` when the body is circumpolar or never rises at that latitude.
pub fn semi_diurnal_arc(lat: Degree, dec: Degree) -> Option<Degree> {
    let cos_h0 = -(lat * RADEG).tan() * (dec * RADEG).tan();
    if cos_h0.abs() > 1.0 {
        None
    } else {
        Some(cos_h0.acos() / RADEG)
    }
}

/// Longitude of the Mundo MC (`upper = true`) or IC line.
pub fn meridian_longitude(ra: Degree, gmst: Degree, upper: bool) -> Degree {
    let lst = if upper { ra } else { ra + 180.0 };
    longitude_for_lst(lst, gmst)
}

/// Compute a Mundo line for a body position.
///
/// Arguments
/// ---------
/// * `pos`: equatorial position of the body at `jd`.
/// * `jd`: Julian Day (UT) of the chart.
/// * `angle`: which chart angle the line follows.
/// * `params`: latitude grids and minimum point count.
///
/// Return
/// ------
/// * `Some(points)` ordered by increasing latitude, longitudes unwrapped,
/// * `None` when fewer than `params.min_points` samples have a solution.
pub fn mundo_line(
    pos: &Position,
    jd: JulianDay,
    angle: AngleKind,
    params: &LineParams,
) -> Option<Vec<GeoPoint>> {
    let gmst = greenwich_sidereal_time(jd, 0.0);

    let points: Vec<GeoPoint> = match angle {
        AngleKind::MC | AngleKind::IC => {
            let lon = meridian_longitude(pos.ra, gmst, angle == AngleKind::MC);
            params
                .mc_latitudes()
                .map(|lat| GeoPoint::new(lat, lon))
                .collect()
        }
        AngleKind::AC | AngleKind::DC => {
            let mut prev_lon = None;
            let mut points = Vec::new();
            for lat in params.mundo_latitudes(pos.dec) {
                let Some(h0) = semi_diurnal_arc(lat, pos.dec) else {
                    trace!("mundo {angle}: no rise/set at lat {lat}");
                    continue;
                };
                let lst = if angle == AngleKind::AC {
                    pos.ra - h0
                } else {
                    pos.ra + h0
                };
                let lon = unwrap_longitude(longitude_for_lst(lst, gmst), prev_lon);
                prev_lon = Some(lon);
                points.push(GeoPoint::new(lat, lon));
            }
            points
        }
    };

    (points.len() >= params.min_points).then_some(points)
}
