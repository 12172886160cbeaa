//! Aspect lines (Mundo).
//!
//! Places where a body makes an aspect of `aspect` degrees, measured in sidereal
//! time, to the local Ascendant or Midheaven. The rising sidereal time
//! `α − H₀` (or the culminating one, `α`) is shifted by `±aspect`.

use crate::angles::unwrap_longitude;
use crate::astrocartography::GeoPoint;
use crate::constants::{Degree, JulianDay};
use crate::ephemeris::Position;
use crate::line_params::LineParams;
use crate::mundo::{longitude_for_lst, semi_diurnal_arc};
use crate::time::greenwich_sidereal_time;

/// Aspect line to the Ascendant.
///
/// At each Mundo latitude both `rising + aspect` and `rising − aspect` are
/// candidates; the one closer to the previous vertex is kept (the `+` one at the
/// first vertex), so the line follows a single branch.
///
/// Return
/// ------
/// * `None` when fewer than `params.min_points` latitudes have a rising time.
pub fn aspect_line_to_ascendant(
    pos: &Position,
    jd: JulianDay,
    aspect: Degree,
    params: &LineParams,
) -> Option<Vec<GeoPoint>> {
    let gmst = greenwich_sidereal_time(jd, 0.0);
    let mut prev_lon: Option<Degree> = None;
    let mut points = Vec::new();

    for lat in params.mundo_latitudes(pos.dec) {
        let Some(h0) = semi_diurnal_arc(lat, pos.dec) else {
            continue;
        };
        let rising = pos.ra - h0;
        let lon_plus = longitude_for_lst(rising + aspect, gmst);
        let lon_minus = longitude_for_lst(rising - aspect, gmst);

        let best = match prev_lon {
            None => lon_plus,
            Some(prev) => {
                let d_plus = (unwrap_longitude(lon_plus, prev_lon) - prev).abs();
                let d_minus = (unwrap_longitude(lon_minus, prev_lon) - prev).abs();
                if d_minus < d_plus {
                    lon_minus
                } else {
                    lon_plus
                }
            }
        };
        let lon = unwrap_longitude(best, prev_lon);
        prev_lon = Some(lon);
        points.push(GeoPoint::new(lat, lon));
    }

    (points.len() >= params.min_points).then_some(points)
}

/// The two aspect lines to the Midheaven, at `α + aspect` and `α − aspect`.
///
/// Both are meridians sampled on the MC grid; they coincide for 0° and 180°.
pub fn aspect_lines_to_midheaven(
    pos: &Position,
    jd: JulianDay,
    aspect: Degree,
    params: &LineParams,
) -> [Vec<GeoPoint>; 2] {
    let gmst = greenwich_sidereal_time(jd, 0.0);
    [pos.ra + aspect, pos.ra - aspect].map(|lst| {
        let lon = longitude_for_lst(lst, gmst);
        params
            .mc_latitudes()
            .map(|lat| GeoPoint::new(lat, lon))
            .collect()
    })
}
