//! Linear mean-longitude model.
//!
//! Used for the lunar nodes, Chiron and the Black Moon (Lilith), which have no
//! vector ephemeris here, and as the last-resort estimate for any other body when
//! every vector source failed. The point is assumed to lie on the ecliptic.

use crate::angles::normalize_deg360;
use crate::bodies::Body;
use crate::constants::{Degree, JulianDay};
use crate::ephemeris::analytic::heliocentric_mean_longitude;
use crate::time::centuries_since_j2000;

/// `(L0, L1)` such that `λ = L0 + L1·T` degrees, T in Julian centuries since J2000.
fn linear_terms(body: Body) -> Option<(f64, f64)> {
    match body {
        Body::NorthNode => Some((125.04, -1934.136)),
        Body::Chiron => Some((50.08, 2368.34)),
        Body::Lilith => Some((83.35, 4069.01)),
        Body::Sun => Some((280.46646, 36000.76983)),
        Body::Moon => Some((218.3165, 481267.8813)),
        _ => None,
    }
}

/// Mean ecliptic longitude of `body` at `jd`, in `[0, 360)`.
///
/// Planets fall back to their heliocentric mean longitude, a crude proxy for the
/// geocentric one. Returns `None` only for derived points.
pub fn mean_longitude(body: Body, jd: JulianDay) -> Option<Degree> {
    let t = centuries_since_j2000(jd);
    linear_terms(body)
        .map(|(l0, l1)| l0 + l1 * t)
        .or_else(|| heliocentric_mean_longitude(body, t))
        .map(normalize_deg360)
}
