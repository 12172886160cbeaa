//! # Equatorial and ecliptic frames
//!
//! Frame conversions used by the position provider and both line solvers:
//!
//! * [`mean_obliquity`] – mean obliquity of the ecliptic of date (Meeus, eq. 22.2).
//! * [`rotmt`] – rotation matrix about one of the principal axes.
//! * [`equatorial_to_ecliptic`] / [`ecliptic_to_equatorial`] – rotation of a unit
//!   direction about the vernal-equinox axis (x) by ∓ε.
//! * [`ascendant_from_lst`] / [`ascendant_ecliptic_longitude`] – ecliptic longitude
//!   of the relocated Ascendant, including the eastern-side disambiguation.
//! * [`midheaven_from_lst`] – ecliptic longitude of the relocated Midheaven.
//! * [`ecliptic_point_right_ascension`] – right ascension of a point on the ecliptic.
//!
//! Angles at the public boundary are degrees; radians are used only inside the
//! trigonometric expressions.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::angles::{angular_diff_deg, normalize_deg360};
use crate::constants::{Degree, JulianDay, Radian, RADEG, RADSEC};
use crate::time::{centuries_since_j2000, greenwich_sidereal_time};

/// Compute the mean obliquity of the ecliptic at a given Julian Day.
///
/// Low-order polynomial in Julian centuries since J2000 (arcseconds), evaluated
/// with Horner's method:
///
/// ```text
/// ε = 84381.448 − 46.8150·T − 0.00059·T² + 0.001813·T³
/// ```
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
pub fn mean_obliquity(jd: JulianDay) -> Radian {
    let ob0 = 84381.448;
    let ob1 = -46.8150;
    let ob2 = -0.00059;
    let ob3 = 0.001813;

    let t = centuries_since_j2000(jd);

    (((ob3 * t + ob2) * t + ob1) * t + ob0) * RADSEC
}

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes (X, Y, or Z).
///
/// # Arguments
///
/// * `alpha` - Rotation angle in **radians** (positive = direct/trigonometric sense).
/// * `k` - Index of the axis of rotation:
///   * `0` → X-axis
///   * `1` → Y-axis
///   * `2` → Z-axis
///
/// # Returns
///
/// An **active** rotation `R` such that the rotated vector is `x' = R · x`.
///
/// # Panics
///
/// Panics if `k > 2`, as only axes 0–2 are valid.
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Unit direction vector of spherical coordinates given in degrees.
pub fn unit_vector(lon: Degree, lat: Degree) -> Vector3<f64> {
    let (sl, cl) = (lon * RADEG).sin_cos();
    let (sb, cb) = (lat * RADEG).sin_cos();
    Vector3::new(cb * cl, cb * sl, sb)
}

/// Spherical coordinates `(lon ∈ [0, 360), lat ∈ [-90, 90])` of a (not necessarily unit) vector.
pub fn spherical_from_vector(v: &Vector3<f64>) -> (Degree, Degree) {
    let rho = (v.x * v.x + v.y * v.y).sqrt();
    let lon = normalize_deg360(v.y.atan2(v.x) / RADEG);
    let lat = v.z.atan2(rho) / RADEG;
    (lon, lat)
}

/// Convert equatorial coordinates of date to ecliptic coordinates of date.
///
/// The unit direction `(cos δ cos α, cos δ sin α, sin δ)` is rotated by `−ε` about
/// the x axis (the vernal-equinox direction).
///
/// Arguments
/// ---------
/// * `ra`, `dec`: right ascension and declination in degrees.
/// * `jd`: Julian Day used for the mean obliquity.
///
/// Return
/// ------
/// * `(lon, lat)`: ecliptic longitude in `[0, 360)` and latitude in degrees.
pub fn equatorial_to_ecliptic(ra: Degree, dec: Degree, jd: JulianDay) -> (Degree, Degree) {
    let rot = rotmt(-mean_obliquity(jd), 0);
    spherical_from_vector(&(rot * unit_vector(ra, dec)))
}

/// Inverse of [`equatorial_to_ecliptic`]: rotate an ecliptic direction by `+ε`.
///
/// Return
/// ------
/// * `(ra, dec)`: right ascension in `[0, 360)` and declination in degrees.
pub fn ecliptic_to_equatorial(lon: Degree, lat: Degree, jd: JulianDay) -> (Degree, Degree) {
    let rot = rotmt(mean_obliquity(jd), 0);
    spherical_from_vector(&(rot * unit_vector(lon, lat)))
}

/// Right ascension of the ecliptic point of longitude `lon` (latitude 0).
///
/// ```text
/// α = atan2(sin λ · cos ε, cos λ)
/// ```
pub fn ecliptic_point_right_ascension(lon: Degree, obliquity: Radian) -> Degree {
    let lam = lon * RADEG;
    normalize_deg360((lam.sin() * obliquity.cos()).atan2(lam.cos()) / RADEG)
}

/// Ecliptic longitude of the relocated Midheaven for a local sidereal time.
///
/// The culminating ecliptic point has right ascension `θ`, hence
///
/// ```text
/// λ_MC = atan2(sin θ, cos θ · cos ε)
/// ```
///
/// No latitude dependence and no branch ambiguity: the IC is the antipode.
pub fn midheaven_from_lst(lst: Degree, obliquity: Radian) -> Degree {
    let th = normalize_deg360(lst) * RADEG;
    let lam = th.sin().atan2(th.cos() * obliquity.cos());
    normalize_deg360(lam / RADEG)
}

/// Ecliptic longitude of the relocated Ascendant for a latitude and local sidereal time.
///
/// The ecliptic meets the horizon at two antipodal points:
///
/// ```text
/// λ = atan2(cos θ, −(sin θ · cos ε + tan φ · sin ε))
/// ```
///
/// The closed form picks one of them, but near the polar circles it may be the
/// Descendant. The result is forced onto the eastern intersection: the signed
/// difference `θ − α` between the sidereal time and the right ascension of the
/// point is its hour angle, and when it is positive (western sky) the value is
/// flipped by 180°.
///
/// The often quoted `atan2(sin θ · cos ε − tan φ · sin ε, cos θ)` is not used: it
/// is the right ascension map of the ecliptic, not its horizon intersection, and
/// at `φ = 0`, `θ = 0` it returns 0° (the Midheaven) where the Ascendant is 90°.
/// For the same reason the Midheaven uses the inverse map of [`midheaven_from_lst`].
///
/// Arguments
/// ---------
/// * `lat`: geographic latitude in degrees (|lat| < 90).
/// * `lst`: local sidereal time in degrees.
/// * `obliquity`: obliquity of the ecliptic in radians.
pub fn ascendant_from_lst(lat: Degree, lst: Degree, obliquity: Radian) -> Degree {
    let lst = normalize_deg360(lst);
    let th = lst * RADEG;
    let phi = lat * RADEG;

    let lam = th
        .cos()
        .atan2(-(th.sin() * obliquity.cos() + phi.tan() * obliquity.sin()));
    let lam = normalize_deg360(lam / RADEG);

    let hour_angle = angular_diff_deg(lst, ecliptic_point_right_ascension(lam, obliquity));
    if hour_angle > 0.0 {
        normalize_deg360(lam + 180.0)
    } else {
        lam
    }
}

/// Ecliptic longitude of the Ascendant at a geographic position and instant.
///
/// The local sidereal time is `GMST(jd) + lon` and the mean obliquity of date is used.
/// See [`ascendant_from_lst`] for the formula and the branch rule.
pub fn ascendant_ecliptic_longitude(lat: Degree, lon: Degree, jd: JulianDay) -> Degree {
    let lst = greenwich_sidereal_time(jd, lon);
    ascendant_from_lst(lat, lst, mean_obliquity(jd))
}

/// Ecliptic longitude of the Midheaven for a local sidereal time at a given instant.
pub fn midheaven_ecliptic_longitude(lst: Degree, jd: JulianDay) -> Degree {
    midheaven_from_lst(lst, mean_obliquity(jd))
}
