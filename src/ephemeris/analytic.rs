//! # Built-in analytic ephemeris
//!
//! A self-contained, low-precision [`EphemerisSource`] used when no external
//! ephemeris is plugged in, and as the fallback when an external source fails.
//!
//! ## Models
//!
//! * **Planets and Earth–Moon barycenter** – mean Keplerian elements with linear
//!   rates (Standish, *Keplerian Elements for Approximate Positions of the Major
//!   Planets*, table 1, valid 1800–2050). Kepler's equation is solved with
//!   Newton–Raphson from the [`roots`] crate; the heliocentric position is rotated
//!   from the orbital plane with `Rz(Ω)·Rx(i)·Rz(ω)`.
//! * **Sun** – the opposite of the Earth–Moon barycenter heliocentric vector.
//! * **Moon** – the leading periodic terms of the ELP-2000/82 series as given by
//!   Meeus, *Astronomical Algorithms*, ch. 47.
//!
//! Geocentric ecliptic J2000 vectors are precessed to the ecliptic of date
//! (general precession in longitude), then rotated to the mean equator of date.
//! Positions are geometric (no light time, aberration or nutation); accuracy is
//! of the order of an arcminute for the Sun and planets and a few arcminutes for
//! the Moon, which is sufficient for line plotting at map scale.

use nalgebra::Vector3;
use roots::{find_root_newton_raphson, SimpleConvergency};

use crate::acg_errors::AcgError;
use crate::angles::normalize_deg180;
use crate::bodies::Body;
use crate::constants::{JulianDay, RADEG, RADSEC};
use crate::ephemeris::EphemerisSource;
use crate::ref_system::{mean_obliquity, rotmt, unit_vector};
use crate::time::centuries_since_j2000;

/// Astronomical Unit in kilometers (IAU 2012)
const AU_KM: f64 = 149_597_870.7;

/// Mean orbital elements at J2000 and their rates per Julian century.
///
/// Angles in degrees, semi-major axis in AU.
#[derive(Debug, Clone, Copy)]
struct MeanElements {
    semi_major_axis: [f64; 2],
    eccentricity: [f64; 2],
    inclination: [f64; 2],
    mean_longitude: [f64; 2],
    perihelion_longitude: [f64; 2],
    node_longitude: [f64; 2],
}

const EARTH_MOON_BARY: MeanElements = MeanElements {
    semi_major_axis: [1.00000261, 0.00000562],
    eccentricity: [0.01671123, -0.00004392],
    inclination: [-0.00001531, -0.01294668],
    mean_longitude: [100.46457166, 35999.37244981],
    perihelion_longitude: [102.93768193, 0.32327364],
    node_longitude: [0.0, 0.0],
};

fn planet_elements(body: Body) -> Option<MeanElements> {
    let elements = match body {
        Body::Mercury => MeanElements {
            semi_major_axis: [0.38709927, 0.00000037],
            eccentricity: [0.20563593, 0.00001906],
            inclination: [7.00497902, -0.00594749],
            mean_longitude: [252.25032350, 149472.67411175],
            perihelion_longitude: [77.45779628, 0.16047689],
            node_longitude: [48.33076593, -0.12534081],
        },
        Body::Venus => MeanElements {
            semi_major_axis: [0.72333566, 0.00000390],
            eccentricity: [0.00677672, -0.00004107],
            inclination: [3.39467605, -0.00078890],
            mean_longitude: [181.97909950, 58517.81538729],
            perihelion_longitude: [131.60246718, 0.00268329],
            node_longitude: [76.67984255, -0.27769418],
        },
        Body::Mars => MeanElements {
            semi_major_axis: [1.52371034, 0.00001847],
            eccentricity: [0.09339410, 0.00007882],
            inclination: [1.84969142, -0.00813131],
            mean_longitude: [-4.55343205, 19140.30268499],
            perihelion_longitude: [-23.94362959, 0.44441088],
            node_longitude: [49.55953891, -0.29257343],
        },
        Body::Jupiter => MeanElements {
            semi_major_axis: [5.20288700, -0.00011607],
            eccentricity: [0.04838624, -0.00013253],
            inclination: [1.30439695, -0.00183714],
            mean_longitude: [34.39644051, 3034.74612775],
            perihelion_longitude: [14.72847983, 0.21252668],
            node_longitude: [100.47390909, 0.20469106],
        },
        Body::Saturn => MeanElements {
            semi_major_axis: [9.53667594, -0.00125060],
            eccentricity: [0.05386179, -0.00050991],
            inclination: [2.48599187, 0.00193609],
            mean_longitude: [49.95424423, 1222.49362201],
            perihelion_longitude: [92.59887831, -0.41897216],
            node_longitude: [113.66242448, -0.28867794],
        },
        Body::Uranus => MeanElements {
            semi_major_axis: [19.18916464, -0.00196176],
            eccentricity: [0.04725744, -0.00004397],
            inclination: [0.77263783, -0.00242939],
            mean_longitude: [313.23810451, 428.48202785],
            perihelion_longitude: [170.95427630, 0.40805281],
            node_longitude: [74.01692503, 0.04240589],
        },
        Body::Neptune => MeanElements {
            semi_major_axis: [30.06992276, 0.00026291],
            eccentricity: [0.00859048, 0.00005105],
            inclination: [1.77004347, 0.00035372],
            mean_longitude: [-55.12002969, 218.45945325],
            perihelion_longitude: [44.96476227, -0.32241464],
            node_longitude: [131.78422574, -0.00508664],
        },
        Body::Pluto => MeanElements {
            semi_major_axis: [39.48211675, -0.00031596],
            eccentricity: [0.24882730, 0.00005170],
            inclination: [17.14001206, 0.00004818],
            mean_longitude: [238.92903833, 145.20780515],
            perihelion_longitude: [224.06891629, -0.04062942],
            node_longitude: [110.30393684, -0.01183482],
        },
        _ => return None,
    };
    Some(elements)
}

/// Heliocentric mean longitude (degrees, not normalized) of a planet from its mean elements.
pub(crate) fn heliocentric_mean_longitude(body: Body, t: f64) -> Option<f64> {
    planet_elements(body).map(|el| el.mean_longitude[0] + el.mean_longitude[1] * t)
}

/// Solve Kepler's equation `E − e·sin E = M` (radians).
fn solve_kepler_equation(mean_anomaly: f64, eccentricity: f64) -> Result<f64, AcgError> {
    let f = |e_anom: f64| e_anom - eccentricity * e_anom.sin() - mean_anomaly;
    let df = |e_anom: f64| 1.0 - eccentricity * e_anom.cos();

    let mut tol = SimpleConvergency {
        eps: 1e-12,
        max_iter: 30,
    };

    Ok(find_root_newton_raphson(mean_anomaly, &f, &df, &mut tol)?)
}

impl MeanElements {
    /// Heliocentric position, ecliptic and equinox J2000, in AU.
    fn heliocentric_position(&self, t: f64) -> Result<Vector3<f64>, AcgError> {
        let at = |v: [f64; 2]| v[0] + v[1] * t;

        let a = at(self.semi_major_axis);
        let e = at(self.eccentricity);
        let incl = at(self.inclination) * RADEG;
        let mean_lon = at(self.mean_longitude);
        let peri_lon = at(self.perihelion_longitude);
        let node = at(self.node_longitude);

        let arg_peri = (peri_lon - node) * RADEG;
        let mean_anomaly = normalize_deg180(mean_lon - peri_lon) * RADEG;

        let ecc_anomaly = solve_kepler_equation(mean_anomaly, e)?;
        let orbital = Vector3::new(
            a * (ecc_anomaly.cos() - e),
            a * (1.0 - e * e).sqrt() * ecc_anomaly.sin(),
            0.0,
        );

        Ok(rotmt(node * RADEG, 2) * rotmt(incl, 0) * rotmt(arg_peri, 2) * orbital)
    }
}

/// Geocentric ecliptic position of the Moon, ecliptic of date, in AU.
fn moon_ecliptic_of_date(t: f64) -> Vector3<f64> {
    let l = 218.3164477 + 481267.88123421 * t;
    let d = (297.8501921 + 445267.1114034 * t) * RADEG;
    let m = (357.5291092 + 35999.0502909 * t) * RADEG;
    let mp = (134.9633964 + 477198.8675055 * t) * RADEG;
    let f = (93.2720950 + 483202.0175233 * t) * RADEG;

    let lon = l + 6.288774 * mp.sin()
        + 1.274027 * (2.0 * d - mp).sin()
        + 0.658314 * (2.0 * d).sin()
        + 0.213618 * (2.0 * mp).sin()
        - 0.185116 * m.sin()
        - 0.114332 * (2.0 * f).sin()
        + 0.058793 * (2.0 * d - 2.0 * mp).sin()
        + 0.057066 * (2.0 * d - m - mp).sin()
        + 0.053322 * (2.0 * d + mp).sin()
        + 0.045758 * (2.0 * d - m).sin();

    let lat = 5.128122 * f.sin()
        + 0.280602 * (mp + f).sin()
        + 0.277693 * (mp - f).sin()
        + 0.173237 * (2.0 * d - f).sin()
        + 0.055413 * (2.0 * d - mp + f).sin()
        + 0.046271 * (2.0 * d - mp - f).sin();

    let dist_km = 385000.56
        - 20905.355 * mp.cos()
        - 3699.111 * (2.0 * d - mp).cos()
        - 2955.968 * (2.0 * d).cos()
        - 569.925 * (2.0 * mp).cos();

    unit_vector(lon, lat) * (dist_km / AU_KM)
}

/// Rotation about the ecliptic pole by the general precession in longitude since J2000.
fn precess_ecliptic_j2000_to_date(v: Vector3<f64>, t: f64) -> Vector3<f64> {
    let p_a = (5029.0966 * t + 1.11113 * t * t) * RADSEC;
    rotmt(p_a, 2) * v
}

/// Low-precision analytic ephemeris covering the Sun, the Moon and Mercury through Pluto.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    /// Geocentric position in the ecliptic and equinox of date, in AU.
    pub fn geocentric_ecliptic(&self, body: Body, jd: JulianDay) -> Result<Vector3<f64>, AcgError> {
        let t = centuries_since_j2000(jd);

        let ecl_j2000 = match body {
            Body::Moon => return Ok(moon_ecliptic_of_date(t)),
            Body::Sun => -EARTH_MOON_BARY.heliocentric_position(t)?,
            _ => {
                let elements = planet_elements(body).ok_or_else(|| {
                    AcgError::EphemerisUnavailable(format!(
                        "{body} is not covered by the analytic ephemeris"
                    ))
                })?;
                elements.heliocentric_position(t)? - EARTH_MOON_BARY.heliocentric_position(t)?
            }
        };

        Ok(precess_ecliptic_j2000_to_date(ecl_j2000, t))
    }
}

impl EphemerisSource for AnalyticEphemeris {
    fn geocentric_equatorial(&self, body: Body, jd: JulianDay) -> Result<Vector3<f64>, AcgError> {
        let ecl = self.geocentric_ecliptic(body, jd)?;
        Ok(rotmt(mean_obliquity(jd), 0) * ecl)
    }
}

#[cfg(test)]
mod analytic_test {
    use super::*;
    use crate::angles::angular_diff_deg;
    use crate::constants::J2000_JD;
    use crate::ref_system::spherical_from_vector;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_kepler_equation() {
        let e_anom = solve_kepler_equation(1.0, 0.2).unwrap();
        assert_abs_diff_eq!(e_anom - 0.2 * e_anom.sin(), 1.0, epsilon = 1e-12);
        assert_eq!(solve_kepler_equation(0.0, 0.1).unwrap(), 0.0);
    }

    #[test]
    fn test_sun_at_j2000() {
        let v = AnalyticEphemeris
            .geocentric_equatorial(Body::Sun, J2000_JD)
            .unwrap();
        let (ra, dec) = spherical_from_vector(&v);
        assert_abs_diff_eq!(ra, 281.28, epsilon = 0.1);
        assert_abs_diff_eq!(dec, -23.03, epsilon = 0.1);
        assert_abs_diff_eq!(v.norm(), 0.9833, epsilon = 1e-3);

        let ecl = AnalyticEphemeris
            .geocentric_ecliptic(Body::Sun, J2000_JD)
            .unwrap();
        let (lon, lat) = spherical_from_vector(&ecl);
        assert_abs_diff_eq!(lon, 280.38, epsilon = 0.05);
        assert_abs_diff_eq!(lat, 0.0, epsilon = 0.01);
    }

    #[test]
    fn test_moon_meeus_47a() {
        // 1992 April 12, 0h TD: λ = 133.162655°, β = −3.229126°, Δ = 368409.7 km
        let jd = 2448724.5;
        let v = AnalyticEphemeris.geocentric_ecliptic(Body::Moon, jd).unwrap();
        let (lon, lat) = spherical_from_vector(&v);
        assert!(angular_diff_deg(lon, 133.162655).abs() < 0.3);
        assert_abs_diff_eq!(lat, -3.229126, epsilon = 0.2);
        assert_abs_diff_eq!(v.norm() * AU_KM, 368409.7, epsilon = 2000.0);
    }

    #[test]
    fn test_venus_meeus_33a() {
        // 1992 December 20, 0h TD: α = 316.1727°, δ = −18.8880° (apparent)
        let jd = 2448976.5;
        let v = AnalyticEphemeris
            .geocentric_equatorial(Body::Venus, jd)
            .unwrap();
        let (ra, dec) = spherical_from_vector(&v);
        assert!(angular_diff_deg(ra, 316.1727).abs() < 0.1);
        assert_abs_diff_eq!(dec, -18.888, epsilon = 0.1);
    }

    #[test]
    fn test_points_are_not_covered() {
        assert!(matches!(
            AnalyticEphemeris.geocentric_equatorial(Body::NorthNode, J2000_JD),
            Err(AcgError::EphemerisUnavailable(_))
        ));
    }
}
