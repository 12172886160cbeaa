#![allow(dead_code)]

use astrocarto::acg_errors::AcgError;
use astrocarto::astrocartography::{BirthData, GeoPoint};
use astrocarto::bodies::Body;
use astrocarto::constants::JulianDay;
use astrocarto::ephemeris::EphemerisSource;
use astrocarto::ref_system::unit_vector;
use astrocarto::time::BirthMoment;
use itertools::Itertools;
use nalgebra::Vector3;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 1990-06-15 14:30 local time (UTC+2), Paris.
pub fn paris_birth() -> BirthData {
    let moment = BirthMoment::new(1990, 6, 15, 14, 30, 0, 2.0).unwrap();
    BirthData::from_moment(&moment, 48.8566, 2.3522).unwrap()
}

/// Ephemeris reporting every body at the same RA/Dec.
pub struct FixedSource {
    pub ra: f64,
    pub dec: f64,
}

impl EphemerisSource for FixedSource {
    fn geocentric_equatorial(&self, _: Body, _: JulianDay) -> Result<Vector3<f64>, AcgError> {
        Ok(unit_vector(self.ra, self.dec) * 1.5)
    }
}

/// Latitudes strictly increasing and no longitude jump above `max_step`.
pub fn assert_line_continuous(points: &[GeoPoint], max_step: f64) {
    for (a, b) in points.iter().tuple_windows() {
        assert!(b.lat > a.lat, "latitudes not increasing: {a:?} -> {b:?}");
        assert!(
            (b.lon - a.lon).abs() <= max_step,
            "longitude jump above {max_step}: {a:?} -> {b:?}"
        );
    }
}
