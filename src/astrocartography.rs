//! # Astrocartography lines
//!
//! Entry points of the line engine: given a birth instant and place, compute for
//! a body the geographic polylines along which it sits on one of the four chart
//! angles.
//!
//! ## Overview
//!
//! * [`compute_line`] – one `(body, angle, convention)` polyline.
//! * [`compute_chart_lines`] – every angle of every requested body, positions
//!   fetched once per body. With the `parallel` feature the bodies are processed
//!   with `rayon`; the output order is the same either way.
//!
//! Lines are `Option`s: `None` means "no usable line" (too few samples had a
//! solution) and is not an error.
//!
//! ## Example
//!
//! ```rust
//! use astrocarto::astrocartography::{compute_line, AngleKind, BirthData, Convention};
//! use astrocarto::bodies::Body;
//! use astrocarto::ephemeris::PositionProvider;
//! use astrocarto::line_params::LineParams;
//! use astrocarto::time::BirthMoment;
//!
//! let moment = BirthMoment::new(1990, 6, 15, 14, 30, 0, 2.0).unwrap();
//! let birth = BirthData::from_moment(&moment, 48.85, 2.35).unwrap();
//! let provider = PositionProvider::default();
//!
//! let venus_mc = compute_line(
//!     &provider,
//!     Body::Venus,
//!     AngleKind::MC,
//!     Convention::Mundo,
//!     &birth,
//!     &LineParams::default(),
//! )
//! .unwrap();
//! assert_eq!(venus_mc.len(), 81);
//! ```

use std::fmt;

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::acg_errors::AcgError;
use crate::bodies::Body;
use crate::constants::{Degree, JulianDay};
use crate::ephemeris::{EphemerisSource, Position, PositionProvider};
use crate::line_params::LineParams;
use crate::mundo::mundo_line;
use crate::time::BirthMoment;
use crate::zodio::zodio_line;

/// One vertex of a line. Latitude in `[-90, 90]`, longitude east positive.
///
/// Inside a [`Line`] longitudes are unwrapped and may leave `(-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: Degree,
    pub lon: Degree,
}

impl GeoPoint {
    pub fn new(lat: Degree, lon: Degree) -> Self {
        GeoPoint { lat, lon }
    }
}

/// Chart angle a line follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AngleKind {
    /// Ascendant, the eastern horizon.
    AC,
    /// Descendant, the western horizon.
    DC,
    /// Midheaven, the upper meridian.
    MC,
    /// Imum Coeli, the lower meridian.
    IC,
}

impl AngleKind {
    /// The four angles in drawing order.
    pub const ALL: [AngleKind; 4] = [AngleKind::AC, AngleKind::DC, AngleKind::MC, AngleKind::IC];

    /// `true` for MC and IC, whose lines do not depend on latitude.
    pub fn is_meridian(&self) -> bool {
        matches!(self, AngleKind::MC | AngleKind::IC)
    }
}

impl fmt::Display for AngleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AngleKind::AC => "AC",
            AngleKind::DC => "DC",
            AngleKind::MC => "MC",
            AngleKind::IC => "IC",
        };
        write!(f, "{s}")
    }
}

/// Relocation convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Convention {
    /// Local horizon and meridian geometry, closed form.
    Mundo,
    /// Zodiacal Ascendant / Midheaven matching, numerical.
    Zodio,
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Convention::Mundo => write!(f, "mundo"),
            Convention::Zodio => write!(f, "zodio"),
        }
    }
}

/// A computed line with the metadata needed to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub body: Body,
    pub angle: AngleKind,
    pub convention: Convention,
    pub points: Vec<GeoPoint>,
}

impl Line {
    /// Label such as `"Venus MC"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.body, self.angle)
    }

    pub fn color(&self) -> &'static str {
        self.body.color()
    }

    /// Largest longitude step between consecutive vertices.
    pub fn max_longitude_step(&self) -> Degree {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| (b.lon - a.lon).abs())
            .fold(0.0, f64::max)
    }
}

/// Validated birth instant and place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub jd: JulianDay,
    pub place: GeoPoint,
}

impl BirthData {
    /// Check and wrap a Julian Day (UT) and geographic coordinates.
    ///
    /// Return
    /// ------
    /// * `Err(AcgError::InvalidBirthData)` when a value is not finite, `|lat| > 90`
    ///   or `|lon| > 180`.
    pub fn new(jd: JulianDay, lat: Degree, lon: Degree) -> Result<Self, AcgError> {
        if !jd.is_finite() {
            return Err(AcgError::InvalidBirthData(format!(
                "julian day is not finite: {jd}"
            )));
        }
        if !(lat.is_finite() && lat.abs() <= 90.0) {
            return Err(AcgError::InvalidBirthData(format!(
                "latitude out of range: {lat}"
            )));
        }
        if !(lon.is_finite() && lon.abs() <= 180.0) {
            return Err(AcgError::InvalidBirthData(format!(
                "longitude out of range: {lon}"
            )));
        }
        Ok(BirthData {
            jd,
            place: GeoPoint::new(lat, lon),
        })
    }

    pub fn from_moment(moment: &BirthMoment, lat: Degree, lon: Degree) -> Result<Self, AcgError> {
        Self::new(moment.julian_day(), lat, lon)
    }
}

/// Line of a body whose position is already known.
///
/// Dispatches to [`mundo_line`] or [`zodio_line`].
pub fn line_for_position(
    pos: &Position,
    jd: JulianDay,
    angle: AngleKind,
    convention: Convention,
    params: &LineParams,
) -> Option<Vec<GeoPoint>> {
    match convention {
        Convention::Mundo => mundo_line(pos, jd, angle, params),
        Convention::Zodio => zodio_line(pos, jd, angle, params),
    }
}

/// Compute one astrocartography line.
///
/// Arguments
/// ---------
/// * `provider`: source of body positions; the birth place is only used by derived points.
/// * `body`, `angle`, `convention`: which line.
/// * `birth`: validated birth instant and place.
/// * `params`: sampling configuration.
///
/// Return
/// ------
/// * `Some(points)` with at least `params.min_points` vertices, or `None`.
pub fn compute_line<S: EphemerisSource>(
    provider: &PositionProvider<S>,
    body: Body,
    angle: AngleKind,
    convention: Convention,
    birth: &BirthData,
    params: &LineParams,
) -> Option<Vec<GeoPoint>> {
    let pos = provider.position_at(body, birth.jd, birth.place);
    let line = line_for_position(&pos, birth.jd, angle, convention, params);
    log_line(body, angle, convention, line.as_deref());
    line
}

fn log_line(body: Body, angle: AngleKind, convention: Convention, points: Option<&[GeoPoint]>) {
    match points {
        Some(points) => debug!("{body} {angle} ({convention}): {} points", points.len()),
        None => debug!("{body} {angle} ({convention}): no usable line"),
    }
}

fn body_lines<S: EphemerisSource>(
    provider: &PositionProvider<S>,
    body: Body,
    convention: Convention,
    birth: &BirthData,
    params: &LineParams,
) -> Vec<Line> {
    let pos = provider.position_at(body, birth.jd, birth.place);
    AngleKind::ALL
        .iter()
        .filter_map(|&angle| {
            let points = line_for_position(&pos, birth.jd, angle, convention, params);
            log_line(body, angle, convention, points.as_deref());
            points.map(|points| Line {
                body,
                angle,
                convention,
                points,
            })
        })
        .collect()
}

/// Compute the AC, DC, MC and IC lines of every body, skipping the missing ones.
///
/// Lines are ordered by body (as given) then by angle (AC, DC, MC, IC).
pub fn compute_chart_lines<S: EphemerisSource + Sync>(
    provider: &PositionProvider<S>,
    bodies: &[Body],
    convention: Convention,
    birth: &BirthData,
    params: &LineParams,
) -> Vec<Line> {
    #[cfg(feature = "parallel")]
    let per_body: Vec<Vec<Line>> = bodies
        .par_iter()
        .map(|&body| body_lines(provider, body, convention, birth, params))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let per_body: Vec<Vec<Line>> = bodies
        .iter()
        .map(|&body| body_lines(provider, body, convention, birth, params))
        .collect();

    per_body.into_iter().flatten().collect()
}

#[cfg(test)]
mod astrocartography_test {
    use super::*;
    use crate::constants::J2000_JD;

    fn birth() -> BirthData {
        BirthData::new(J2000_JD, 51.5, -0.12).unwrap()
    }

    #[test]
    fn test_birth_data_validation() {
        assert!(BirthData::new(J2000_JD, 90.0, 180.0).is_ok());
        assert!(matches!(
            BirthData::new(J2000_JD, 91.0, 0.0),
            Err(AcgError::InvalidBirthData(_))
        ));
        assert!(BirthData::new(J2000_JD, 0.0, -180.5).is_err());
        assert!(BirthData::new(f64::NAN, 0.0, 0.0).is_err());
        assert!(BirthData::new(J2000_JD, f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_angle_display_and_meridian() {
        assert_eq!(AngleKind::IC.to_string(), "IC");
        assert!(AngleKind::MC.is_meridian());
        assert!(!AngleKind::DC.is_meridian());
        assert_eq!(Convention::Zodio.to_string(), "zodio");
    }

    #[test]
    fn test_compute_line_matches_solver() {
        let provider = PositionProvider::default();
        let b = birth();
        let params = LineParams::default();
        let line = compute_line(&provider, Body::Mars, AngleKind::AC, Convention::Mundo, &b, &params)
            .unwrap();
        let pos = provider.position(Body::Mars, b.jd).unwrap();
        assert_eq!(Some(line), mundo_line(&pos, b.jd, AngleKind::AC, &params));
    }

    #[test]
    fn test_chart_lines_order() {
        let provider = PositionProvider::default();
        let bodies = [Body::Sun, Body::Moon, Body::PartOfFortune];
        let lines = compute_chart_lines(
            &provider,
            &bodies,
            Convention::Mundo,
            &birth(),
            &LineParams::default(),
        );
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0].label(), "Sun AC");
        assert_eq!(lines[3].label(), "Sun IC");
        assert_eq!(lines[11].label(), "Part of Fortune IC");
        assert_eq!(lines[4].color(), "#C0C0C0");
        assert!(lines.iter().all(|l| l.max_longitude_step() <= 180.0));
    }

    #[test]
    fn test_missing_lines_are_skipped() {
        let provider = PositionProvider::default();
        let params = LineParams::builder().mundo_lat_cap(1.0).build().unwrap();
        let lines = compute_chart_lines(&provider, &[Body::Sun], Convention::Mundo, &birth(), &params);
        let angles: Vec<AngleKind> = lines.iter().map(|l| l.angle).collect();
        assert_eq!(angles, vec![AngleKind::MC, AngleKind::IC]);
    }
}
