//! # Body positions
//!
//! The seam between the line solvers and whatever produces planetary positions.
//!
//! ## Overview
//!
//! * [`EphemerisSource`] is the outbound trait: given a [`Body`] and a Julian Day
//!   it returns a **geocentric equatorial vector** (mean equator and equinox of
//!   date, any length unit). External high-precision ephemerides are plugged in
//!   by implementing it.
//! * [`AnalyticEphemeris`] is the built-in low-precision implementation.
//! * [`PositionProvider`] turns vectors into [`Position`]s and owns the fallback
//!   chain, so line computation never fails because of a missing ephemeris:
//!
//! ```text
//! VectorEphemeris body ─► source ──err──► AnalyticEphemeris ──err──► mean longitude
//! MeanLongitude body   ─────────────────────────────────────────────► mean longitude
//! Derived body         ─► part_of_fortune (Sun + Moon through this provider)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use astrocarto::bodies::Body;
//! use astrocarto::ephemeris::PositionProvider;
//!
//! let provider = PositionProvider::default();
//! let sun = provider.position(Body::Sun, 2451545.0).unwrap();
//! assert!((sun.dec + 23.0).abs() < 0.1);
//! ```

pub mod analytic;
pub mod mean_longitude;

use log::warn;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::acg_errors::AcgError;
use crate::astrocartography::GeoPoint;
use crate::bodies::{Body, BodyCapability};
use crate::constants::{Degree, JulianDay};
use crate::part_of_fortune::part_of_fortune;
use crate::ref_system::{ecliptic_to_equatorial, equatorial_to_ecliptic, spherical_from_vector};

pub use analytic::AnalyticEphemeris;

/// A provider of geocentric equatorial vectors.
pub trait EphemerisSource {
    /// Geocentric position of `body` at `jd`, in the mean equator and equinox of date.
    ///
    /// Only the direction is used, the length unit is free.
    fn geocentric_equatorial(&self, body: Body, jd: JulianDay) -> Result<Vector3<f64>, AcgError>;

    /// Whether this source should be asked for `body` at all.
    fn supports(&self, body: Body) -> bool {
        body.capability() == BodyCapability::VectorEphemeris
    }
}

/// Equatorial position of a body, with its ecliptic companion when known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Right ascension, degrees in `[0, 360)`.
    pub ra: Degree,
    /// Declination, degrees in `[-90, 90]`.
    pub dec: Degree,
    pub ecl_lon: Option<Degree>,
    pub ecl_lat: Option<Degree>,
}

impl Position {
    /// Equatorial-only position; the ecliptic pair is derived on demand.
    pub fn equatorial(ra: Degree, dec: Degree) -> Self {
        Position {
            ra,
            dec,
            ecl_lon: None,
            ecl_lat: None,
        }
    }

    /// Position from a geocentric equatorial vector of date.
    pub fn from_equatorial_vector(v: &Vector3<f64>, jd: JulianDay) -> Self {
        let (ra, dec) = spherical_from_vector(v);
        let (lon, lat) = equatorial_to_ecliptic(ra, dec, jd);
        Position {
            ra,
            dec,
            ecl_lon: Some(lon),
            ecl_lat: Some(lat),
        }
    }

    /// Position from ecliptic coordinates of date.
    pub fn from_ecliptic(lon: Degree, lat: Degree, jd: JulianDay) -> Self {
        let (ra, dec) = ecliptic_to_equatorial(lon, lat, jd);
        Position {
            ra,
            dec,
            ecl_lon: Some(lon),
            ecl_lat: Some(lat),
        }
    }

    /// Ecliptic `(lon, lat)`, rotated from RA/Dec with the obliquity of `jd` when not stored.
    pub fn ecliptic_or_derived(&self, jd: JulianDay) -> (Degree, Degree) {
        match (self.ecl_lon, self.ecl_lat) {
            (Some(lon), Some(lat)) => (lon, lat),
            _ => equatorial_to_ecliptic(self.ra, self.dec, jd),
        }
    }
}

/// Resolves any [`Body`] to a [`Position`], never failing.
///
/// The generic parameter is the primary vector source; the built-in
/// [`AnalyticEphemeris`] is both the default source and the fallback.
#[derive(Debug, Clone)]
pub struct PositionProvider<S: EphemerisSource = AnalyticEphemeris> {
    source: S,
    fallback: AnalyticEphemeris,
}

impl Default for PositionProvider<AnalyticEphemeris> {
    fn default() -> Self {
        Self::new(AnalyticEphemeris)
    }
}

impl<S: EphemerisSource> PositionProvider<S> {
    pub fn new(source: S) -> Self {
        PositionProvider {
            source,
            fallback: AnalyticEphemeris,
        }
    }

    /// Position of a tabulated body (everything except the derived points).
    ///
    /// Return
    /// ------
    /// * `None` for [`BodyCapability::Derived`] bodies, which need a birth place:
    ///   use [`PositionProvider::position_at`].
    pub fn position(&self, body: Body, jd: JulianDay) -> Option<Position> {
        (body.capability() != BodyCapability::Derived).then(|| self.tabulated(body, jd))
    }

    /// Position of any body, using `place` for the points that depend on the observer.
    pub fn position_at(&self, body: Body, jd: JulianDay, place: GeoPoint) -> Position {
        match body.capability() {
            BodyCapability::Derived => part_of_fortune(self, jd, place).position,
            _ => self.tabulated(body, jd),
        }
    }

    pub(crate) fn tabulated(&self, body: Body, jd: JulianDay) -> Position {
        if body.capability() == BodyCapability::VectorEphemeris {
            if let Some(v) = self.vector(body, jd) {
                return Position::from_equatorial_vector(&v, jd);
            }
        }
        // derived points never reach this branch
        let lon = mean_longitude::mean_longitude(body, jd).unwrap_or_default();
        Position::from_ecliptic(lon, 0.0, jd)
    }

    fn vector(&self, body: Body, jd: JulianDay) -> Option<Vector3<f64>> {
        if self.source.supports(body) {
            match self.source.geocentric_equatorial(body, jd) {
                Ok(v) => return Some(v),
                Err(err) => warn!("{body}: ephemeris source failed at JD {jd} ({err}), using the analytic ephemeris"),
            }
        }
        match self.fallback.geocentric_equatorial(body, jd) {
            Ok(v) => Some(v),
            Err(err) => {
                warn!("{body}: analytic ephemeris failed at JD {jd} ({err}), using the mean longitude");
                None
            }
        }
    }
}
