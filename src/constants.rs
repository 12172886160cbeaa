//! # Constants and type definitions for astrocarto
//!
//! This module centralizes the **conversion factors**, **epoch constants**, and
//! **default sampling grids** used throughout the line-solving engine.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, arcseconds ↔ radians)
//! - The J2000.0 epoch expressed as a Julian Day
//! - Core type aliases shared by all modules
//! - Default latitude grids, scan steps and tolerances of the line solvers
//!
//! The grid constants are the defaults of [`LineParams`](crate::line_params::LineParams);
//! every one of them can be overridden through its builder.

// -------------------------------------------------------------------------------------------------
// Unit conversions and epochs
// -------------------------------------------------------------------------------------------------

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00:00)
pub const J2000_JD: f64 = 2_451_545.0;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Julian Day (days, UTC based)
pub type JulianDay = f64;

// -------------------------------------------------------------------------------------------------
// Default sampling grids and solver tolerances
// -------------------------------------------------------------------------------------------------

/// Latitude bounds of constant-longitude (MC/IC) lines, both conventions
pub const MC_LAT_MIN: Degree = -80.0;
pub const MC_LAT_MAX: Degree = 80.0;
/// Latitude step of MC/IC lines
pub const MC_LAT_STEP: Degree = 2.0;

/// Latitude step of Mundo rising/setting lines
pub const MUNDO_LAT_STEP: Degree = 0.5;
/// Hard cap of the Mundo rising/setting latitude range, before the `90 - |dec|` bound
pub const MUNDO_LAT_CAP: Degree = 89.0;

/// Latitude bounds and step of Zodio rising/setting lines
pub const ZODIO_LAT_MIN: Degree = -80.0;
pub const ZODIO_LAT_MAX: Degree = 80.0;
pub const ZODIO_LAT_STEP: Degree = 1.0;
/// Zodio samples with a larger absolute latitude are skipped
pub const ZODIO_LAT_ABS_LIMIT: Degree = 85.0;

/// Longitude scan step of the Zodio root finder
pub const SCAN_STEP: Degree = 2.0;
/// A scan sample with `|f|` below this value is accepted directly as a root
pub const DIRECT_HIT_TOLERANCE: Degree = 0.25;
/// Bisection stops early once `|f(mid)|` is below this value
pub const BISECTION_TOLERANCE: Degree = 0.01;
/// Maximum number of bisection halvings per bracket
pub const BISECTION_MAX_ITER: usize = 25;

/// Lines with fewer points than this are reported as "no line"
pub const MIN_LINE_POINTS: usize = 6;
