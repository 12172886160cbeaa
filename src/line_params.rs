//! # Line sampling parameters
//!
//! [`LineParams`] gathers every tunable of the line solvers: latitude grids,
//! the longitude scan step and tolerances of the Zodio root finder, and the
//! minimum number of points for a line to be kept. The defaults reproduce the
//! reference behaviour; a validated fluent builder allows overriding them.
//!
//! ```rust
//! use astrocarto::line_params::LineParams;
//!
//! let params = LineParams::builder()
//!     .mundo_lat_step(1.0)
//!     .scan_step(6.0)
//!     .direct_hit_tolerance(0.1)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.min_points, 6);
//! ```

use std::cmp::Ordering::{Equal, Greater, Less};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::acg_errors::AcgError;
use crate::constants::*;

/// Configuration of the line solvers. All angles in degrees.
///
/// Deserialization goes through [`LineParamsBuilder::build`]: missing fields take
/// their default and invalid values are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedLineParams")]
pub struct LineParams {
    // --- MC / IC grid (both conventions) ---
    pub mc_lat_min: Degree,
    pub mc_lat_max: Degree,
    pub mc_lat_step: Degree,

    // --- Mundo AC / DC ---
    pub mundo_lat_step: Degree,
    /// Upper bound of `|lat|`, further reduced to `90 − |dec|` per body.
    pub mundo_lat_cap: Degree,

    // --- Zodio AC / DC ---
    pub zodio_lat_min: Degree,
    pub zodio_lat_max: Degree,
    pub zodio_lat_step: Degree,
    /// Samples with `|lat|` above this value are skipped.
    pub zodio_lat_abs_limit: Degree,

    // --- Zodio root finder ---
    pub scan_step: Degree,
    /// A scan sample with `|f|` below this is accepted as a root without bisection.
    pub direct_hit_tolerance: Degree,
    /// Bisection stops early once `|f(mid)|` is below this.
    pub bisection_tolerance: Degree,
    pub bisection_max_iter: usize,

    /// Lines with fewer points are reported as "no line".
    pub min_points: usize,
}

impl LineParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`LineParamsBuilder`] initialized with the default values.
    pub fn builder() -> LineParamsBuilder {
        LineParamsBuilder::new()
    }

    /// Latitudes sampled by MC/IC lines.
    pub fn mc_latitudes(&self) -> impl Iterator<Item = Degree> {
        latitude_grid(self.mc_lat_min, self.mc_lat_max, self.mc_lat_step)
    }

    /// Latitudes sampled by Mundo AC/DC lines for a body at declination `dec`.
    ///
    /// The grid is symmetric, bounded by `min(mundo_lat_cap, 90 − |dec|)`.
    pub fn mundo_latitudes(&self, dec: Degree) -> impl Iterator<Item = Degree> {
        let max_lat = self.mundo_lat_cap.min(90.0 - dec.abs());
        latitude_grid(-max_lat, max_lat, self.mundo_lat_step)
    }

    /// Latitudes sampled by Zodio AC/DC lines.
    pub fn zodio_latitudes(&self) -> impl Iterator<Item = Degree> {
        let limit = self.zodio_lat_abs_limit;
        latitude_grid(self.zodio_lat_min, self.zodio_lat_max, self.zodio_lat_step)
            .filter(move |lat| lat.abs() <= limit)
    }
}

/// Samples `min, min + step, …` up to and including `max` (with a small slack for rounding).
///
/// Empty when `min > max`. Computed by index so that no rounding accumulates.
pub fn latitude_grid(min: Degree, max: Degree, step: Degree) -> impl Iterator<Item = Degree> {
    let count = if step > 0.0 && min <= max {
        ((max - min) / step + 1e-9).floor() as usize + 1
    } else {
        0
    };
    (0..count).map(move |i| min + i as f64 * step)
}

impl Default for LineParams {
    fn default() -> Self {
        LineParams {
            mc_lat_min: MC_LAT_MIN,
            mc_lat_max: MC_LAT_MAX,
            mc_lat_step: MC_LAT_STEP,

            mundo_lat_step: MUNDO_LAT_STEP,
            mundo_lat_cap: MUNDO_LAT_CAP,

            zodio_lat_min: ZODIO_LAT_MIN,
            zodio_lat_max: ZODIO_LAT_MAX,
            zodio_lat_step: ZODIO_LAT_STEP,
            zodio_lat_abs_limit: ZODIO_LAT_ABS_LIMIT,

            scan_step: SCAN_STEP,
            direct_hit_tolerance: DIRECT_HIT_TOLERANCE,
            bisection_tolerance: BISECTION_TOLERANCE,
            bisection_max_iter: BISECTION_MAX_ITER,

            min_points: MIN_LINE_POINTS,
        }
    }
}

/// Wire form of [`LineParams`], validated before use.
#[derive(Deserialize)]
#[serde(default)]
struct UncheckedLineParams {
    mc_lat_min: Degree,
    mc_lat_max: Degree,
    mc_lat_step: Degree,
    mundo_lat_step: Degree,
    mundo_lat_cap: Degree,
    zodio_lat_min: Degree,
    zodio_lat_max: Degree,
    zodio_lat_step: Degree,
    zodio_lat_abs_limit: Degree,
    scan_step: Degree,
    direct_hit_tolerance: Degree,
    bisection_tolerance: Degree,
    bisection_max_iter: usize,
    min_points: usize,
}

impl Default for UncheckedLineParams {
    fn default() -> Self {
        let d = LineParams::default();
        UncheckedLineParams {
            mc_lat_min: d.mc_lat_min,
            mc_lat_max: d.mc_lat_max,
            mc_lat_step: d.mc_lat_step,
            mundo_lat_step: d.mundo_lat_step,
            mundo_lat_cap: d.mundo_lat_cap,
            zodio_lat_min: d.zodio_lat_min,
            zodio_lat_max: d.zodio_lat_max,
            zodio_lat_step: d.zodio_lat_step,
            zodio_lat_abs_limit: d.zodio_lat_abs_limit,
            scan_step: d.scan_step,
            direct_hit_tolerance: d.direct_hit_tolerance,
            bisection_tolerance: d.bisection_tolerance,
            bisection_max_iter: d.bisection_max_iter,
            min_points: d.min_points,
        }
    }
}

impl TryFrom<UncheckedLineParams> for LineParams {
    type Error = AcgError;

    fn try_from(raw: UncheckedLineParams) -> Result<Self, Self::Error> {
        LineParams::builder()
            .mc_lat_range(raw.mc_lat_min, raw.mc_lat_max)
            .mc_lat_step(raw.mc_lat_step)
            .mundo_lat_step(raw.mundo_lat_step)
            .mundo_lat_cap(raw.mundo_lat_cap)
            .zodio_lat_range(raw.zodio_lat_min, raw.zodio_lat_max)
            .zodio_lat_step(raw.zodio_lat_step)
            .zodio_lat_abs_limit(raw.zodio_lat_abs_limit)
            .scan_step(raw.scan_step)
            .direct_hit_tolerance(raw.direct_hit_tolerance)
            .bisection_tolerance(raw.bisection_tolerance)
            .bisection_max_iter(raw.bisection_max_iter)
            .min_points(raw.min_points)
            .build()
    }
}

/// Builder for [`LineParams`], with validation.
#[derive(Debug, Clone)]
pub struct LineParamsBuilder {
    params: LineParams,
}

impl Default for LineParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: LineParams::default(),
        }
    }

    pub fn mc_lat_range(mut self, min: Degree, max: Degree) -> Self {
        self.params.mc_lat_min = min;
        self.params.mc_lat_max = max;
        self
    }
    pub fn mc_lat_step(mut self, v: Degree) -> Self {
        self.params.mc_lat_step = v;
        self
    }
    pub fn mundo_lat_step(mut self, v: Degree) -> Self {
        self.params.mundo_lat_step = v;
        self
    }
    pub fn mundo_lat_cap(mut self, v: Degree) -> Self {
        self.params.mundo_lat_cap = v;
        self
    }
    pub fn zodio_lat_range(mut self, min: Degree, max: Degree) -> Self {
        self.params.zodio_lat_min = min;
        self.params.zodio_lat_max = max;
        self
    }
    pub fn zodio_lat_step(mut self, v: Degree) -> Self {
        self.params.zodio_lat_step = v;
        self
    }
    pub fn zodio_lat_abs_limit(mut self, v: Degree) -> Self {
        self.params.zodio_lat_abs_limit = v;
        self
    }
    pub fn scan_step(mut self, v: Degree) -> Self {
        self.params.scan_step = v;
        self
    }
    pub fn direct_hit_tolerance(mut self, v: Degree) -> Self {
        self.params.direct_hit_tolerance = v;
        self
    }
    pub fn bisection_tolerance(mut self, v: Degree) -> Self {
        self.params.bisection_tolerance = v;
        self
    }
    pub fn bisection_max_iter(mut self, v: usize) -> Self {
        self.params.bisection_max_iter = v;
        self
    }
    pub fn min_points(mut self, v: usize) -> Self {
        self.params.min_points = v;
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff a <= b and comparable (i.e., not NaN).
    #[inline]
    fn le(a: f64, b: f64) -> bool {
        matches!(a.partial_cmp(&b), Some(Less) | Some(Equal))
    }

    #[inline]
    fn is_latitude(x: f64) -> bool {
        Self::le(-90.0, x) && Self::le(x, 90.0)
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * every grid step and `scan_step` strictly positive, `scan_step ≤ 180`,
    /// * latitude bounds inside `[-90, 90]` with `min ≤ max`,
    /// * `mundo_lat_cap` and `zodio_lat_abs_limit` inside `[0, 90]`,
    /// * both tolerances strictly positive,
    /// * `bisection_max_iter ≥ 1` and `min_points ≥ 1`.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(LineParams)` when every rule holds,
    /// * `Err(AcgError::InvalidLineParameter)` naming the first violated rule.
    pub fn build(self) -> Result<LineParams, AcgError> {
        let p = &self.params;

        let steps = [
            ("mc_lat_step", p.mc_lat_step),
            ("mundo_lat_step", p.mundo_lat_step),
            ("zodio_lat_step", p.zodio_lat_step),
            ("scan_step", p.scan_step),
        ];
        if let Some((name, _)) = steps.iter().find(|(_, v)| !Self::gt0(*v)) {
            return Err(AcgError::InvalidLineParameter(format!(
                "{name} must be > 0"
            )));
        }
        if !Self::le(p.scan_step, 180.0) {
            return Err(AcgError::InvalidLineParameter(
                "scan_step must be <= 180".into(),
            ));
        }

        let ranges = [
            ("mc_lat", p.mc_lat_min, p.mc_lat_max),
            ("zodio_lat", p.zodio_lat_min, p.zodio_lat_max),
        ];
        for (name, min, max) in ranges {
            if !(Self::is_latitude(min) && Self::is_latitude(max) && Self::le(min, max)) {
                return Err(AcgError::InvalidLineParameter(format!(
                    "require -90 <= {name}_min <= {name}_max <= 90"
                )));
            }
        }
        if !(Self::le(0.0, p.mundo_lat_cap) && Self::le(p.mundo_lat_cap, 90.0)) {
            return Err(AcgError::InvalidLineParameter(
                "mundo_lat_cap must lie in [0, 90]".into(),
            ));
        }
        if !(Self::le(0.0, p.zodio_lat_abs_limit) && Self::le(p.zodio_lat_abs_limit, 90.0)) {
            return Err(AcgError::InvalidLineParameter(
                "zodio_lat_abs_limit must lie in [0, 90]".into(),
            ));
        }

        if !Self::gt0(p.direct_hit_tolerance) || !Self::gt0(p.bisection_tolerance) {
            return Err(AcgError::InvalidLineParameter(
                "tolerances must be > 0".into(),
            ));
        }
        if p.bisection_max_iter == 0 {
            return Err(AcgError::InvalidLineParameter(
                "bisection_max_iter must be >= 1".into(),
            ));
        }
        if p.min_points == 0 {
            return Err(AcgError::InvalidLineParameter(
                "min_points must be >= 1".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for LineParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 44;
            writeln!(f, "Line Parameters")?;
            writeln!(f, "---------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = " ".repeat(PARAM_COL.saturating_sub(s.len()).max(1));
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            writeln!(f, "[Latitude grids]")?;
            line!(
                "mc_lat     = {}",
                format!("[{}, {}] / {}", self.mc_lat_min, self.mc_lat_max, self.mc_lat_step),
                "MC/IC samples"
            )?;
            line!(
                "mundo_lat  = {}",
                format!("±{} / {}", self.mundo_lat_cap, self.mundo_lat_step),
                "Mundo AC/DC, also bounded by 90 - |dec|"
            )?;
            line!(
                "zodio_lat  = {}",
                format!(
                    "[{}, {}] / {}, |lat| <= {}",
                    self.zodio_lat_min, self.zodio_lat_max, self.zodio_lat_step, self.zodio_lat_abs_limit
                ),
                "Zodio AC/DC samples"
            )?;

            writeln!(f, "\n[Root finder]")?;
            line!("scan_step            = {}°", self.scan_step, "Longitude scan step")?;
            line!(
                "direct_hit_tolerance = {}°",
                self.direct_hit_tolerance,
                "Accept a scan sample as root"
            )?;
            line!(
                "bisection_tolerance  = {}°",
                self.bisection_tolerance,
                "Early exit of the bisection"
            )?;
            line!(
                "bisection_max_iter   = {}",
                self.bisection_max_iter,
                "Bisection iterations"
            )?;

            writeln!(f, "\n[Output]")?;
            line!("min_points = {}", self.min_points, "Shorter lines are dropped")?;
            Ok(())
        } else {
            write!(
                f,
                "LineParams(mc=[{},{}]/{}, mundo=±{}/{}, zodio=[{},{}]/{}, scan={}, hit<{}, bisect<{}x{}, min_points={})",
                self.mc_lat_min,
                self.mc_lat_max,
                self.mc_lat_step,
                self.mundo_lat_cap,
                self.mundo_lat_step,
                self.zodio_lat_min,
                self.zodio_lat_max,
                self.zodio_lat_step,
                self.scan_step,
                self.direct_hit_tolerance,
                self.bisection_tolerance,
                self.bisection_max_iter,
                self.min_points
            )
        }
    }
}
