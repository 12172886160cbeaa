//! # astrocarto
//!
//! Astrocartography line engine: for a birth instant and place, find the
//! geographic curves along which each body rises (AC), sets (DC), culminates (MC)
//! or anti-culminates (IC), in either the Mundo (horizon/meridian) or the Zodio
//! (zodiacal angle) convention.
//!
//! Start with [`astrocartography::compute_line`] or
//! [`astrocartography::compute_chart_lines`]; plug an external ephemeris through
//! [`ephemeris::EphemerisSource`].

pub mod acg_errors;
pub mod angles;
pub mod aspect_lines;
pub mod astrocartography;
pub mod bodies;
pub mod constants;
pub mod ephemeris;
pub mod line_params;
pub mod mundo;
pub mod part_of_fortune;
pub mod ref_system;
pub mod time;
pub mod zodiac;
pub mod zodio;
