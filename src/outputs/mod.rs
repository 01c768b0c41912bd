//! Presenters for the filtered digest.
//!
//! # Submodules
//!
//! - [`report`]: Human-readable text report (the default)
//! - [`json`]: Pretty-printed JSON for other tools

pub mod json;
pub mod report;
