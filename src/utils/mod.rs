//! Utility modules shared across the resolution layer
//!
//! - Vernacular: absence predicate and per-language display policies
//! - Normalization: path segments for the image tree

pub mod normalization;
pub mod vernacular;

pub use normalization::{path_segment, path_segment_full};
pub use vernacular::{grid_value, is_absent, project, usable};
