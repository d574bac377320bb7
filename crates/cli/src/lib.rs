//! CLI utilities for the seaway tools
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - Progress indicators
//! - Status messages

pub mod output;
pub mod progress;

pub use output::{format_bearing, format_count, format_distance_km, format_point, Status};
