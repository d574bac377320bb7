//! Core utilities for the seaway tools
//!
//! This crate provides shared functionality used by the seaway binaries:
//!
//! - **Error handling**: Coded errors with context, hints and exit codes
//! - **Configuration**: TOML-based configuration with validation
//! - **Validation**: A fluent validator collecting every problem in one pass
//!
//! # Example
//!
//! ```rust,no_run
//! use seaway_core::config::Config;
//!
//! let config = Config::load(None).expect("Invalid configuration");
//! let refiner = config.refiner().expect("Invalid passage settings");
//! let normalizer = config.normalizer();
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{ValidationResult, Validator};
}
