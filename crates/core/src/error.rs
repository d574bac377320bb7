//! Error type shared by the seaway tools
//!
//! Every failure carries an [`ErrorCode`], optional context and an optional
//! hint for the user. Geometry and parsing failures from `seaway-geo` map onto
//! the validation codes, and the code category decides the process exit code.

use seaway_geo::{GeoError, GeoErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Stable codes, grouped by the thousands digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // 1xxx
    Unknown = 1000,
    Internal = 1001,

    // 2xxx: reading input
    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,

    // 3xxx: configuration files
    ConfigError = 3000,
    ConfigNotFound = 3001,
    ConfigParseError = 3002,
    ConfigValidationError = 3003,
    InvalidConfigValue = 3004,

    // 6xxx: bad arguments or data
    ValidationError = 6000,
    InvalidInput = 6001,
    InvalidFormat = 6002,
    ConstraintViolation = 6003,
}

impl ErrorCode {
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Category name derived from the thousands digit
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            6 => "Validation",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<GeoErrorCode> for ErrorCode {
    fn from(code: GeoErrorCode) -> Self {
        match code {
            GeoErrorCode::InvalidArgument => ErrorCode::InvalidInput,
            GeoErrorCode::Format => ErrorCode::InvalidFormat,
            GeoErrorCode::Range => ErrorCode::ConstraintViolation,
        }
    }
}

/// A coded error with optional context, hint and cause
#[derive(Error, Debug)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    /// Where the failure happened, e.g. the file or feature being read
    pub context: Option<String>,
    /// What the user can do about it
    pub suggestion: Option<String>,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(context) = &self.context {
            write!(f, "\n  Context: {context}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {suggestion}")?;
        }
        Ok(())
    }
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// True for errors caused by bad input data
    pub fn is_validation(&self) -> bool {
        self.code.category() == "Validation"
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.code.category() {
            "Validation" => exit_codes::VALIDATION_ERROR,
            "Configuration" => exit_codes::CONFIG_ERROR,
            _ => exit_codes::FAILURE,
        }
    }

    pub fn file_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::FileNotFound,
            format!("File not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Check the path, or pass \"-\" to read from stdin")
    }

    pub fn config_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a .seaway.toml file or use --config to specify a path")
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Non-zero process exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
    pub const VALIDATION_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::InvalidFormat, format!("JSON parse error: {err}")).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {err}"))
            .with_source(err)
    }
}

impl From<GeoError> for Error {
    fn from(err: GeoError) -> Self {
        let mut error = Error::new(err.code().into(), err.to_string());
        if let Some(feature) = err.feature() {
            error = error.with_context(format!("Feature: {feature}"));
        }
        error.with_source(err)
    }
}

/// Attach context to any error convertible into [`Error`]
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seaway_geo::{parse_coordinate, refine_passage, Notation};

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::FileNotFound.to_string(), "E2001");
        assert_eq!(ErrorCode::ConfigValidationError.to_string(), "E3003");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::IoError.category(), "IO");
        assert_eq!(ErrorCode::ConfigParseError.category(), "Configuration");
        assert_eq!(ErrorCode::InvalidFormat.category(), "Validation");
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::file_not_found("/path/to/passage.json")
            .with_context("While reading waypoints");

        assert_eq!(err.code, ErrorCode::FileNotFound);
        assert!(err.context.is_some());
        assert!(err.suggestion.is_some());
        assert!(!err.is_validation());
        assert_eq!(err.exit_code(), exit_codes::FAILURE);
    }

    #[test]
    fn test_geo_errors_map_to_validation_codes() {
        let err: Error = refine_passage(&[], 0.0).unwrap_err().into();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.is_validation());
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_ERROR);

        let geo = parse_coordinate("950000N 0681800W", Notation::Dms).unwrap_err();
        let err: Error = geo.with_feature("Phantom Shoal").into();
        assert_eq!(err.code, ErrorCode::ConstraintViolation);
        assert_eq!(err.context.as_deref(), Some("Feature: Phantom Shoal"));
    }

    #[test]
    fn test_config_errors_exit_with_config_code() {
        let err = Error::config_not_found("/etc/seaway.toml");
        assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);
        assert!(err.to_string().starts_with("[E3001] Configuration file not found"));
    }

    #[test]
    fn test_result_ext_context_converts_source_errors() {
        let parsed: std::result::Result<Vec<f64>, _> = serde_json::from_str("[1.0,");
        let err = parsed.context("Reading stdin").unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert_eq!(err.context.as_deref(), Some("Reading stdin"));
        assert!(err.to_string().contains("\n  Context: Reading stdin"));
    }
}
