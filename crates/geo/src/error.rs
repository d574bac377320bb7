//! Error types for the geo crate.

use crate::{Axis, Notation};
use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// A caller-supplied parameter violates a precondition
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A coordinate string does not match the expected grammar
    #[error("Bad {} coordinate '{raw}'{}: {reason}", notation_label(.notation), feature_suffix(.feature))]
    Format {
        raw: String,
        notation: Option<Notation>,
        feature: Option<String>,
        reason: String,
    },

    /// A coordinate parsed but lies outside the geographic range
    #[error("{axis} out of range: {value:.8} from '{raw}'{}", feature_suffix(.feature))]
    Range {
        axis: Axis,
        value: f64,
        raw: String,
        feature: Option<String>,
    },
}

fn notation_label(notation: &Option<Notation>) -> String {
    notation.map_or_else(|| "coordinate".to_string(), |n| n.to_string())
}

fn feature_suffix(feature: &Option<String>) -> String {
    feature
        .as_deref()
        .map(|name| format!(" in feature '{name}'"))
        .unwrap_or_default()
}

impl GeoError {
    pub(crate) fn format(raw: &str, notation: Notation, reason: impl Into<String>) -> Self {
        GeoError::Format {
            raw: raw.to_string(),
            notation: Some(notation),
            feature: None,
            reason: reason.into(),
        }
    }

    /// Attaches the originating feature name to format and range errors.
    pub fn with_feature(self, name: impl Into<String>) -> Self {
        match self {
            GeoError::Format { raw, notation, reason, .. } => GeoError::Format {
                raw,
                notation,
                feature: Some(name.into()),
                reason,
            },
            GeoError::Range { axis, value, raw, .. } => GeoError::Range {
                axis,
                value,
                raw,
                feature: Some(name.into()),
            },
            other => other,
        }
    }

    /// The raw coordinate string this error was raised for, if any.
    pub fn raw(&self) -> Option<&str> {
        match self {
            GeoError::Format { raw, .. } | GeoError::Range { raw, .. } => Some(raw),
            GeoError::InvalidArgument(_) => None,
        }
    }

    /// The feature name attached to this error, if any.
    pub fn feature(&self) -> Option<&str> {
        match self {
            GeoError::Format { feature, .. } | GeoError::Range { feature, .. } => feature.as_deref(),
            GeoError::InvalidArgument(_) => None,
        }
    }
}

/// Error code for integration with seaway-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid argument
    InvalidArgument = 10001,
    /// Coordinate format error
    Format = 10002,
    /// Coordinate range error
    Range = 10003,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidArgument(_) => GeoErrorCode::InvalidArgument,
            GeoError::Format { .. } => GeoErrorCode::Format,
            GeoError::Range { .. } => GeoErrorCode::Range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_includes_feature() {
        let err = GeoError::format("12X", Notation::Dms, "expected 2 fields, got 1")
            .with_feature("Bass Harbor Head");
        let message = err.to_string();
        assert!(message.contains("DMS"));
        assert!(message.contains("'12X'"));
        assert!(message.contains("Bass Harbor Head"));
        assert_eq!(err.feature(), Some("Bass Harbor Head"));
    }

    #[test]
    fn test_range_message() {
        let err = GeoError::Range {
            axis: Axis::Latitude,
            value: 95.0,
            raw: "950000N 0681800W".into(),
            feature: None,
        };
        assert_eq!(
            err.to_string(),
            "Latitude out of range: 95.00000000 from '950000N 0681800W'"
        );
        assert_eq!(err.raw(), Some("950000N 0681800W"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(GeoError::InvalidArgument("x".into()).code() as u32, 10001);
        assert_eq!(
            GeoError::format("x", Notation::Ddm, "bad").code(),
            GeoErrorCode::Format
        );
    }

    #[test]
    fn test_with_feature_leaves_invalid_argument_untouched() {
        let err = GeoError::InvalidArgument("spacing".into()).with_feature("ignored");
        assert_eq!(err.feature(), None);
    }
}
