//! Configuration schema definitions

use crate::error::Result;
use crate::validation::Validator;
use seaway_geo::{batch::DEFAULT_SEARCH_RADIUS_KM, BearingMode, Notation, DEDUP_TOLERANCE_KM};
use serde::{Deserialize, Serialize};

/// Log levels accepted in `[logging] level`
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub passage: PassageConfig,

    #[serde(default)]
    pub coordinates: CoordinatesConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check every section, collecting all problems into one error
    pub fn validate(&self) -> Result<()> {
        Validator::new()
            .positive("passage.spacing_km", self.passage.spacing_km)
            .range(
                "passage.dedup_tolerance_km",
                self.passage.dedup_tolerance_km,
                0.0,
                f64::MAX,
            )
            .custom("passage.dedup_tolerance_km", || {
                (self.passage.dedup_tolerance_km >= self.passage.spacing_km).then(|| {
                    format!(
                        "Must be below passage.spacing_km ({})",
                        self.passage.spacing_km
                    )
                })
            })
            .positive("search.radius_km", self.search.radius_km)
            .one_of("logging.level", &self.logging.level, LOG_LEVELS)
            .validate()
            .to_result()
    }
}

/// Passage refinement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageConfig {
    /// Maximum distance between consecutive output points, in kilometers
    #[serde(default = "default_spacing_km")]
    pub spacing_km: f64,

    #[serde(default)]
    pub bearing_mode: BearingMode,

    /// Distance below which consecutive points count as duplicates
    #[serde(default = "default_dedup_tolerance_km")]
    pub dedup_tolerance_km: f64,
}

impl Default for PassageConfig {
    fn default() -> Self {
        Self {
            spacing_km: default_spacing_km(),
            bearing_mode: BearingMode::default(),
            dedup_tolerance_km: default_dedup_tolerance_km(),
        }
    }
}

fn default_spacing_km() -> f64 {
    10.0
}

fn default_dedup_tolerance_km() -> f64 {
    DEDUP_TOLERANCE_KM
}

/// Coordinate normalization configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoordinatesConfig {
    #[serde(default)]
    pub notation: Notation,

    /// Abort a batch on the first bad token instead of skipping it
    #[serde(default)]
    pub strict: bool,
}

/// Proximity search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_km: default_radius_km(),
        }
    }
}

fn default_radius_km() -> f64 {
    DEFAULT_SEARCH_RADIUS_KM
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_defaults_are_valid() {
        let schema = ConfigSchema::default();
        assert_eq!(schema.passage.spacing_km, 10.0);
        assert_eq!(schema.passage.bearing_mode, BearingMode::Fixed);
        assert_eq!(schema.coordinates.notation, Notation::Ddm);
        assert!(!schema.coordinates.strict);
        assert_eq!(schema.search.radius_km, 10.0);
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [passage]
            spacing_km = 2.5
            bearing_mode = "tracking"

            [coordinates]
            notation = "ddm-hundredths"
            "#,
        )
        .unwrap();

        assert_eq!(schema.passage.spacing_km, 2.5);
        assert_eq!(schema.passage.bearing_mode, BearingMode::Tracking);
        assert_eq!(schema.passage.dedup_tolerance_km, DEDUP_TOLERANCE_KM);
        assert_eq!(schema.coordinates.notation, Notation::DdmHundredths);
        assert_eq!(schema.logging.level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut schema = ConfigSchema::default();
        schema.passage.spacing_km = 0.0;
        schema.passage.dedup_tolerance_km = -1.0;
        schema.search.radius_km = -5.0;
        schema.logging.level = "chatty".to_string();

        let err = schema.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
        for field in [
            "passage.spacing_km",
            "passage.dedup_tolerance_km",
            "search.radius_km",
            "logging.level",
        ] {
            assert!(err.message.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_validate_rejects_tolerance_at_or_above_spacing() {
        let mut schema = ConfigSchema::default();
        for tolerance in [10.0, 100.0] {
            schema.passage.dedup_tolerance_km = tolerance;
            let err = schema.validate().unwrap_err();
            assert_eq!(err.code, ErrorCode::ConfigValidationError);
            assert!(err.message.contains("Must be below passage.spacing_km"));
        }

        schema.passage.dedup_tolerance_km = 9.5;
        assert!(schema.validate().is_ok());
    }
}
