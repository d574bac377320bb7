//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result, ResultExt};
use seaway_geo::{CoordinateNormalizer, PassageRefiner};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist. Without one, the standard locations are
    /// searched and defaults are used when none is found.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                let expanded = PathBuf::from(shellexpand::tilde(p).as_ref());
                if !expanded.exists() {
                    return Err(Error::config_not_found(&expanded));
                }
                Some(expanded)
            }
            None => find_config_file(),
        };

        let schema = match &config_path {
            Some(p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };
        schema.validate()?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Build a passage refiner from `[passage]`
    pub fn refiner(&self) -> Result<PassageRefiner> {
        let passage = &self.schema.passage;
        let refiner = PassageRefiner::new(passage.spacing_km)?
            .with_bearing_mode(passage.bearing_mode)
            .with_dedup_tolerance(passage.dedup_tolerance_km)?;
        Ok(refiner)
    }

    /// Build a coordinate normalizer from `[coordinates]`
    pub fn normalizer(&self) -> CoordinateNormalizer {
        CoordinateNormalizer::new(self.schema.coordinates.notation)
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let local = [".seaway.toml", "seaway.toml"].into_iter().map(PathBuf::from);
    let user = dirs::config_dir().map(|dir| dir.join("seaway").join("config.toml"));

    local.chain(user).find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .context(format!("Reading config file {}", path.display()))?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}: {}", path.display(), e),
        )
        .with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use seaway_geo::{BearingMode, GeoPoint, Notation};
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.passage.spacing_km, 10.0);
    }

    #[test]
    fn test_config_load_explicit_file() {
        let file = write_config(
            r#"
            [passage]
            spacing_km = 1.0
            bearing_mode = "tracking"

            [coordinates]
            notation = "dms"
            strict = true
            "#,
        );

        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.path.as_deref(), Some(file.path()));
        assert!(config.schema.coordinates.strict);

        let refiner = config.refiner().unwrap();
        assert_eq!(refiner.spacing_km(), 1.0);
        assert_eq!(refiner.bearing_mode(), BearingMode::Tracking);
        assert_eq!(config.normalizer().notation(), Notation::Dms);
    }

    #[test]
    fn test_config_load_missing_explicit_file() {
        let err = Config::load(Some("/nonexistent/seaway.toml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_config_load_malformed_file() {
        let file = write_config("[passage\nspacing_km = ");
        let err = Config::load(file.path().to_str()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_config_load_invalid_values() {
        let file = write_config("[passage]\nspacing_km = -3.0\n");
        let err = Config::load(file.path().to_str()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
    }

    #[test]
    fn test_config_load_rejects_tolerance_above_spacing() {
        let file = write_config("[passage]\nspacing_km = 10.0\ndedup_tolerance_km = 100.0\n");
        let err = Config::load(file.path().to_str()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
        assert!(err.message.contains("passage.dedup_tolerance_km"));
    }

    #[test]
    fn test_refiner_rejects_tolerance_set_after_load() {
        let mut config = Config::default();
        config.schema.passage.spacing_km = 0.5;
        config.schema.passage.dedup_tolerance_km = 1.0;
        let err = config.refiner().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.is_validation());
    }

    #[test]
    fn test_refiner_applies_tolerance() {
        let file = write_config("[passage]\nspacing_km = 50.0\ndedup_tolerance_km = 40.0\n");
        let config = Config::load(file.path().to_str()).unwrap();
        let refiner = config.refiner().unwrap();
        assert_eq!(refiner.dedup_tolerance_km(), 40.0);

        let (a, b) = (GeoPoint::new(44.3367, -68.7425), GeoPoint::new(44.3333, -68.3117));
        assert_eq!(refiner.refine(&[a, b]).last(), Some(&b));
    }
}
