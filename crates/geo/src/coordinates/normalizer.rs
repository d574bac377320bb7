//! Strict and lenient coordinate normalization.

use super::grammar::parse_field;
use super::{CoordinateToken, NormalizationOutcome, Notation, ParsedCoordinate};
use crate::{Axis, GeoError, GeoPoint, Result};
use serde::{Serialize, Serializer};

/// Converts coordinate strings of one notation into decimal degrees.
///
/// Strict methods surface the first failure to the caller. Lenient methods
/// log and drop failing candidates so one bad coordinate never aborts the
/// rest of a batch.
///
/// # Example
/// ```
/// use seaway_geo::{CoordinateNormalizer, CoordinateToken, Notation};
///
/// let normalizer = CoordinateNormalizer::new(Notation::DdmHundredths);
/// let batch = normalizer.normalize_lenient(&[
///     CoordinateToken::named("Egg Rock", "441782N 0681870W"),
///     CoordinateToken::named("Garbled", "44 17 N"),
/// ]);
///
/// assert_eq!(batch.successes.len(), 1);
/// assert_eq!(batch.failures.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinateNormalizer {
    notation: Notation,
}

impl CoordinateNormalizer {
    pub fn new(notation: Notation) -> Self {
        Self { notation }
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    /// Parses and validates one coordinate string.
    pub fn parse(&self, raw: &str) -> NormalizationOutcome {
        let normalized = raw.trim().to_ascii_uppercase();
        let fields: Vec<&str> = normalized.split_whitespace().collect();

        let [lat_token, lon_token] = fields.as_slice() else {
            return Err(GeoError::format(
                raw,
                self.notation,
                format!("Expected 2 parts, got {}", fields.len()),
            ));
        };

        let latitude = self.parse_axis(raw, lat_token, Axis::Latitude)?;
        let longitude = self.parse_axis(raw, lon_token, Axis::Longitude)?;

        Ok(ParsedCoordinate {
            point: GeoPoint::new(latitude, longitude),
            notation: self.notation,
        })
    }

    fn parse_axis(&self, raw: &str, token: &str, axis: Axis) -> Result<f64> {
        let value = parse_field(token, axis, self.notation)
            .map_err(|err| GeoError::format(raw, self.notation, err.to_string()))?;
        axis.check(value, raw)
    }

    /// Parses a token, attaching its feature name to any error.
    pub fn parse_token(&self, token: &CoordinateToken) -> NormalizationOutcome {
        self.parse(&token.raw).map_err(|err| match &token.feature {
            Some(name) => err.with_feature(name.clone()),
            None => err,
        })
    }

    /// Normalizes every token, failing on the first bad one.
    pub fn normalize_strict(&self, tokens: &[CoordinateToken]) -> Result<Vec<ParsedCoordinate>> {
        tokens.iter().map(|token| self.parse_token(token)).collect()
    }

    /// Normalizes every token, recording and skipping the bad ones.
    pub fn normalize_lenient(&self, tokens: &[CoordinateToken]) -> LenientBatch {
        let mut batch = LenientBatch::default();

        for token in tokens {
            match self.parse_token(token) {
                Ok(coordinate) => batch.successes.push(NamedCoordinate {
                    name: token.feature.clone(),
                    coordinate,
                }),
                Err(error) => {
                    tracing::warn!(
                        feature = token.feature.as_deref().unwrap_or("N/A"),
                        raw = %token.raw,
                        notation = %self.notation,
                        %error,
                        "Skipping bad coordinate"
                    );
                    batch.failures.push(NormalizationFailure {
                        token: token.clone(),
                        error,
                    });
                }
            }
        }

        tracing::debug!(
            accepted = batch.successes.len(),
            rejected = batch.failures.len(),
            "Normalized coordinate batch"
        );

        batch
    }
}

/// A successfully normalized candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedCoordinate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub coordinate: ParsedCoordinate,
}

impl NamedCoordinate {
    pub fn point(&self) -> GeoPoint {
        self.coordinate.point
    }
}

/// A candidate that was dropped, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizationFailure {
    #[serde(flatten)]
    pub token: CoordinateToken,
    #[serde(rename = "reason", serialize_with = "serialize_display")]
    pub error: GeoError,
}

fn serialize_display<S: Serializer>(error: &GeoError, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Result of lenient normalization: everything that parsed, plus what did
/// not and why.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LenientBatch {
    pub successes: Vec<NamedCoordinate>,
    pub failures: Vec<NormalizationFailure>,
}

impl LenientBatch {
    /// True when no candidate was dropped.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.successes.iter().map(NamedCoordinate::point)
    }
}
