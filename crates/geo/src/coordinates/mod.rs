//! Normalization of nautical coordinate notations.
//!
//! Sailing directions encode positions in several fixed-width sexagesimal
//! notations. Every notation takes two whitespace-separated fields, a
//! latitude token followed by a longitude token, each ending in a hemisphere
//! letter (matched case-insensitively):
//!
//! | Notation | Latitude | Longitude |
//! |---|---|---|
//! | [`Notation::Dms`] | `DDMMSS[NS]` | `DDDMMSS[EW]` |
//! | [`Notation::DdmHundredths`] | `DDMMmm[NS]` | `DDDMMmm[EW]` |
//! | [`Notation::Ddm`] | `DD` + minutes + `[NS]` | `DDD`/`DD` + minutes + `[EW]` |
//!
//! For the two fixed-width notations the longitude degree width is decided by
//! token length: a six-digit longitude is read as two-digit degrees and left
//! padded with a zero. For [`Notation::Ddm`] the minute field is either
//! `MM.m*` or two or more undotted digits, where the first two digits are
//! whole minutes and the rest the decimal fraction. Two-digit longitude
//! degrees are only accepted with a dotted minute field; undotted longitudes
//! always carry three degree digits.

mod grammar;
mod normalizer;

pub use normalizer::{
    CoordinateNormalizer, LenientBatch, NamedCoordinate, NormalizationFailure,
};

use crate::{Axis, GeoError, GeoPoint, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The sexagesimal notation a coordinate string is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Notation {
    /// Degrees, minutes and integer seconds
    #[serde(rename = "dms")]
    Dms,
    /// Degrees and decimal minutes, with or without a decimal point
    #[default]
    #[serde(rename = "ddm")]
    Ddm,
    /// Degrees and minutes written as hundredths, without a decimal point
    #[serde(rename = "ddm-hundredths")]
    DdmHundredths,
}

impl Notation {
    pub const ALL: [Notation; 3] = [Notation::Dms, Notation::Ddm, Notation::DdmHundredths];

    /// Token shape expected for the given axis, used in error messages.
    pub fn shape(self, axis: Axis) -> &'static str {
        match (self, axis) {
            (Notation::Dms, Axis::Latitude) => "DDMMSS[NS]",
            (Notation::Dms, Axis::Longitude) => "DDDMMSS[EW]",
            (Notation::DdmHundredths, Axis::Latitude) => "DDMMmm[NS]",
            (Notation::DdmHundredths, Axis::Longitude) => "DDDMMmm[EW]",
            (Notation::Ddm, Axis::Latitude) => "DDMM[.m][NS]",
            (Notation::Ddm, Axis::Longitude) => "DDDMM[.m][EW] or DDMM.m[EW]",
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Notation::Dms => "DMS",
            Notation::Ddm => "DDM",
            Notation::DdmHundredths => "DDM-hundredths",
        })
    }
}

impl std::str::FromStr for Notation {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dms" => Ok(Notation::Dms),
            "ddm" => Ok(Notation::Ddm),
            "ddm-hundredths" | "ddm_hundredths" => Ok(Notation::DdmHundredths),
            other => Err(GeoError::InvalidArgument(format!(
                "unknown notation '{other}', expected one of: dms, ddm, ddm-hundredths"
            ))),
        }
    }
}

/// Hemisphere letter terminating a coordinate token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Hemisphere::North | Hemisphere::South => Axis::Latitude,
            Hemisphere::East | Hemisphere::West => Axis::Longitude,
        }
    }

    /// Sign applied to the magnitude: negative south of the equator and west
    /// of the prime meridian.
    pub fn sign(self) -> f64 {
        match self {
            Hemisphere::North | Hemisphere::East => 1.0,
            Hemisphere::South | Hemisphere::West => -1.0,
        }
    }
}

/// A raw coordinate string handed over by an external extractor.
///
/// Deserializes from the extractor's `{"name": .., "coords": ..}` items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateToken {
    #[serde(rename = "coords", alias = "raw")]
    pub raw: String,
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
}

impl CoordinateToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into(), feature: None }
    }

    pub fn named(feature: impl Into<String>, raw: impl Into<String>) -> Self {
        Self { raw: raw.into(), feature: Some(feature.into()) }
    }
}

/// A validated coordinate together with the notation it was read as.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParsedCoordinate {
    #[serde(rename = "location")]
    pub point: GeoPoint,
    pub notation: Notation,
}

/// Either a validated coordinate or the reason it was rejected.
pub type NormalizationOutcome = Result<ParsedCoordinate>;

/// Parses a single coordinate string in strict mode.
///
/// # Example
/// ```
/// use seaway_geo::{parse_coordinate, Notation};
///
/// let parsed = parse_coordinate("442050N 0681800W", Notation::Dms).unwrap();
/// assert!((parsed.point.latitude - 44.347222).abs() < 1e-6);
/// assert!((parsed.point.longitude + 68.3).abs() < 1e-9);
/// ```
pub fn parse_coordinate(raw: &str, notation: Notation) -> NormalizationOutcome {
    CoordinateNormalizer::new(notation).parse(raw)
}
