//! Token grammars for the supported notations.
//!
//! Tokens reaching this module are already upper-cased and trimmed.
//!
//! Minutes and seconds must be below 60. Overflowing fields are not rolled
//! into the next degree: `449999N` in DDM-hundredths is a format error, not
//! 45.67°.

use super::{Hemisphere, Notation};
use crate::Axis;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

// DMS and DDM-hundredths share a shape and differ only in how the last two
// digits are read.
static FIXED_LATITUDE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})(\d{2})(\d{2})([A-Z])$").expect("valid latitude pattern"));
static FIXED_LONGITUDE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{3})(\d{2})(\d{2})([A-Z])$").expect("valid longitude pattern"));

static DDM_LATITUDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2})(\d{2}\.\d*|\d{2,})([A-Z])$").expect("valid DDM latitude pattern")
});
static DDM_LONGITUDE_DOTTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,3})(\d{2}\.\d*)([A-Z])$").expect("valid DDM longitude pattern")
});
static DDM_LONGITUDE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{3})(\d{2,})([A-Z])$").expect("valid DDM longitude pattern"));

/// Why a single latitude or longitude token was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub(crate) enum FieldError {
    #[error("{axis} part '{token}' does not match expected {shape} format")]
    Shape {
        axis: Axis,
        token: String,
        shape: &'static str,
    },

    #[error("{axis} part '{token}' has invalid hemisphere '{letter}'")]
    Hemisphere { axis: Axis, token: String, letter: char },

    #[error("{axis} part '{token}' has {unit} {value} (must be below 60)")]
    Sexagesimal {
        axis: Axis,
        token: String,
        unit: &'static str,
        value: f64,
    },
}

/// A degrees/minutes/seconds reading before conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Sexagesimal {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub hemisphere: Hemisphere,
}

impl Sexagesimal {
    pub fn to_decimal(self) -> f64 {
        self.hemisphere.sign() * (self.degrees + self.minutes / 60.0 + self.seconds / 3600.0)
    }
}

/// Parses one token of `notation` on `axis` into signed decimal degrees.
///
/// Checks, in order: token shape, hemisphere letter, and that minutes and
/// seconds are proper sexagesimal values. Geographic range is left to the
/// caller.
pub(crate) fn parse_field(token: &str, axis: Axis, notation: Notation) -> Result<f64, FieldError> {
    let reading = match notation {
        Notation::Dms => read_fixed(token, axis, notation, |whole, last| (whole, last)),
        Notation::DdmHundredths => {
            read_fixed(token, axis, notation, |whole, last| (whole + last / 100.0, 0.0))
        }
        Notation::Ddm => read_ddm(token, axis),
    }?;

    Ok(reading.to_decimal())
}

fn read_fixed(
    token: &str,
    axis: Axis,
    notation: Notation,
    split: impl Fn(f64, f64) -> (f64, f64),
) -> Result<Sexagesimal, FieldError> {
    let padded;
    let (pattern, token) = match axis {
        Axis::Latitude => (&*FIXED_LATITUDE, token),
        Axis::Longitude if token.len() == 7 => {
            padded = format!("0{token}");
            (&*FIXED_LONGITUDE, padded.as_str())
        }
        Axis::Longitude => (&*FIXED_LONGITUDE, token),
    };

    let caps = pattern.captures(token).ok_or_else(|| FieldError::Shape {
        axis,
        token: token.to_string(),
        shape: notation.shape(axis),
    })?;

    let hemisphere = hemisphere(&caps, 4, axis, token)?;
    let (minutes, seconds) = split(number(&caps, 2), number(&caps, 3));

    sexagesimal(token, axis, number(&caps, 1), minutes, seconds, hemisphere)
}

fn read_ddm(token: &str, axis: Axis) -> Result<Sexagesimal, FieldError> {
    let caps = match axis {
        Axis::Latitude => DDM_LATITUDE.captures(token),
        Axis::Longitude => DDM_LONGITUDE_DOTTED
            .captures(token)
            .or_else(|| DDM_LONGITUDE.captures(token)),
    }
    .ok_or_else(|| FieldError::Shape {
        axis,
        token: token.to_string(),
        shape: Notation::Ddm.shape(axis),
    })?;

    let hemisphere = hemisphere(&caps, 3, axis, token)?;
    let minutes = decimal_minutes(&caps[2]);

    sexagesimal(token, axis, number(&caps, 1), minutes, 0.0, hemisphere)
}

/// Reads a DDM minute field. Undotted fields longer than two digits carry
/// the decimal fraction after the first two digits.
fn decimal_minutes(field: &str) -> f64 {
    let (whole, fraction) = match field.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => field.split_at(2),
    };

    let fraction = fraction
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .fold(0.0, |acc, digit| (acc + f64::from(digit)) / 10.0);

    digits(whole) + fraction
}

fn hemisphere(caps: &Captures<'_>, group: usize, axis: Axis, token: &str) -> Result<Hemisphere, FieldError> {
    let letter = caps[group].chars().next().unwrap_or_default();
    Hemisphere::from_letter(letter)
        .filter(|h| h.axis() == axis)
        .ok_or_else(|| FieldError::Hemisphere {
            axis,
            token: token.to_string(),
            letter,
        })
}

fn sexagesimal(
    token: &str,
    axis: Axis,
    degrees: f64,
    minutes: f64,
    seconds: f64,
    hemisphere: Hemisphere,
) -> Result<Sexagesimal, FieldError> {
    for (unit, value) in [("minutes", minutes), ("seconds", seconds)] {
        if value >= 60.0 {
            return Err(FieldError::Sexagesimal {
                axis,
                token: token.to_string(),
                unit,
                value,
            });
        }
    }

    Ok(Sexagesimal { degrees, minutes, seconds, hemisphere })
}

#[inline]
fn number(caps: &Captures<'_>, group: usize) -> f64 {
    digits(&caps[group])
}

// Patterns only capture ASCII digits here, so this never sees anything else.
fn digits(field: &str) -> f64 {
    field
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0.0, |acc, digit| acc * 10.0 + f64::from(digit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lat(token: &str, notation: Notation) -> Result<f64, FieldError> {
        parse_field(token, Axis::Latitude, notation)
    }

    fn lon(token: &str, notation: Notation) -> Result<f64, FieldError> {
        parse_field(token, Axis::Longitude, notation)
    }

    #[test]
    fn test_dms_fields() {
        assert!((lat("442050N", Notation::Dms).unwrap() - (44.0 + 20.0 / 60.0 + 50.0 / 3600.0)).abs() < 1e-12);
        assert!((lon("0681800W", Notation::Dms).unwrap() + 68.3).abs() < 1e-12);
    }

    #[test]
    fn test_dms_short_longitude_is_padded() {
        assert_eq!(lon("681800W", Notation::Dms), lon("0681800W", Notation::Dms));
    }

    #[test]
    fn test_hundredths_fields() {
        assert!((lat("441782N", Notation::DdmHundredths).unwrap() - 44.297).abs() < 1e-12);
        assert!((lon("0681870W", Notation::DdmHundredths).unwrap() + (68.0 + 18.70 / 60.0)).abs() < 1e-12);
        assert!((lon("681870W", Notation::DdmHundredths).unwrap() + (68.0 + 18.70 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn test_hundredths_three_digit_longitude() {
        let value = lon("1234567E", Notation::DdmHundredths).unwrap();
        assert!((value - (123.0 + 45.67 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn test_ddm_dotted_and_undotted_minutes() {
        let expected = 44.0 + 17.82 / 60.0;
        assert!((lat("4417.82N", Notation::Ddm).unwrap() - expected).abs() < 1e-12);
        assert!((lat("441782N", Notation::Ddm).unwrap() - expected).abs() < 1e-12);
        assert!((lat("4417N", Notation::Ddm).unwrap() - (44.0 + 17.0 / 60.0)).abs() < 1e-12);
        assert!((lat("4417.N", Notation::Ddm).unwrap() - (44.0 + 17.0 / 60.0)).abs() < 1e-12);
        assert!((lat("4417825S", Notation::Ddm).unwrap() + (44.0 + 17.825 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn test_ddm_longitude_degree_width() {
        let expected = -(68.0 + 18.7 / 60.0);
        assert!((lon("06818.70W", Notation::Ddm).unwrap() - expected).abs() < 1e-12);
        assert!((lon("6818.70W", Notation::Ddm).unwrap() - expected).abs() < 1e-12);
        assert!((lon("0681870W", Notation::Ddm).unwrap() - expected).abs() < 1e-12);
        assert!((lon("12305.5E", Notation::Ddm).unwrap() - (123.0 + 5.5 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn test_shape_errors() {
        assert!(matches!(lat("4417N", Notation::Dms), Err(FieldError::Shape { .. })));
        assert!(matches!(lat("44.17N", Notation::Ddm), Err(FieldError::Shape { .. })));
        assert!(matches!(lon("68187W", Notation::DdmHundredths), Err(FieldError::Shape { .. })));
        assert!(matches!(lat("441782", Notation::DdmHundredths), Err(FieldError::Shape { .. })));
    }

    #[test]
    fn test_hemisphere_must_match_axis() {
        let err = lat("442050E", Notation::Dms).unwrap_err();
        assert_eq!(
            err,
            FieldError::Hemisphere { axis: Axis::Latitude, token: "442050E".into(), letter: 'E' }
        );
        assert!(matches!(lon("0681800X", Notation::Dms), Err(FieldError::Hemisphere { letter: 'X', .. })));
    }

    #[test]
    fn test_sexagesimal_bounds() {
        assert!(matches!(
            lat("446050N", Notation::Dms),
            Err(FieldError::Sexagesimal { unit: "minutes", .. })
        ));
        assert!(matches!(
            lat("442075N", Notation::Dms),
            Err(FieldError::Sexagesimal { unit: "seconds", .. })
        ));
        assert!(matches!(
            lat("4475.5N", Notation::Ddm),
            Err(FieldError::Sexagesimal { unit: "minutes", .. })
        ));
    }

    #[test]
    fn test_minutes_do_not_roll_over() {
        for notation in [Notation::DdmHundredths, Notation::Dms] {
            assert!(matches!(
                lat("449999N", notation),
                Err(FieldError::Sexagesimal { unit: "minutes", .. })
            ));
        }
        assert!(lat("445999N", Notation::DdmHundredths).is_ok());
    }

    #[test]
    fn test_out_of_range_degrees_still_parse() {
        assert_eq!(lat("950000N", Notation::Dms).unwrap(), 95.0);
    }

    #[test]
    fn test_field_error_message() {
        let err = lat("44X", Notation::DdmHundredths).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Latitude part '44X' does not match expected DDMMmm[NS] format"
        );
    }
}
