//! Angular sky coordinates to Cartesian directions.
//!
//! Right ascension and declination arrive either as sexagesimal triplets
//! (`HH MM SS.ff` / `±DD MM SS.f`) or as decimal degrees. Both are reduced to decimal degrees and
//! then projected on the unit sphere of the equatorial frame (x toward the equinox, z toward the
//! celestial pole):
//!
//! ```text
//! x = cos(dec) * cos(ra)
//! y = cos(dec) * sin(ra)
//! z = sin(dec)
//! ```
use std::str::FromStr;

use nalgebra::Vector3;

use crate::{
    constants::{
        Degree, Radian, DEG_PER_HOUR, MINUTES_PER_UNIT, SECONDS_PER_UNIT, SEXAGESIMAL_BASE,
    },
    ephem_errors::ParseRecordError,
};

/// A sexagesimal value `±W MM SS.ss` (W in hours for RA, degrees for Dec).
///
/// The sign is carried separately so that `-00 30 00` keeps its negative sign:
/// it is taken from the textual whole-unit field, never from its numeric value.
/// A whole-unit field without a leading `-` (including `0` and `+00`) is positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sexagesimal {
    pub negative: bool,
    pub whole: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Sexagesimal {
    /// Build a validated sexagesimal value.
    ///
    /// Arguments
    /// ---------
    /// * `negative`: sign of the whole value
    /// * `whole`: hours or degrees, only its magnitude is used
    /// * `minutes`: in `[0, 60)`
    /// * `seconds`: in `[0, 60)`
    pub fn new(
        negative: bool,
        whole: f64,
        minutes: f64,
        seconds: f64,
    ) -> Result<Self, ParseRecordError> {
        if !(whole.is_finite() && minutes.is_finite() && seconds.is_finite()) {
            return Err(ParseRecordError::InvalidSexagesimal(format!(
                "non finite component in {whole} {minutes} {seconds}"
            )));
        }
        let sub_unit = 0.0..SEXAGESIMAL_BASE;
        if !sub_unit.contains(&minutes) || !sub_unit.contains(&seconds) {
            return Err(ParseRecordError::InvalidSexagesimal(format!(
                "minutes and seconds must lie in [0, 60): {whole} {minutes} {seconds}"
            )));
        }
        Ok(Sexagesimal {
            negative,
            whole: whole.abs(),
            minutes,
            seconds,
        })
    }

    /// Build a value from its three textual fields, the sign being read from `whole`.
    pub fn from_fields(whole: &str, minutes: &str, seconds: &str) -> Result<Self, ParseRecordError> {
        let number = |index: usize, value: &str| {
            f64::from_str(value).map_err(|_| ParseRecordError::InvalidNumber {
                index,
                value: value.to_string(),
            })
        };
        let negative = whole.trim_start().starts_with('-');
        Sexagesimal::new(
            negative,
            number(0, whole)?,
            number(1, minutes)?,
            number(2, seconds)?,
        )
    }

    /// `sign * (|whole| + minutes / 60 + seconds / 3600)`
    pub fn to_decimal(&self) -> f64 {
        let magnitude = self.whole + self.minutes / MINUTES_PER_UNIT + self.seconds / SECONDS_PER_UNIT;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl FromStr for Sexagesimal {
    type Err = ParseRecordError;

    /// Parse a whitespace separated triplet such as `"22 52 23.37"` or `"-00 30 14.2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(ParseRecordError::InvalidSexagesimal(format!(
                "expected 3 fields, got {}: {s:?}",
                parts.len()
            )));
        }
        Sexagesimal::from_fields(parts[0], parts[1], parts[2])
    }
}

/// Right ascension `HH MM SS.ss` → degrees (15° per hour).
pub fn hms_to_deg(ra: &Sexagesimal) -> Degree {
    ra.to_decimal() * DEG_PER_HOUR
}

/// Declination `±DD MM SS.s` → degrees.
pub fn dms_to_deg(dec: &Sexagesimal) -> Degree {
    dec.to_decimal()
}

/// Compute the direction cosine vector of an equatorial position.
///
/// Arguments
/// ----------
/// * `ra` - Right ascension in degrees.
/// * `dec` - Declination in degrees.
///
/// Returns
/// ----------
/// * The unit vector `[cos(dec)cos(ra), cos(dec)sin(ra), sin(dec)]`, norm 1 up to rounding.
pub fn radec_to_unit_vector(ra: Degree, dec: Degree) -> Vector3<f64> {
    let ra_rad: Radian = ra.to_radians();
    let dec_rad: Radian = dec.to_radians();
    let cos_dec = dec_rad.cos();
    Vector3::new(cos_dec * ra_rad.cos(), cos_dec * ra_rad.sin(), dec_rad.sin())
}

/// An equatorial sky position as read from an ephemeris row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngularPosition {
    Sexagesimal { ra: Sexagesimal, dec: Sexagesimal },
    Decimal { ra: Degree, dec: Degree },
}

impl AngularPosition {
    /// (right ascension, declination) in decimal degrees
    pub fn to_degrees(&self) -> (Degree, Degree) {
        match self {
            AngularPosition::Sexagesimal { ra, dec } => (hms_to_deg(ra), dms_to_deg(dec)),
            AngularPosition::Decimal { ra, dec } => (*ra, *dec),
        }
    }

    pub fn to_unit_vector(&self) -> Vector3<f64> {
        let (ra, dec) = self.to_degrees();
        radec_to_unit_vector(ra, dec)
    }
}
