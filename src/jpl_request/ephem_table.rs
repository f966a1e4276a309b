//! # Horizons ephemeris table decoding
//!
//! A Horizons `result` text embeds its table between two marker lines:
//!
//! ```text
//! ... header, object data ...
//! $$SOE
//!  2006-Jan-01 00:00     05 14 33.95 +23 49 37.2
//!  2006-Jan-02 00:00     05 13 29.12 +23 51 02.8
//! $$EOE
//! ... footer ...
//! ```
//!
//! [`data_block`] isolates the rows between the markers, [`decode_row`] splits one row on runs of
//! whitespace and decodes it with a [`TableLayout`], and [`parse_ephemeris_table`] does both and
//! collects an [`EphemerisTable`].
//!
//! Decode modes
//! -----------------
//! * [`DecodeMode::Sexagesimal`] – RA `HH MM SS.ff` at `ra_field..ra_field+3`, Dec `±DD MM SS.f` at the next three fields.
//! * [`DecodeMode::Decimal`] – RA and Dec in decimal degrees at two designated fields.
//! * [`DecodeMode::Cartesian`] – precomputed `x y z` at `x_field..x_field+3`, passed through unchanged.
//!
//! Error policy
//! -----------------
//! * Missing `$$SOE` → no rows at all.
//! * Missing `$$EOE` → the block runs to the end of the payload.
//! * A row that cannot be decoded is **skipped**, logged, and kept in [`EphemerisTable::rejected`];
//!   the other rows are unaffected.
//! * Blank lines inside the block are ignored.
use std::str::FromStr;

use itertools::Itertools;
use nalgebra::Vector3;
use tracing::warn;

use crate::{
    constants::{EOE_MARKER, SOE_MARKER},
    conversion::{AngularPosition, Sexagesimal},
    ephem_errors::{EphemError, ParseRecordError},
    jpl_request::horizons_query::AngleFormat,
};

/// Which columns of a row carry the position, and how to read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    Sexagesimal { ra_field: usize },
    Decimal { ra_field: usize, dec_field: usize },
    /// Only for deployments whose endpoint serves precomputed vectors. The public Horizons
    /// observer table has no `x y z` columns, so this mode would read the RA triplet as a vector.
    Cartesian { x_field: usize },
}

impl Default for DecodeMode {
    /// Date and time occupy fields 0 and 1 of a Horizons observer row, RA starts at field 2.
    fn default() -> Self {
        DecodeMode::Sexagesimal { ra_field: 2 }
    }
}

impl DecodeMode {
    pub fn sexagesimal() -> Self {
        DecodeMode::Sexagesimal { ra_field: 2 }
    }

    pub fn decimal() -> Self {
        DecodeMode::Decimal {
            ra_field: 2,
            dec_field: 3,
        }
    }

    pub fn cartesian() -> Self {
        DecodeMode::Cartesian { x_field: 2 }
    }

    /// Angle format to request from Horizons so that the table matches this mode.
    pub fn angle_format(&self) -> AngleFormat {
        match self {
            DecodeMode::Decimal { .. } => AngleFormat::Deg,
            DecodeMode::Sexagesimal { .. } | DecodeMode::Cartesian { .. } => AngleFormat::Hms,
        }
    }
}

impl FromStr for DecodeMode {
    type Err = EphemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sexagesimal" | "hms" => Ok(DecodeMode::sexagesimal()),
            "decimal" | "deg" => Ok(DecodeMode::decimal()),
            "cartesian" | "xyz" => Ok(DecodeMode::cartesian()),
            other => Err(EphemError::InvalidDecodeMode(other.to_string())),
        }
    }
}

/// Row layout of an ephemeris table.
///
/// `timestamp_fields` leading fields are joined with a single space to form the timestamp
/// (1 keeps only the date, 2 keeps `date time`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub mode: DecodeMode,
    pub timestamp_fields: usize,
}

impl Default for TableLayout {
    fn default() -> Self {
        TableLayout {
            mode: DecodeMode::default(),
            timestamp_fields: 1,
        }
    }
}

impl TableLayout {
    pub fn new(mode: DecodeMode) -> Self {
        TableLayout {
            mode,
            ..Default::default()
        }
    }

    pub fn with_timestamp_fields(mut self, timestamp_fields: usize) -> Self {
        self.timestamp_fields = timestamp_fields.max(1);
        self
    }
}

/// Position carried by one table row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordPosition {
    Angular(AngularPosition),
    Cartesian(Vector3<f64>),
}

impl RecordPosition {
    /// Cartesian point for plotting: unit direction for angular rows, raw vector otherwise.
    pub fn to_cartesian(&self) -> Vector3<f64> {
        match self {
            RecordPosition::Angular(angular) => angular.to_unit_vector(),
            RecordPosition::Cartesian(xyz) => *xyz,
        }
    }
}

/// A row of the data block that could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based line number inside the data block
    pub line: usize,
    pub content: String,
    pub error: ParseRecordError,
}

/// Decoded table: timestamps and positions as two sequences indexed identically,
/// in the order of the source rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EphemerisTable {
    dates: Vec<String>,
    positions: Vec<RecordPosition>,
    rejected: Vec<RejectedRow>,
}

impl EphemerisTable {
    fn push(&mut self, date: String, position: RecordPosition) {
        self.dates.push(date);
        self.positions.push(position);
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn positions(&self) -> &[RecordPosition] {
        &self.positions
    }

    pub fn rejected(&self) -> &[RejectedRow] {
        &self.rejected
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RecordPosition)> {
        self.dates.iter().zip(self.positions.iter())
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<RecordPosition>) {
        (self.dates, self.positions)
    }

    /// Strict view of the table: fail on the first rejected row instead of skipping it.
    ///
    /// Return
    /// ------
    /// * the table unchanged if every row decoded, otherwise [`EphemError::MalformedTable`]
    ///   naming the first offending line
    pub fn into_strict(self) -> Result<Self, EphemError> {
        match self.rejected.first() {
            None => Ok(self),
            Some(row) => Err(EphemError::MalformedTable(format!(
                "line {}: {} ({:?})",
                row.line,
                row.error,
                row.content.trim()
            ))),
        }
    }
}

/// Return the rows strictly between the `$$SOE` and `$$EOE` marker lines.
///
/// Arguments
/// ---------
/// * `text`: the Horizons `result` string
///
/// Return
/// ------
/// * the rows of the data block, empty if the start marker is absent; if the end marker is
///   absent every line after the start marker is returned
pub fn data_block(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().collect();

    let Some(start) = lines.iter().position(|line| line.contains(SOE_MARKER)) else {
        warn!("ephemeris payload has no {SOE_MARKER} marker, no rows decoded");
        return Vec::new();
    };

    let rows = &lines[start + 1..];
    let end = match rows.iter().position(|line| line.contains(EOE_MARKER)) {
        Some(end) => end,
        None => {
            warn!("ephemeris payload has no {EOE_MARKER} marker, reading to the end of the payload");
            rows.len()
        }
    };

    rows[..end].to_vec()
}

fn field<'a>(fields: &[&'a str], index: usize) -> Result<&'a str, ParseRecordError> {
    fields
        .get(index)
        .copied()
        .ok_or(ParseRecordError::MissingField {
            index,
            found: fields.len(),
        })
}

fn finite_field(fields: &[&str], index: usize) -> Result<f64, ParseRecordError> {
    let raw = field(fields, index)?;
    f64::from_str(raw)
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ParseRecordError::InvalidNumber {
            index,
            value: raw.to_string(),
        })
}

/// Index `base + delta`; an index past `usize::MAX` cannot exist in any row.
fn shifted(fields: &[&str], base: usize, delta: usize) -> Result<usize, ParseRecordError> {
    base.checked_add(delta)
        .ok_or(ParseRecordError::MissingField {
            index: base,
            found: fields.len(),
        })
}

fn sexagesimal_field(fields: &[&str], first: usize) -> Result<Sexagesimal, ParseRecordError> {
    let last = shifted(fields, first, 2)?;
    // the three numbers are checked here so that errors name the row field index
    for index in first..=last {
        finite_field(fields, index)?;
    }
    Sexagesimal::from_fields(fields[first], fields[first + 1], fields[last])
}

fn check_declination(dec: f64) -> Result<(), ParseRecordError> {
    if (-90.0..=90.0).contains(&dec) {
        Ok(())
    } else {
        Err(ParseRecordError::DeclinationOutOfRange(dec))
    }
}

/// Decode one row of the data block.
///
/// Arguments
/// ---------
/// * `line`: a row, split on runs of whitespace
/// * `layout`: which fields hold the timestamp and the position
///
/// Return
/// ------
/// * `(timestamp, position)` or the [`ParseRecordError`] describing the first offending field
pub fn decode_row(
    line: &str,
    layout: &TableLayout,
) -> Result<(String, RecordPosition), ParseRecordError> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    let timestamp_fields = layout.timestamp_fields.max(1);
    field(&fields, timestamp_fields - 1)?;
    let timestamp = fields.iter().take(timestamp_fields).join(" ");

    let position = match layout.mode {
        DecodeMode::Sexagesimal { ra_field } => {
            let ra = sexagesimal_field(&fields, ra_field)?;
            if ra.negative {
                return Err(ParseRecordError::InvalidSexagesimal(format!(
                    "negative right ascension {}",
                    fields[ra_field]
                )));
            }
            let dec = sexagesimal_field(&fields, shifted(&fields, ra_field, 3)?)?;
            check_declination(dec.to_decimal())?;
            RecordPosition::Angular(AngularPosition::Sexagesimal { ra, dec })
        }
        DecodeMode::Decimal {
            ra_field,
            dec_field,
        } => {
            let ra = finite_field(&fields, ra_field)?;
            let dec = finite_field(&fields, dec_field)?;
            check_declination(dec)?;
            RecordPosition::Angular(AngularPosition::Decimal { ra, dec })
        }
        DecodeMode::Cartesian { x_field } => RecordPosition::Cartesian(Vector3::new(
            finite_field(&fields, x_field)?,
            finite_field(&fields, shifted(&fields, x_field, 1)?)?,
            finite_field(&fields, shifted(&fields, x_field, 2)?)?,
        )),
    };

    Ok((timestamp, position))
}

/// Decode every row of the data block of a Horizons `result` string.
///
/// Arguments
/// ---------
/// * `text`: the Horizons `result` string
/// * `layout`: the row layout
///
/// Return
/// ------
/// * the decoded table; malformed rows are logged and reported in [`EphemerisTable::rejected`]
pub fn parse_ephemeris_table(text: &str, layout: &TableLayout) -> EphemerisTable {
    let mut table = EphemerisTable::default();

    for (idx, line) in data_block(text).into_iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match decode_row(line, layout) {
            Ok((date, position)) => table.push(date, position),
            Err(error) => {
                warn!(line = idx + 1, row = line.trim(), %error, "skipping malformed ephemeris row");
                table.rejected.push(RejectedRow {
                    line: idx + 1,
                    content: line.to_string(),
                    error,
                });
            }
        }
    }

    table
}
