//! # Horizons observer-table query
//!
//! Typed description of one Horizons request: which body ([`QueryWindow::designator`]), over which
//! [`TimeWindow`], sampled at which [`StepSize`], and how the service should print angles
//! ([`AngleFormat`]). [`horizons_params`] flattens a query into the key/value list sent on the
//! wire.
//!
//! The observation parameters are fixed: observer ephemeris, object data and ephemeris both
//! requested, quantity 1 only (astrometric RA/Dec).
use std::{fmt, str::FromStr};

use hifitime::Epoch;
use regex::Regex;
use std::sync::LazyLock;

use crate::{
    constants::{Designator, DEFAULT_STEP},
    ephem_errors::EphemError,
    time::parse_calendar_date,
};

static STEP_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*([A-Za-z]+)$").expect("step size regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepUnit {
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

impl StepUnit {
    fn suffix(&self) -> &'static str {
        match self {
            StepUnit::Minutes => "m",
            StepUnit::Hours => "h",
            StepUnit::Days => "d",
            StepUnit::Months => "mo",
            StepUnit::Years => "y",
        }
    }
}

impl FromStr for StepUnit {
    type Err = EphemError;

    fn from_str(unit: &str) -> Result<Self, Self::Err> {
        match unit.to_ascii_lowercase().as_str() {
            "m" | "min" | "mins" | "minute" | "minutes" => Ok(StepUnit::Minutes),
            "h" | "hr" | "hrs" | "hour" | "hours" => Ok(StepUnit::Hours),
            "d" | "day" | "days" => Ok(StepUnit::Days),
            "mo" | "mon" | "month" | "months" => Ok(StepUnit::Months),
            "y" | "yr" | "yrs" | "year" | "years" => Ok(StepUnit::Years),
            other => Err(EphemError::InvalidStepSize(format!("unknown unit {other:?}"))),
        }
    }
}

/// Table sampling interval, rendered in the compact Horizons form (`1d`, `6h`, `30m`, `2mo`, `1y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSize {
    value: u32,
    unit: StepUnit,
}

impl StepSize {
    pub fn new(value: u32, unit: StepUnit) -> Result<Self, EphemError> {
        if value == 0 {
            return Err(EphemError::InvalidStepSize(
                "step value must be at least 1".into(),
            ));
        }
        Ok(StepSize { value, unit })
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn unit(&self) -> StepUnit {
        self.unit
    }
}

impl Default for StepSize {
    fn default() -> Self {
        StepSize {
            value: 1,
            unit: StepUnit::Days,
        }
    }
}

impl fmt::Display for StepSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl FromStr for StepSize {
    type Err = EphemError;

    /// Accepts `1d`, `1 day`, `6 hours`, `30m`, `2mo`, `1y`...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let caps = STEP_SIZE
            .captures(trimmed)
            .ok_or_else(|| EphemError::InvalidStepSize(trimmed.to_string()))?;
        let value = u32::from_str(&caps[1])
            .map_err(|_| EphemError::InvalidStepSize(trimmed.to_string()))?;
        let unit = StepUnit::from_str(&caps[2])?;
        StepSize::new(value, unit)
    }
}

/// How Horizons prints the RA/Dec columns of quantity 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleFormat {
    /// RA as `HH MM SS.ff`, Dec as `±DD MM SS.f`
    #[default]
    Hms,
    /// RA and Dec as decimal degrees
    Deg,
}

impl AngleFormat {
    pub fn as_param(&self) -> &'static str {
        match self {
            AngleFormat::Hms => "HMS",
            AngleFormat::Deg => "DEG",
        }
    }
}

/// Validated time span shared by every designator of a batch.
///
/// Invariant: `start_time <= stop_time`, both being parseable calendar dates.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeWindow {
    start_time: String,
    stop_time: String,
    step: StepSize,
}

impl TimeWindow {
    /// Create a new time window
    ///
    /// Arguments
    /// ---------
    /// * `start_time`: calendar date of the first table row (e.g. `2006-01-01`)
    /// * `stop_time`: calendar date of the last table row
    /// * `step`: sampling interval, `None` for the default of one day
    ///
    /// Return
    /// ------
    /// * the window, [`EphemError::InvalidDate`] / [`EphemError::InvalidStepSize`] on unparseable input,
    ///   or [`EphemError::InvalidQueryWindow`] if the start is after the stop
    pub fn new(start_time: &str, stop_time: &str, step: Option<&str>) -> Result<Self, EphemError> {
        let start: Epoch = parse_calendar_date(start_time)?;
        let stop: Epoch = parse_calendar_date(stop_time)?;
        if start > stop {
            return Err(EphemError::InvalidQueryWindow(format!(
                "start {start_time} is after stop {stop_time}"
            )));
        }
        let step = StepSize::from_str(step.unwrap_or(DEFAULT_STEP))?;

        Ok(TimeWindow {
            start_time: start_time.trim().to_string(),
            stop_time: stop_time.trim().to_string(),
            step,
        })
    }

    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn stop_time(&self) -> &str {
        &self.stop_time
    }

    pub fn step(&self) -> StepSize {
        self.step
    }

    pub fn for_designator(&self, designator: impl Into<Designator>) -> QueryWindow {
        QueryWindow {
            designator: designator.into(),
            window: self.clone(),
        }
    }
}

/// One Horizons request: a designator and the time window to tabulate.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryWindow {
    pub designator: Designator,
    pub window: TimeWindow,
}

impl QueryWindow {
    pub fn new(
        designator: impl Into<Designator>,
        start_time: &str,
        stop_time: &str,
        step: Option<&str>,
    ) -> Result<Self, EphemError> {
        Ok(TimeWindow::new(start_time, stop_time, step)?.for_designator(designator))
    }
}

/// Build the Horizons GET parameters for one observer-table query.
///
/// Arguments
/// ---------
/// * `query`: designator and time window
/// * `center`: observation center code (e.g. `500@399`)
/// * `angle_format`: how RA/Dec should be printed in the table
///
/// Return
/// ------
/// * the ordered key/value list to send as the URL query string
pub fn horizons_params(
    query: &QueryWindow,
    center: &str,
    angle_format: AngleFormat,
) -> [(&'static str, String); 11] {
    [
        ("format", "json".into()),
        ("COMMAND", format!("'DES={};'", query.designator)),
        ("OBJ_DATA", "YES".into()),
        ("MAKE_EPHEM", "YES".into()),
        ("EPHEM_TYPE", "OBSERVER".into()),
        ("CENTER", center.into()),
        ("START_TIME", query.window.start_time().into()),
        ("STOP_TIME", query.window.stop_time().into()),
        ("STEP_SIZE", query.window.step().to_string()),
        ("QUANTITIES", "1".into()),
        ("ANG_FORMAT", angle_format.as_param().into()),
    ]
}
