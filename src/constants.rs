//! # Constants and type definitions for ephem_traj
//!
//! This module centralizes the **conversion factors**, the **JPL Horizons wire constants** and the
//! **type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Unit conversions (hours → degrees, sexagesimal sub-units)
//! - Literal markers bounding the ephemeris table inside a Horizons response
//! - Default query parameters (API endpoint, observation center, step size)
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Hours of right ascension → degrees (360° / 24h)
pub const DEG_PER_HOUR: f64 = 15.0;

/// Base of a sexagesimal sub-unit: minutes per unit and seconds per minute
pub const SEXAGESIMAL_BASE: f64 = 60.0;

/// Minutes (of hour or of degree) per unit
pub const MINUTES_PER_UNIT: f64 = SEXAGESIMAL_BASE;

/// Seconds (of hour or of degree) per unit
pub const SECONDS_PER_UNIT: f64 = SEXAGESIMAL_BASE * SEXAGESIMAL_BASE;

/// Numerical tolerance used when checking that a derived direction lies on the unit sphere
pub const UNIT_NORM_TOLERANCE: f64 = 1e-9;

// -------------------------------------------------------------------------------------------------
// JPL Horizons wire constants
// -------------------------------------------------------------------------------------------------

/// Start-of-ephemeris marker line in a Horizons text result
pub const SOE_MARKER: &str = "$$SOE";

/// End-of-ephemeris marker line in a Horizons text result
pub const EOE_MARKER: &str = "$$EOE";

/// Public JSON endpoint of the JPL Horizons system
pub const HORIZONS_API_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons.api";

/// Observation center: Earth geocenter (site 500 on body 399)
pub const DEFAULT_CENTER: &str = "500@399";

/// Default table step when the caller does not provide one
pub const DEFAULT_STEP: &str = "1d";

/// Default timeout applied to one Horizons round-trip, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Small-body designator as sent in the Horizons `COMMAND` (`DES=<designator>;`)
pub type Designator = String;
