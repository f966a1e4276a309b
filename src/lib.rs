//! # ephem_traj
//!
//! Fetch small-body ephemerides from the JPL Horizons API and turn them into plot-ready
//! Cartesian trajectories.
//!
//! Pipeline
//! -----------------
//! 1. [`HorizonsClient`] queries an observer table (RA/Dec) for one designator over a
//!    [`TimeWindow`].
//! 2. [`parse_ephemeris_table`] extracts the rows between `$$SOE` and `$$EOE` and decodes them
//!    according to a [`DecodeMode`] (sexagesimal, decimal degrees, or precomputed Cartesian).
//! 3. [`conversion`] maps every (RA, Dec) pair to a unit vector of the equatorial frame.
//! 4. [`TrajectoryAssembler`] runs the three steps for a whole batch and keeps the designators
//!    that succeeded.
//!
//! ```rust,no_run
//! use ephem_traj::{
//!     AssemblerConfig, DecodeMode, EphemEnv, HorizonsClient, TimeWindow, TrajectoryAssembler,
//! };
//!
//! # async fn run() -> Result<(), ephem_traj::EphemError> {
//! let client = HorizonsClient::new(EphemEnv::new()?);
//! let assembler = TrajectoryAssembler::new(client, AssemblerConfig::new(DecodeMode::sexagesimal()));
//!
//! let window = TimeWindow::new("2006-01-01", "2007-01-20", Some("1d"))?;
//! let trajectories = assembler.assemble(&["54481740", "20000433"], &window).await;
//! for traj in &trajectories {
//!     println!("{}: {} points", traj.designator(), traj.len());
//! }
//! # Ok(()) }
//! ```
pub mod constants;
pub mod conversion;
pub mod env_state;
pub mod ephem_errors;
pub mod jpl_request;
pub mod time;
pub mod trajectories;

pub use env_state::EphemEnv;
pub use ephem_errors::{EphemError, ParseRecordError};
pub use jpl_request::{
    ephem_table::{parse_ephemeris_table, DecodeMode, EphemerisTable, TableLayout},
    horizons_client::{EphemerisPayload, EphemerisSource, HorizonsClient},
    horizons_query::{QueryWindow, StepSize, TimeWindow},
};
pub use trajectories::{
    assembler::{AssemblerConfig, Concurrency, TrajectoryAssembler},
    CartesianPoint, Trajectory,
};
