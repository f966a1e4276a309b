//! # Trajectories: per-designator Cartesian tracks
//!
//! A [`Trajectory`] is the plot-ready output for one designator: the timestamps of the source
//! table and one [`CartesianPoint`] per timestamp, in table order.
//!
//! Modules
//! -----------------
//! * [`assembler`](crate::trajectories::assembler) – runs client → parser → converter for one or
//!   many designators and collects the trajectories that succeeded.
//! * [`catalog_reader`](crate::trajectories::catalog_reader) – reads the designator list of a batch
//!   from a CSV catalog.
//!
//! Data Model
//! -----------------
//! * `dates.len() == points.len()`, both in chronological (table) order.
//! * Points derived from RA/Dec lie on the unit sphere; points read from a Cartesian table are
//!   passed through unchanged.
//! * A trajectory is built fresh for each query and owned by the caller; nothing is cached.
//!
//! Serialization
//! -----------------
//! A trajectory serializes to the columnar shape consumed by the 3D viewer:
//!
//! ```text
//! { "des": "54481740", "dates": [...], "x": [...], "y": [...], "z": [...] }
//! ```
use nalgebra::Vector3;
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::{constants::Designator, jpl_request::ephem_table::EphemerisTable};

pub mod assembler;
pub mod catalog_reader;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        CartesianPoint { x, y, z }
    }

    pub fn norm(&self) -> f64 {
        Vector3::from(*self).norm()
    }
}

impl From<Vector3<f64>> for CartesianPoint {
    fn from(v: Vector3<f64>) -> Self {
        CartesianPoint::new(v.x, v.y, v.z)
    }
}

impl From<CartesianPoint> for Vector3<f64> {
    fn from(p: CartesianPoint) -> Self {
        Vector3::new(p.x, p.y, p.z)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    designator: Designator,
    dates: Vec<String>,
    points: Vec<CartesianPoint>,
}

impl Trajectory {
    /// Convert every decoded row of a table into a Cartesian point.
    ///
    /// Arguments
    /// ---------
    /// * `designator`: the body the table belongs to
    /// * `table`: the decoded Horizons table
    ///
    /// Return
    /// ------
    /// * the trajectory, one point per table row, in table order
    pub fn from_table(designator: impl Into<Designator>, table: EphemerisTable) -> Self {
        let (dates, positions) = table.into_parts();
        let points = positions
            .iter()
            .map(|position| CartesianPoint::from(position.to_cartesian()))
            .collect();
        Trajectory {
            designator: designator.into(),
            dates,
            points,
        }
    }

    pub fn designator(&self) -> &str {
        &self.designator
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn points(&self) -> &[CartesianPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Serialize for Trajectory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let column = |f: fn(&CartesianPoint) -> f64| self.points.iter().map(f).collect::<Vec<_>>();

        let mut state = serializer.serialize_struct("Trajectory", 5)?;
        state.serialize_field("des", &self.designator)?;
        state.serialize_field("dates", &self.dates)?;
        state.serialize_field("x", &column(|p| p.x))?;
        state.serialize_field("y", &column(|p| p.y))?;
        state.serialize_field("z", &column(|p| p.z))?;
        state.end()
    }
}

#[cfg(test)]
mod trajectories_test {
    use super::*;
    use crate::constants::UNIT_NORM_TOLERANCE;
    use crate::jpl_request::ephem_table::{parse_ephemeris_table, DecodeMode, TableLayout};
    use approx::assert_abs_diff_eq;

    const PAYLOAD: &str = "$$SOE
 2006-Jan-01 00:00     06 00 00.00 +45 00 00.0
 2006-Jan-02 00:00     00 00 00.00 +00 00 00.0
$$EOE";

    #[test]
    fn test_from_table() {
        let table = parse_ephemeris_table(PAYLOAD, &TableLayout::default());
        let traj = Trajectory::from_table("1", table);

        assert_eq!(traj.designator(), "1");
        assert_eq!(traj.len(), 2);
        assert_eq!(traj.dates(), ["2006-Jan-01", "2006-Jan-02"]);

        let half = 45f64.to_radians().cos();
        assert_abs_diff_eq!(traj.points()[0].x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(traj.points()[0].y, half, epsilon = 1e-12);
        assert_abs_diff_eq!(traj.points()[0].z, half, epsilon = 1e-12);
        assert_eq!(traj.points()[1], CartesianPoint::new(1.0, 0.0, 0.0));
        for point in traj.points() {
            assert_abs_diff_eq!(point.norm(), 1.0, epsilon = UNIT_NORM_TOLERANCE);
        }
    }

    #[test]
    fn test_cartesian_passthrough_is_not_normalized() {
        let payload = "$$SOE\n2023-01-01 00:00 3.0 4.0 12.0\n$$EOE";
        let table = parse_ephemeris_table(payload, &TableLayout::new(DecodeMode::cartesian()));
        let traj = Trajectory::from_table("2", table);
        assert_eq!(traj.points(), [CartesianPoint::new(3.0, 4.0, 12.0)]);
        assert_eq!(traj.points()[0].norm(), 13.0);
    }

    #[test]
    fn test_serialize_columns() {
        let payload = "$$SOE\n2023-01-01 00:00 3.0 4.0 12.0\n2023-01-02 00:00 1.0 2.0 3.0\n$$EOE";
        let table = parse_ephemeris_table(payload, &TableLayout::new(DecodeMode::cartesian()));
        let traj = Trajectory::from_table("2", table);

        let json = serde_json::to_value(&traj).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "des": "2",
                "dates": ["2023-01-01", "2023-01-02"],
                "x": [3.0, 1.0],
                "y": [4.0, 2.0],
                "z": [12.0, 3.0],
            })
        );
    }
}
