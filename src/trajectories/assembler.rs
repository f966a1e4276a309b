//! # Trajectory assembly
//!
//! [`TrajectoryAssembler`] runs the whole pipeline for a batch of designators sharing one
//! [`TimeWindow`]:
//!
//! ```text
//! designator ─▶ EphemerisSource::fetch ─▶ parse_ephemeris_table ─▶ Trajectory::from_table
//! ```
//!
//! Error policy
//! -----------------
//! * A designator whose fetch fails, or whose table yields no row, is skipped and logged.
//! * The batch never aborts; an all-failed batch returns an empty list and logs an error.
//!
//! Scheduling
//! -----------------
//! * [`Concurrency::Sequential`] (default) issues one request at a time, which is what the
//!   Horizons service expects from a single client.
//! * [`Concurrency::Bounded`] keeps at most `n` requests in flight. Output order still follows
//!   the input order.
use futures::{stream, StreamExt};
use tracing::{error, info, warn};

use crate::{
    jpl_request::{
        ephem_table::{parse_ephemeris_table, DecodeMode, TableLayout},
        horizons_client::EphemerisSource,
        horizons_query::{QueryWindow, TimeWindow},
    },
    trajectories::Trajectory,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Concurrency {
    #[default]
    Sequential,
    /// At most `n` requests in flight (`n = 0` is treated as 1)
    Bounded(usize),
}

impl Concurrency {
    fn limit(&self) -> usize {
        match self {
            Concurrency::Sequential => 1,
            Concurrency::Bounded(n) => (*n).max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssemblerConfig {
    pub layout: TableLayout,
    pub concurrency: Concurrency,
}

impl AssemblerConfig {
    pub fn new(mode: DecodeMode) -> Self {
        AssemblerConfig {
            layout: TableLayout::new(mode),
            concurrency: Concurrency::Sequential,
        }
    }

    pub fn with_layout(mut self, layout: TableLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }
}

pub struct TrajectoryAssembler<S> {
    source: S,
    config: AssemblerConfig,
}

impl<S: EphemerisSource> TrajectoryAssembler<S> {
    pub fn new(source: S, config: AssemblerConfig) -> Self {
        TrajectoryAssembler { source, config }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch, decode and convert the table of one designator.
    ///
    /// Arguments
    /// ---------
    /// * `query`: designator and time window
    ///
    /// Return
    /// ------
    /// * the trajectory, or `None` if the fetch failed or the table has no decodable row
    pub async fn assemble_one(&self, query: &QueryWindow) -> Option<Trajectory> {
        let angle_format = self.config.layout.mode.angle_format();
        let Some(payload) = self.source.fetch(query, angle_format).await else {
            warn!(designator = %query.designator, "no trajectory available, skipping designator");
            return None;
        };

        let table = parse_ephemeris_table(&payload.result, &self.config.layout);
        if !table.rejected().is_empty() {
            warn!(
                designator = %query.designator,
                rejected = table.rejected().len(),
                "some ephemeris rows were skipped"
            );
        }
        if table.is_empty() {
            warn!(designator = %query.designator, "ephemeris table has no usable row, skipping designator");
            return None;
        }

        let trajectory = Trajectory::from_table(query.designator.clone(), table);
        info!(designator = %query.designator, points = trajectory.len(), "trajectory assembled");
        Some(trajectory)
    }

    /// Assemble the trajectories of a batch of designators over one time window.
    ///
    /// Arguments
    /// ---------
    /// * `designators`: the bodies to fetch, in output order
    /// * `window`: the time window shared by every query
    ///
    /// Return
    /// ------
    /// * the trajectories of the designators that succeeded, in input order
    pub async fn assemble<D: AsRef<str>>(
        &self,
        designators: &[D],
        window: &TimeWindow,
    ) -> Vec<Trajectory> {
        let queries: Vec<QueryWindow> = designators
            .iter()
            .map(|des| window.for_designator(des.as_ref()))
            .collect();

        let trajectories: Vec<Trajectory> = stream::iter(queries.iter())
            .map(|query| self.assemble_one(query))
            .buffered(self.config.concurrency.limit())
            .filter_map(|traj| async move { traj })
            .collect()
            .await;

        if trajectories.is_empty() && !designators.is_empty() {
            error!(
                designators = designators.len(),
                "no trajectory could be assembled for any designator"
            );
        } else {
            info!(
                succeeded = trajectories.len(),
                requested = designators.len(),
                "batch assembled"
            );
        }

        trajectories
    }
}
