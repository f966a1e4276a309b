//! JPL Horizons plumbing: query description, HTTP client and table decoding.
//!
//! * [`horizons_query`] – [`QueryWindow`](horizons_query::QueryWindow), step size, wire parameters.
//! * [`horizons_client`] – [`HorizonsClient`](horizons_client::HorizonsClient) and the
//!   [`EphemerisSource`](horizons_client::EphemerisSource) seam.
//! * [`ephem_table`] – `$$SOE`/`$$EOE` block extraction and row decoding.
pub mod ephem_table;
pub mod horizons_client;
pub mod horizons_query;
