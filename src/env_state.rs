//! # Ephemeris environment state
//!
//! This module defines [`crate::env_state::EphemEnv`], the **shared environment object** handed to
//! the Horizons client. It provides:
//!
//! - A persistent asynchronous **HTTP client** ([`reqwest::Client`]) with a per-request timeout.
//! - The **API endpoint** to query (the public Horizons API, or a local pass-through proxy).
//! - The fixed **observation center** used for every observer-table query.
//!
//! ## Structure
//!
//! ```text
//! EphemEnv
//! ├── http_client (reqwest::Client)
//! ├── api_url     (String)
//! └── center      (String)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use ephem_traj::env_state::EphemEnv;
//!
//! let env = EphemEnv::builder()
//!     .api_url("http://localhost:3000/api/horizons")
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//! assert_eq!(env.center(), "500@399");
//! ```
//!
//! ## Notes
//!
//! - [`reqwest::Client`] keeps its connection pool behind an `Arc`; cloning an [`EphemEnv`] is cheap
//!   and shares that pool.
//! - No retries are configured: a failed round-trip is final for the designator being fetched.
use std::time::Duration;

use reqwest::Client;

use crate::{
    constants::{DEFAULT_CENTER, DEFAULT_TIMEOUT_SECS, HORIZONS_API_URL},
    ephem_errors::EphemError,
};

/// This object is passed to the Horizons client
/// to provide the HTTP session and the query defaults
///
/// # Fields
///
/// * `http_client` - A reqwest client used to make HTTP requests
/// * `api_url` - The Horizons JSON endpoint (or a proxy forwarding to it)
/// * `center` - The Horizons observation center code (e.g. `500@399`)
#[derive(Debug, Clone)]
pub struct EphemEnv {
    http_client: Client,
    api_url: String,
    center: String,
}

/// Builder for [`EphemEnv`].
#[derive(Debug, Clone)]
pub struct EphemEnvBuilder {
    api_url: String,
    center: String,
    timeout: Duration,
}

impl Default for EphemEnvBuilder {
    fn default() -> Self {
        EphemEnvBuilder {
            api_url: HORIZONS_API_URL.to_string(),
            center: DEFAULT_CENTER.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl EphemEnvBuilder {
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn center(mut self, center: impl Into<String>) -> Self {
        self.center = center.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the environment
    ///
    /// Return
    /// ------
    /// * A new [`EphemEnv`] or [`EphemError::Network`] if the TLS backend cannot be initialized
    pub fn build(self) -> Result<EphemEnv, EphemError> {
        let http_client = Client::builder().timeout(self.timeout).build()?;
        Ok(EphemEnv {
            http_client,
            api_url: self.api_url,
            center: self.center,
        })
    }
}

impl EphemEnv {
    /// Create an environment pointing at the public Horizons API,
    /// centered on the Earth geocenter, with the default timeout.
    pub fn new() -> Result<Self, EphemError> {
        EphemEnvBuilder::default().build()
    }

    pub fn builder() -> EphemEnvBuilder {
        EphemEnvBuilder::default()
    }

    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn center(&self) -> &str {
        &self.center
    }
}
