//! # Horizons API client
//!
//! [`HorizonsClient`] issues one GET request per [`QueryWindow`] against the Horizons JSON API
//! (or a pass-through proxy in front of it) and decodes the JSON envelope:
//!
//! ```text
//! { "signature": { "source": "NASA/JPL Horizons API", "version": "1.2" },
//!   "result": "... $$SOE ... $$EOE ..." }
//! ```
//!
//! Two entry points:
//! * [`HorizonsClient::try_fetch`] returns every failure as an [`EphemError`].
//! * [`EphemerisSource::fetch`] logs the failure and returns `None`, so that a batch can carry on
//!   with the next designator.
//!
//! One outbound request per call, no retry, no cache.
use std::future::Future;

use serde::Deserialize;
use tracing::{debug, error};

use crate::{
    env_state::EphemEnv,
    ephem_errors::EphemError,
    jpl_request::horizons_query::{horizons_params, AngleFormat, QueryWindow},
};

/// Longest slice of an error body kept in [`EphemError::UpstreamStatus`]
const MAX_ERROR_BODY: usize = 256;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Signature {
    pub source: String,
    pub version: String,
}

/// Raw JSON envelope returned by the Horizons API.
#[derive(Debug, Deserialize)]
struct HorizonsResponse {
    result: Option<String>,
    error: Option<String>,
    signature: Option<Signature>,
}

/// Successful Horizons answer: the text block holding the ephemeris table.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisPayload {
    pub result: String,
    pub signature: Option<Signature>,
}

impl EphemerisPayload {
    pub fn new(result: impl Into<String>) -> Self {
        EphemerisPayload {
            result: result.into(),
            signature: None,
        }
    }
}

/// Decode the JSON body of a Horizons answer.
///
/// Argument
/// --------
/// * `body`: the raw HTTP body
///
/// Return
/// ------
/// * the payload, [`EphemError::UpstreamError`] if Horizons reported an `error`, or
///   [`EphemError::Decode`] if the body is not JSON or has no `result` field
pub fn decode_response(body: &str) -> Result<EphemerisPayload, EphemError> {
    let response: HorizonsResponse =
        serde_json::from_str(body).map_err(|err| EphemError::Decode(err.to_string()))?;

    if let Some(message) = response.error {
        return Err(EphemError::UpstreamError(message.trim().to_string()));
    }

    let result = response
        .result
        .ok_or_else(|| EphemError::Decode("response has no `result` field".into()))?;

    Ok(EphemerisPayload {
        result,
        signature: response.signature,
    })
}

/// A source of ephemeris payloads, one per designator query.
///
/// Implementations must not raise: any failure is reported (logged) and turned into `None`.
pub trait EphemerisSource {
    fn fetch(
        &self,
        query: &QueryWindow,
        angle_format: AngleFormat,
    ) -> impl Future<Output = Option<EphemerisPayload>> + Send;
}

/// HTTP client for the Horizons observer-table API.
#[derive(Debug, Clone)]
pub struct HorizonsClient {
    env: EphemEnv,
}

impl HorizonsClient {
    pub fn new(env: EphemEnv) -> Self {
        HorizonsClient { env }
    }

    pub fn env(&self) -> &EphemEnv {
        &self.env
    }

    /// Request the Horizons API for the observer table of one designator.
    ///
    /// Arguments
    /// ---------
    /// * `query`: designator and time window
    /// * `angle_format`: RA/Dec print format requested from Horizons
    ///
    /// Return
    /// ------
    /// * the decoded payload, or [`EphemError::Network`], [`EphemError::UpstreamStatus`],
    ///   [`EphemError::UpstreamError`], [`EphemError::Decode`]
    pub async fn try_fetch(
        &self,
        query: &QueryWindow,
        angle_format: AngleFormat,
    ) -> Result<EphemerisPayload, EphemError> {
        let params = horizons_params(query, self.env.center(), angle_format);
        debug!(
            designator = %query.designator,
            url = self.env.api_url(),
            start = query.window.start_time(),
            stop = query.window.stop_time(),
            "querying Horizons"
        );

        let response = self
            .env
            .http_client()
            .get(self.env.api_url())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(EphemError::UpstreamStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        decode_response(&body)
    }
}

impl EphemerisSource for HorizonsClient {
    async fn fetch(
        &self,
        query: &QueryWindow,
        angle_format: AngleFormat,
    ) -> Option<EphemerisPayload> {
        match self.try_fetch(query, angle_format).await {
            Ok(payload) => Some(payload),
            Err(err) => {
                error!(designator = %query.designator, error = %err, "failed to fetch data from Horizons");
                None
            }
        }
    }
}
