use thiserror::Error;

/// Row-level decoding errors for a Horizons ephemeris table.
///
/// Variants
/// -----------------
/// * `MissingField` – The row has fewer whitespace-separated fields than the decode mode needs.
/// * `InvalidNumber` – A numeric field could not be parsed as a finite `f64`.
/// * `InvalidSexagesimal` – A sexagesimal triplet is out of range (minutes or seconds ≥ 60, negative sub-units).
/// * `DeclinationOutOfRange` – The decoded declination is not a latitude on the sphere.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseRecordError {
    #[error("expected a field at index {index}, the row only has {found} fields")]
    MissingField { index: usize, found: usize },
    #[error("field {index} is not a finite number: {value:?}")]
    InvalidNumber { index: usize, value: String },
    #[error("invalid sexagesimal value: {0}")]
    InvalidSexagesimal(String),
    #[error("declination {0}° is outside [-90°, 90°]")]
    DeclinationOutOfRange(f64),
}

#[derive(Error, Debug)]
pub enum EphemError {
    #[error("HTTP request to the ephemeris service failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Ephemeris service answered with status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Unable to decode the ephemeris service response: {0}")]
    Decode(String),

    #[error("Ephemeris service reported an error: {0}")]
    UpstreamError(String),

    #[error("Malformed ephemeris table: {0}")]
    MalformedTable(String),

    #[error("Invalid query window: {0}")]
    InvalidQueryWindow(String),

    #[error("Invalid calendar date: {0}")]
    InvalidDate(String),

    #[error("Invalid step size: {0}")]
    InvalidStepSize(String),

    #[error("Invalid decode mode: {0}")]
    InvalidDecodeMode(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV catalog error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl PartialEq for EphemError {
    fn eq(&self, other: &Self) -> bool {
        use EphemError::*;
        match (self, other) {
            (
                UpstreamStatus {
                    status: s1,
                    body: b1,
                },
                UpstreamStatus {
                    status: s2,
                    body: b2,
                },
            ) => s1 == s2 && b1 == b2,
            (Decode(a), Decode(b)) => a == b,
            (UpstreamError(a), UpstreamError(b)) => a == b,
            (MalformedTable(a), MalformedTable(b)) => a == b,
            (InvalidQueryWindow(a), InvalidQueryWindow(b)) => a == b,
            (InvalidDate(a), InvalidDate(b)) => a == b,
            (InvalidStepSize(a), InvalidStepSize(b)) => a == b,
            (InvalidDecodeMode(a), InvalidDecodeMode(b)) => a == b,

            // wrapped foreign errors are not comparable: same variant means equal
            (Network(_), Network(_)) => true,
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (JsonError(_), JsonError(_)) => true,

            _ => false,
        }
    }
}
