//! Error types for the remote services

/// Postal lookup failed; the caller leaves the address fields untouched
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Request never produced a response
    #[error("HTTP error looking up CEP {zipcode}: {source}")]
    Transport {
        zipcode: String,
        source: reqwest::Error,
    },
    #[error("CEP {zipcode} not found")]
    NotFound { zipcode: String },
    /// Any other non-2xx status
    #[error("CEP service returned {status} for {zipcode}")]
    Status { zipcode: String, status: u16 },
    /// Body was not JSON or lacked street/city
    #[error("malformed CEP response for {zipcode}: {reason}")]
    Malformed { zipcode: String, reason: String },
    #[error("invalid lookup URL: {0}")]
    InvalidUrl(String),
}

/// Registration request failed before the server could answer
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("HTTP error calling {endpoint}: {source}")]
    Transport {
        endpoint: String,
        source: reqwest::Error,
    },
}
