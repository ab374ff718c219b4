//! HTTP clients for the postal lookup and registration services

mod error;
mod postal;
mod registration;
mod traits;

pub use error::{LookupError, SubmissionError};
pub use postal::{Address, CepClient};
pub use registration::{RegistrationClient, SubmitOutcome};
pub use traits::{PostalLookup, RegistrationService};

#[cfg(test)]
pub use traits::{MockPostalLookup, MockRegistrationService};

use std::time::Duration;

/// Build the HTTP client shared by both services
pub fn http_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}
