//! Trait abstraction for the remote services to enable mocking in tests

use super::error::{LookupError, SubmissionError};
use super::postal::Address;
use super::registration::SubmitOutcome;
use crate::form::RegistrationForm;
use async_trait::async_trait;

/// Resolves a CEP into street and city
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostalLookup: Send + Sync {
    /// Look up a postal code exactly as typed by the user
    async fn lookup(&self, zipcode: &str) -> Result<Address, LookupError>;
}

/// Sends a validated form to the registration endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Issue a single registration request; never retries
    async fn submit(&self, form: &RegistrationForm) -> Result<SubmitOutcome, SubmissionError>;
}
