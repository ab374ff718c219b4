//! Registration form controller
//!
//! Owns the form values, the error set, the in-flight submission flag and
//! the notification queue. Network work is split into a `begin_*` step that
//! produces a request and an `apply_*`/`finish_*` step that consumes its
//! result, so an event loop can run the I/O elsewhere and feed completions
//! back in order.

use super::errors::FieldErrors;
use super::field::{Field, FieldTypeMismatch, FieldValue};
use super::registration::RegistrationForm;
use super::schema;
use crate::services::{
    Address, LookupError, PostalLookup, RegistrationService, SubmissionError, SubmitOutcome,
};

pub const SUCCESS_MESSAGE: &str = "Cadastro realizado com sucesso!";
pub const FAILURE_MESSAGE: &str = "Não foi possível concluir o cadastro.";

/// Global outcome signal for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Failure(String),
}

/// A postal lookup issued when the zipcode field loses focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub seq: u64,
    pub zipcode: String,
}

/// Result of trying to start a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Validation passed; send this snapshot
    Ready(RegistrationForm),
    /// Validation failed; errors are now in the controller
    Invalid,
    /// Another submission is still in flight
    AlreadySubmitting,
}

/// How a full validate-and-submit cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitReport {
    Invalid,
    AlreadySubmitting,
    Succeeded,
    Rejected,
    Failed,
}

/// Whether a submission is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

/// Single source of truth for the registration form state
#[derive(Debug, Default)]
pub struct FormController {
    form: RegistrationForm,
    errors: FieldErrors,
    phase: SubmitPhase,
    notifications: Vec<Notification>,
    /// Sequence number of the most recent lookup request
    lookup_seq: u64,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    /// Update one field without touching any other
    pub fn set_field(
        &mut self,
        field: Field,
        value: impl Into<FieldValue>,
    ) -> Result<(), FieldTypeMismatch> {
        self.form.set(field, value.into())
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        self.form.push_char(field, c);
    }

    pub fn pop_char(&mut self, field: Field) {
        self.form.pop_char(field);
    }

    pub fn toggle_terms(&mut self) {
        self.form.toggle_terms();
    }

    /// Handle a field losing focus.
    ///
    /// Leaving a non-blank zipcode issues a lookup request; every other
    /// field returns `None`.
    pub fn blur(&mut self, field: Field) -> Option<LookupRequest> {
        if field != Field::Zipcode {
            return None;
        }
        if self.form.zipcode.trim().is_empty() {
            return None;
        }
        self.lookup_seq += 1;
        Some(LookupRequest {
            seq: self.lookup_seq,
            zipcode: self.form.zipcode.clone(),
        })
    }

    /// Apply a completed lookup.
    ///
    /// Only the latest request for the zipcode currently held is applied.
    /// Failures leave address and city untouched. Returns whether the form
    /// changed.
    pub fn apply_lookup(
        &mut self,
        request: &LookupRequest,
        result: Result<Address, LookupError>,
    ) -> bool {
        if request.seq != self.lookup_seq || request.zipcode != self.form.zipcode {
            tracing::debug!(
                seq = request.seq,
                latest = self.lookup_seq,
                zipcode = %request.zipcode,
                "discarding stale CEP lookup"
            );
            return false;
        }

        match result {
            Ok(address) => {
                self.form.address = address.street;
                self.form.city = address.city;
                true
            }
            Err(err) => {
                tracing::warn!("CEP lookup failed: {err}");
                false
            }
        }
    }

    /// Run the schema, replacing the error set. Returns whether it passed.
    pub fn validate(&mut self) -> bool {
        match schema::validate(&self.form) {
            Ok(()) => {
                self.errors.clear();
                true
            }
            Err(errors) => {
                self.errors = errors;
                false
            }
        }
    }

    /// Validate and, if valid, mark a submission as in flight
    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if self.is_submitting() {
            return SubmitAttempt::AlreadySubmitting;
        }
        if !self.validate() {
            return SubmitAttempt::Invalid;
        }
        self.phase = SubmitPhase::Submitting;
        SubmitAttempt::Ready(self.form.clone())
    }

    /// Consume the result of a submission and return to idle
    pub fn finish_submit(&mut self, result: Result<SubmitOutcome, SubmissionError>) -> SubmitReport {
        self.phase = SubmitPhase::Idle;

        match result {
            Ok(SubmitOutcome::Accepted) => {
                tracing::info!("registration accepted");
                self.reset();
                self.notify(Notification::Success(SUCCESS_MESSAGE.to_string()));
                SubmitReport::Succeeded
            }
            Ok(SubmitOutcome::Rejected { errors, message }) => {
                tracing::info!(fields = errors.len(), "registration rejected");
                self.errors.merge(errors);
                let text = message.unwrap_or_else(|| FAILURE_MESSAGE.to_string());
                self.notify(Notification::Failure(text));
                SubmitReport::Rejected
            }
            Err(err) => {
                tracing::warn!("registration request failed: {err}");
                self.notify(Notification::Failure(FAILURE_MESSAGE.to_string()));
                SubmitReport::Failed
            }
        }
    }

    /// Validate, submit once through `service`, and apply the outcome
    pub async fn validate_and_submit<S>(&mut self, service: &S) -> SubmitReport
    where
        S: RegistrationService + ?Sized,
    {
        let snapshot = match self.begin_submit() {
            SubmitAttempt::Ready(form) => form,
            SubmitAttempt::Invalid => return SubmitReport::Invalid,
            SubmitAttempt::AlreadySubmitting => return SubmitReport::AlreadySubmitting,
        };
        let result = service.submit(&snapshot).await;
        self.finish_submit(result)
    }

    /// Look up the current zipcode and apply the result
    pub async fn lookup_zipcode<L>(&mut self, lookup: &L) -> bool
    where
        L: PostalLookup + ?Sized,
    {
        let Some(request) = self.blur(Field::Zipcode) else {
            return false;
        };
        let result = lookup.lookup(&request.zipcode).await;
        self.apply_lookup(&request, result)
    }

    /// Drain queued notifications
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Clear all values and errors
    pub fn reset(&mut self) {
        self.form.clear();
        self.errors.clear();
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}
