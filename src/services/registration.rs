//! Registration endpoint client
//!
//! Posts the whole form as JSON. A rejected registration may carry a body
//! of the form `{"message": "...", "errors": {"email": "..."}}`, where each
//! error entry is either a string or a list of strings.

use super::error::SubmissionError;
use super::traits::RegistrationService;
use crate::form::{Field, FieldErrors, RegistrationForm};
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

/// Result of a registration request that reached the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Server accepted the registration
    Accepted,
    /// Server refused it; `errors` is empty when the body had no field detail
    Rejected {
        errors: FieldErrors,
        message: Option<String>,
    },
}

/// Client for the registration endpoint
#[derive(Debug, Clone)]
pub struct RegistrationClient {
    http: reqwest::Client,
    url: Url,
}

impl RegistrationClient {
    pub fn new(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }
}

#[async_trait]
impl RegistrationService for RegistrationClient {
    async fn submit(&self, form: &RegistrationForm) -> Result<SubmitOutcome, SubmissionError> {
        let endpoint = format!("POST {}", self.url);

        let resp = self
            .http
            .post(self.url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(form)
            .send()
            .await
            .map_err(|e| SubmissionError::Transport {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(SubmitOutcome::Accepted);
        }

        // A body we cannot read is treated the same as no body at all
        let body = resp.bytes().await.unwrap_or_default();
        tracing::info!(%endpoint, status = status.as_u16(), "registration rejected");
        Ok(parse_rejection(&body))
    }
}

/// Map a rejection body onto field errors, dropping unknown field names
fn parse_rejection(body: &[u8]) -> SubmitOutcome {
    let Ok(json) = serde_json::from_slice::<Value>(body) else {
        return SubmitOutcome::Rejected {
            errors: FieldErrors::new(),
            message: None,
        };
    };

    let message = json
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut errors = FieldErrors::new();
    if let Some(map) = json.get("errors").and_then(Value::as_object) {
        for (name, entry) in map {
            let Some(text) = first_message(entry) else {
                tracing::warn!(field = %name, "dropping error entry that is not a message");
                continue;
            };
            match Field::from_wire(name) {
                Some(field) => errors.set(field, text),
                None => tracing::warn!(field = %name, "dropping error for unknown field"),
            }
        }
    }

    SubmitOutcome::Rejected { errors, message }
}

fn first_message(entry: &Value) -> Option<String> {
    match entry {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(Value::as_str).map(str::to_string),
        _ => None,
    }
}
