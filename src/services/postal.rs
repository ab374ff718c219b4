//! CEP lookup client
//!
//! Calls `GET {base_url}/{zipcode}` on a BrasilAPI-compatible service. The
//! zipcode is sent as typed; format checks belong to the form schema.

use super::error::LookupError;
use super::traits::PostalLookup;
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

/// Street and city resolved from a CEP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
}

/// Subset of the CEP v2 response body we rely on
#[derive(Debug, Deserialize)]
struct CepResponse {
    #[serde(default)]
    street: Option<String>,
    #[serde(default)]
    city: Option<String>,
}

/// Client for the CEP lookup service
#[derive(Debug, Clone)]
pub struct CepClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CepClient {
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn lookup_url(&self, zipcode: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(zipcode);
        Ok(url)
    }
}

#[async_trait]
impl PostalLookup for CepClient {
    async fn lookup(&self, zipcode: &str) -> Result<Address, LookupError> {
        let url = self.lookup_url(zipcode)?;
        tracing::debug!(%url, "looking up CEP");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Transport {
                zipcode: zipcode.to_string(),
                source: e,
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound {
                zipcode: zipcode.to_string(),
            });
        }
        if !status.is_success() {
            return Err(LookupError::Status {
                zipcode: zipcode.to_string(),
                status: status.as_u16(),
            });
        }

        let body: CepResponse = resp.json().await.map_err(|e| LookupError::Malformed {
            zipcode: zipcode.to_string(),
            reason: e.to_string(),
        })?;

        match (body.street, body.city) {
            (Some(street), Some(city)) => Ok(Address { street, city }),
            _ => Err(LookupError::Malformed {
                zipcode: zipcode.to_string(),
                reason: "missing street or city".to_string(),
            }),
        }
    }
}
