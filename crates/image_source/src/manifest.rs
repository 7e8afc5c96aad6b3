//! HttpManifestFetcher - `featured.json` lookup over HTTP

use std::time::Duration;

use contracts::{ContractError, ManifestFetcher, ViewerSettings};
use reqwest::header::{HeaderValue, CACHE_CONTROL};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::inline::{json_kind, string_entries};
use crate::HttpPreloader;

/// Fetches manifests relative to the page origin.
///
/// Without an origin every fetch reports the manifest as unavailable, which
/// callers treat the same as a missing file.
#[derive(Debug, Clone)]
pub struct HttpManifestFetcher {
    client: reqwest::Client,
    origin: Option<Url>,
}

impl HttpManifestFetcher {
    /// Create a fetcher for `origin` with a request timeout
    ///
    /// # Errors
    /// Invalid origin URL or HTTP client construction failure
    pub fn new(origin: Option<&str>, timeout: Duration) -> Result<Self, ContractError> {
        let origin = origin
            .map(|raw| {
                Url::parse(raw).map_err(|e| {
                    ContractError::config_validation("settings.origin", format!("invalid origin '{raw}': {e}"))
                })
            })
            .transpose()?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ContractError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, origin })
    }

    /// Create a fetcher from viewer settings
    ///
    /// # Errors
    /// See [`HttpManifestFetcher::new`]
    pub fn from_settings(settings: &ViewerSettings) -> Result<Self, ContractError> {
        Self::new(
            settings.origin.as_deref(),
            Duration::from_millis(settings.manifest_timeout_ms),
        )
    }

    /// Preloader sharing this fetcher's client and origin
    pub fn preloader(&self) -> HttpPreloader {
        HttpPreloader::new(self.client.clone(), self.origin.clone())
    }

    fn manifest_url(&self, manifest_path: &str) -> Result<Url, ContractError> {
        let origin = self
            .origin
            .as_ref()
            .ok_or_else(|| ContractError::manifest_unavailable(manifest_path, "no origin configured"))?;

        origin
            .join(manifest_path)
            .map_err(|e| ContractError::manifest_unavailable(manifest_path, e.to_string()))
    }
}

impl ManifestFetcher for HttpManifestFetcher {
    #[instrument(name = "manifest_fetch", skip(self))]
    async fn fetch(&self, manifest_path: &str) -> Result<Vec<String>, ContractError> {
        let url = self.manifest_url(manifest_path)?;

        let response = self
            .client
            .get(url.clone())
            .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
            .send()
            .await
            .map_err(|e| ContractError::manifest_unavailable(url.as_str(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContractError::manifest_unavailable(
                url.as_str(),
                format!("status {status}"),
            ));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ContractError::manifest_shape(url.as_str(), e.to_string()))?;

        let entries = manifest_entries(&payload)
            .ok_or_else(|| ContractError::manifest_shape(url.as_str(), format!("expected array, got {}", json_kind(&payload))))?;

        debug!(url = %url, entries = entries.len(), "Manifest fetched");
        Ok(entries)
    }
}

/// Extract manifest entries: `Some` only for a JSON array, keeping trimmed
/// non-empty strings.
pub fn manifest_entries(payload: &Value) -> Option<Vec<String>> {
    match payload {
        Value::Array(values) => Some(string_entries(values)),
        _ => None,
    }
}
