//! Preloaders - warm the next image without anyone waiting on it

use contracts::Preloader;
use reqwest::Url;
use tracing::{debug, trace};

/// Issues a background GET for each preloaded image and drops the body.
///
/// Relative identifiers are resolved against the page origin. Failures (bad
/// URL, no runtime, network error) are logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct HttpPreloader {
    client: reqwest::Client,
    origin: Option<Url>,
}

impl HttpPreloader {
    /// Create a preloader sharing `client`
    pub fn new(client: reqwest::Client, origin: Option<Url>) -> Self {
        Self { client, origin }
    }

    fn resolve(&self, id: &str) -> Option<Url> {
        match Url::parse(id) {
            Ok(url) => Some(url),
            Err(_) => self.origin.as_ref().and_then(|origin| origin.join(id).ok()),
        }
    }
}

impl Preloader for HttpPreloader {
    fn preload(&self, id: &str) {
        let Some(url) = self.resolve(id) else {
            trace!(id, "Preload skipped, identifier has no URL");
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            trace!(id, "Preload skipped, no async runtime");
            return;
        };

        let client = self.client.clone();
        runtime.spawn(async move {
            match client.get(url.clone()).send().await {
                Ok(response) => {
                    // Drain so the connection is reusable
                    let _ = response.bytes().await;
                    trace!(url = %url, "Preloaded");
                }
                Err(e) => debug!(url = %url, error = %e, "Preload failed"),
            }
        });
    }
}

/// Preloader that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPreloader;

impl Preloader for NoopPreloader {
    fn preload(&self, _id: &str) {}
}
