//! Image data-source traits - manifest lookup and preloading
//!
//! Both are collaborators outside the carousel state machine: the manifest is
//! an opaque list provider, preloading is a side effect nobody waits on.

use crate::ContractError;

/// Remote manifest lookup
///
/// Implementations fetch `<base_dir>featured.json` and return its string
/// entries. Any error is treated by callers as "no manifest".
#[trait_variant::make(ManifestFetcher: Send)]
pub trait LocalManifestFetcher {
    /// Fetch the manifest found at `manifest_path` (relative to the page origin)
    ///
    /// # Errors
    /// Network failure, non-2xx status, or a payload that is not a JSON array
    async fn fetch(&self, manifest_path: &str) -> Result<Vec<String>, ContractError>;
}

/// Fire-and-forget image preloading
///
/// `preload` must return immediately; the load happens in the background and
/// its outcome is never reported to the caller.
pub trait Preloader: Send + Sync {
    /// Begin loading `id`
    fn preload(&self, id: &str);
}
