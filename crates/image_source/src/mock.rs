//! Mock manifest / preloader
//!
//! For tests and pages without a network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use contracts::{ContractError, ManifestFetcher, Preloader};

#[derive(Debug, Clone)]
enum Behaviour {
    Entries(Vec<String>),
    Unavailable,
    NotAnArray,
}

/// Manifest fetcher with a fixed outcome that counts requests
#[derive(Debug)]
pub struct MockManifest {
    behaviour: Behaviour,
    calls: AtomicUsize,
    paths: Mutex<Vec<String>>,
}

impl MockManifest {
    fn with(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
            paths: Mutex::new(Vec::new()),
        }
    }

    /// Manifest returning `entries`
    pub fn entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with(Behaviour::Entries(entries.into_iter().map(Into::into).collect()))
    }

    /// Manifest that fails like a network error / 404
    pub fn unavailable() -> Self {
        Self::with(Behaviour::Unavailable)
    }

    /// Manifest that returns a JSON payload of the wrong shape
    pub fn not_an_array() -> Self {
        Self::with(Behaviour::NotAnArray)
    }

    /// Number of fetches issued
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Paths requested, in order
    pub fn requested_paths(&self) -> Vec<String> {
        self.paths.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl ManifestFetcher for MockManifest {
    async fn fetch(&self, manifest_path: &str) -> Result<Vec<String>, ContractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut paths) = self.paths.lock() {
            paths.push(manifest_path.to_string());
        }

        match &self.behaviour {
            Behaviour::Entries(entries) => Ok(entries.clone()),
            Behaviour::Unavailable => Err(ContractError::manifest_unavailable(
                manifest_path,
                "mock: unavailable",
            )),
            Behaviour::NotAnArray => Err(ContractError::manifest_shape(
                manifest_path,
                "mock: expected array, got object",
            )),
        }
    }
}

/// Preloader that records every requested identifier
#[derive(Debug, Default)]
pub struct RecordingPreloader {
    requested: Mutex<Vec<String>>,
}

impl RecordingPreloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifiers requested so far, in order
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Last identifier requested
    pub fn last(&self) -> Option<String> {
        self.requested.lock().ok().and_then(|r| r.last().cloned())
    }
}

impl Preloader for RecordingPreloader {
    fn preload(&self, id: &str) {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(id.to_string());
        }
    }
}
