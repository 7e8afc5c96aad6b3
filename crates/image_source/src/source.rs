//! ImageSource - ordered image list resolution for one carousel root

use contracts::{default_fallback_images, CarouselConfig, ImageRef, ManifestFetcher};
use observability::{record_manifest_absent, record_source_resolved, SourceStep};
use tracing::{debug, instrument, warn};

use crate::inline::parse_inline_list;

/// Resolved image list together with the step that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImages {
    /// Raw entries as listed by the winning step (before base-dir joining)
    pub entries: Vec<String>,
    /// Images with identifiers joined onto the base directory; never empty
    pub images: Vec<ImageRef>,
    /// Which step won
    pub step: SourceStep,
}

/// Resolves image lists: inline, then manifest, then fallback
pub struct ImageSource<'a, F> {
    fetcher: &'a F,
    fallback: &'a [String],
}

impl<'a, F: ManifestFetcher> ImageSource<'a, F> {
    /// Create a source using `fetcher` for manifests and `fallback` as the last resort.
    ///
    /// An empty `fallback` is replaced by the built-in list.
    pub fn new(fetcher: &'a F, fallback: &'a [String]) -> Self {
        Self { fetcher, fallback }
    }

    /// Resolve the image list for `config`. Never empty, never fails.
    #[instrument(
        name = "image_source_resolve",
        skip(self, config),
        fields(root_id = %config.root_id)
    )]
    pub async fn resolve(&self, config: &CarouselConfig) -> ResolvedImages {
        let (entries, step) = self.resolve_entries(config).await;
        let images = entries
            .iter()
            .map(|entry| ImageRef::new(join_id(&config.base_dir, entry), config.alt_text.clone()))
            .collect::<Vec<_>>();

        record_source_resolved(step, images.len());
        debug!(step = step.as_str(), count = images.len(), "Image list resolved");

        ResolvedImages {
            entries,
            images,
            step,
        }
    }

    async fn resolve_entries(&self, config: &CarouselConfig) -> (Vec<String>, SourceStep) {
        if let Some(raw) = config.inline_srcs.as_deref() {
            let entries = parse_inline_list(raw);
            if !entries.is_empty() {
                return (entries, SourceStep::Inline);
            }
            debug!(raw, "Inline list yielded no entries, trying manifest");
        }

        let manifest_path = config.manifest_path();
        match self.fetcher.fetch(&manifest_path).await {
            Ok(entries) if !entries.is_empty() => return (entries, SourceStep::Manifest),
            Ok(_) => {
                record_manifest_absent("empty");
                debug!(path = %manifest_path, "Manifest has no usable entries");
            }
            Err(e) => {
                record_manifest_absent("unavailable");
                debug!(path = %manifest_path, error = %e, "Manifest absent");
            }
        }

        (self.fallback_entries(), SourceStep::Fallback)
    }

    fn fallback_entries(&self) -> Vec<String> {
        let entries: Vec<String> = self
            .fallback
            .iter()
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect();

        if entries.is_empty() {
            warn!("Configured fallback list is empty, using built-in list");
            default_fallback_images()
        } else {
            entries
        }
    }
}

/// Join an entry onto the base directory unless it is already absolute
/// (`/path`, `scheme://…`, `data:`).
pub fn join_id(base_dir: &str, entry: &str) -> String {
    let absolute = entry.starts_with('/') || entry.contains("://") || entry.starts_with("data:");
    if absolute {
        entry.to_string()
    } else {
        format!("{base_dir}{entry}")
    }
}
