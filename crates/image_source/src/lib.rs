//! # Image Source
//!
//! Resolves the ordered image list for one carousel root and provides the
//! fire-and-forget preloaders.
//!
//! Resolution order, first non-empty result wins:
//! 1. inline `data-srcs` (JSON array or CSV)
//! 2. remote `featured.json` manifest
//! 3. fallback list
//!
//! ## Usage
//!
//! ```ignore
//! use image_source::{HttpManifestFetcher, ImageSource};
//!
//! let fetcher = HttpManifestFetcher::from_settings(&blueprint.settings)?;
//! let source = ImageSource::new(&fetcher, &blueprint.settings.fallback_images);
//! let resolved = source.resolve(&config).await;
//! ```

mod inline;
mod manifest;
pub mod mock;
mod preload;
mod source;

pub use inline::parse_inline_list;
pub use manifest::{manifest_entries, HttpManifestFetcher};
pub use observability::SourceStep;
pub use preload::{HttpPreloader, NoopPreloader};
pub use source::{join_id, ImageSource, ResolvedImages};
