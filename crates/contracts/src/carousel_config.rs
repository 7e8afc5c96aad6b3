//! Carousel configuration contracts, interpreted from root attributes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ChildImage, RootId, StageVariant};

/// Rotation interval used when `data-interval` is absent or invalid
pub const DEFAULT_INTERVAL_MS: u64 = 5000;

/// Manifest base directory used when `data-srcdir` is absent
pub const DEFAULT_BASE_DIR: &str = "assets/images/front_page/";

/// Manifest file looked up under the base directory
pub const MANIFEST_FILE: &str = "featured.json";

/// Raw attribute names on a carousel root
pub mod attr {
    pub const INTERVAL: &str = "data-interval";
    pub const SRCS: &str = "data-srcs";
    pub const SRCDIR: &str = "data-srcdir";
    pub const ALT: &str = "data-alt";
}

/// Interpreted configuration for one carousel root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Root the configuration was read from
    pub root_id: RootId,

    /// Presentation variant
    pub variant: StageVariant,

    /// Rotation interval (always > 0)
    pub interval: Duration,

    /// Raw inline image list (CSV or JSON), untouched
    pub inline_srcs: Option<String>,

    /// Normalised base directory, always ending in exactly one `/`
    pub base_dir: String,

    /// Alt text applied to resolved images
    pub alt_text: String,

    /// Pre-rendered children
    pub children: Vec<ChildImage>,
}

impl CarouselConfig {
    /// Manifest path relative to the page origin
    pub fn manifest_path(&self) -> String {
        format!("{}{}", self.base_dir, MANIFEST_FILE)
    }
}
