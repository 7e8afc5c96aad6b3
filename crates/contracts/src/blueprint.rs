//! PageBlueprint - Config Loader output
//!
//! Describes the markup of one page: the overlay, every carousel root with its
//! raw attributes and pre-rendered children, and the direct-click gallery.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::RootId;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete page description
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Viewer-wide settings (origin, fallbacks, timeouts)
    #[serde(default)]
    pub settings: ViewerSettings,

    /// Overlay markup; `None` when the page has no overlay root
    #[serde(default)]
    pub overlay: Option<OverlayMarkup>,

    /// Carousel roots in document order
    #[serde(default)]
    pub carousels: Vec<RootMarkup>,

    /// Direct-click gallery container
    #[serde(default)]
    pub gallery: Option<GalleryMarkup>,
}

/// Viewer-wide settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ViewerSettings {
    /// Origin used to turn relative manifest/preload paths into URLs
    #[serde(default)]
    #[validate(length(min = 1))]
    pub origin: Option<String>,

    /// Manifest fetch timeout in milliseconds
    #[serde(default = "default_manifest_timeout_ms")]
    #[validate(range(min = 1))]
    pub manifest_timeout_ms: u64,

    /// Fallback image list used when neither inline list nor manifest yields anything
    #[serde(default = "default_fallback_images")]
    pub fallback_images: Vec<String>,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            origin: None,
            manifest_timeout_ms: default_manifest_timeout_ms(),
            fallback_images: default_fallback_images(),
        }
    }
}

fn default_manifest_timeout_ms() -> u64 {
    5000
}

/// Built-in fallback list
pub fn default_fallback_images() -> Vec<String> {
    vec![
        "hero1.jpg".to_string(),
        "hero2.jpg".to_string(),
        "hero3.jpg".to_string(),
    ]
}

/// Overlay markup: one root holding an image element and a close control
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OverlayMarkup {
    /// Image-display element present
    #[serde(default = "default_true")]
    pub image: bool,
    /// Close-control element present
    #[serde(default = "default_true")]
    pub close_control: bool,
}

impl OverlayMarkup {
    /// Both required elements are present
    pub fn is_complete(&self) -> bool {
        self.image && self.close_control
    }
}

impl Default for OverlayMarkup {
    fn default() -> Self {
        Self {
            image: true,
            close_control: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// How a carousel presents its slides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageVariant {
    /// Two elements (active + buffer) crossfading
    Crossfade,
    /// One element per image, visibility toggled
    #[default]
    Toggle,
}

/// One carousel root element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootMarkup {
    /// Root element id
    pub root_id: RootId,

    /// Home root, initialised before the generic sweep
    #[serde(default)]
    pub home: bool,

    /// Picked up by the generic "all carousels" sweep
    #[serde(default = "default_true")]
    pub sweep: bool,

    /// Presentation variant
    #[serde(default)]
    pub variant: StageVariant,

    /// Raw `data-*` attributes (`data-interval`, `data-srcs`, `data-srcdir`, `data-alt`)
    #[serde(default)]
    pub attributes: HashMap<String, String>,

    /// Pre-rendered image children, reused instead of recreated
    #[serde(default)]
    pub children: Vec<ChildImage>,
}

impl RootMarkup {
    /// Create a bare root with no attributes or children
    pub fn new(root_id: impl Into<RootId>, variant: StageVariant) -> Self {
        Self {
            root_id: root_id.into(),
            home: false,
            sweep: true,
            variant,
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Set a raw attribute
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Look up a raw attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A pre-rendered `<img>` child of a carousel root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildImage {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    /// Carries the "active" marker in the markup
    #[serde(default)]
    pub active: bool,
}

/// Gallery container of free-standing media
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryMarkup {
    #[serde(default)]
    pub items: Vec<GalleryItem>,
}

/// Media element kind inside a gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    #[default]
    Img,
    Video,
}

/// One `img`/`video` element inside the gallery
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(default)]
    pub kind: MediaKind,
    /// Declared `src`
    #[serde(default)]
    pub src: Option<String>,
    /// Source the element actually rendered (srcset pick)
    #[serde(default)]
    pub current_src: Option<String>,
    /// Explicit full-size override (`data-full`)
    #[serde(default)]
    pub full: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

impl GalleryItem {
    /// Source the overlay should display: full-size override first, then the
    /// rendered source, then the declared one. Empty strings count as absent.
    pub fn overlay_source(&self) -> Option<&str> {
        [&self.full, &self.current_src, &self.src]
            .into_iter()
            .filter_map(|s| s.as_deref())
            .find(|s| !s.trim().is_empty())
    }
}
