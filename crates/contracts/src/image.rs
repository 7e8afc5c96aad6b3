//! ImageRef / CarouselId - resolved image identity and carousel handles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Alt text used when a root does not carry `data-alt`
pub const DEFAULT_ALT_TEXT: &str = "Featured image";

/// A resolved image: path or URL plus its alt text.
///
/// Immutable once resolved; carousels and the overlay only ever clone it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    /// Path or URL of the image
    pub id: String,
    /// Alternative text shown by the overlay
    pub alt_text: String,
}

impl ImageRef {
    /// Create a new image reference
    pub fn new(id: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            alt_text: alt_text.into(),
        }
    }
}

/// Registry handle for an initialised carousel instance.
///
/// Handed out in initialisation order; never reused within one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CarouselId(pub u32);

impl fmt::Display for CarouselId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "carousel#{}", self.0)
    }
}
