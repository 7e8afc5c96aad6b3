//! Gallery - free-standing media that opens straight into the overlay

use contracts::{GalleryItem, GalleryMarkup, DEFAULT_ALT_TEXT};

/// Media elements outside any carousel
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    items: Vec<GalleryItem>,
}

impl Gallery {
    pub fn from_markup(markup: Option<&GalleryMarkup>) -> Option<Self> {
        markup.map(|markup| Self {
            items: markup.items.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Source and alt text to show for item `index`.
    ///
    /// `None` for unknown indices and items without any usable source.
    pub fn overlay_image(&self, index: usize) -> Option<(&str, &str)> {
        let item = self.items.get(index)?;
        let src = item.overlay_source()?;
        let alt = item
            .alt
            .as_deref()
            .filter(|alt| !alt.is_empty())
            .unwrap_or(DEFAULT_ALT_TEXT);
        Some((src, alt))
    }
}
