//! Slide stage - the elements a carousel shows and which one is active
//!
//! The active marker is stored as a single index, so every observable stage
//! has exactly one active element: moving it sets the new one and clears the
//! old one in the same assignment.

use contracts::{ChildImage, ImageRef};
use serde::Serialize;

/// Where a slide element came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElementOrigin {
    /// Pre-rendered in the markup and reused
    Markup,
    /// Created by the carousel
    Created,
}

/// One image element inside a carousel root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideElement {
    pub src: String,
    pub alt: String,
    pub origin: ElementOrigin,
}

impl SlideElement {
    fn created(image: &ImageRef) -> Self {
        Self {
            src: image.id.clone(),
            alt: image.alt_text.clone(),
            origin: ElementOrigin::Created,
        }
    }
}

/// Presentation of a carousel's slides
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Stage {
    /// One element per image; the active element is the current image
    Toggle {
        elements: Vec<SlideElement>,
        active: usize,
    },
    /// Two elements swapping active/buffer roles
    Crossfade {
        slots: [SlideElement; 2],
        active: usize,
    },
}

impl Stage {
    /// Toggle stage with one created element per image
    pub fn toggle(images: &[ImageRef], initial: usize) -> Self {
        Self::Toggle {
            elements: images.iter().map(SlideElement::created).collect(),
            active: initial,
        }
    }

    /// Toggle stage reusing pre-rendered children as its elements.
    ///
    /// The first child carrying the active marker becomes active, or the
    /// first child when none does. Returns the stage and the initial index.
    pub fn from_children(children: &[ChildImage], default_alt: &str) -> (Self, usize) {
        let elements = children
            .iter()
            .map(|child| SlideElement {
                src: child.src.clone(),
                alt: child.alt.clone().unwrap_or_else(|| default_alt.to_string()),
                origin: ElementOrigin::Markup,
            })
            .collect();
        let active = children.iter().position(|c| c.active).unwrap_or(0);

        (Self::Toggle { elements, active }, active)
    }

    /// Crossfade stage showing `first` in the active slot.
    ///
    /// A pre-rendered child is reused as the active slot; the buffer slot is
    /// always created.
    pub fn crossfade(first: &ImageRef, reused: Option<&ChildImage>) -> Self {
        let mut active = SlideElement::created(first);
        if reused.is_some() {
            active.origin = ElementOrigin::Markup;
        }
        let buffer = SlideElement {
            src: String::new(),
            alt: first.alt_text.clone(),
            origin: ElementOrigin::Created,
        };

        Self::Crossfade {
            slots: [active, buffer],
            active: 0,
        }
    }

    /// Make `image` (at `index` in the carousel's list) the visible slide.
    ///
    /// Crossfade: the buffer's source is set before the roles swap, so the
    /// incoming slide is already loading when the fade starts.
    pub fn show(&mut self, index: usize, image: &ImageRef) {
        match self {
            Self::Toggle { elements, active } => {
                if index < elements.len() {
                    *active = index;
                }
            }
            Self::Crossfade { slots, active } => {
                let buffer = 1 - *active;
                slots[buffer].src = image.id.clone();
                slots[buffer].alt = image.alt_text.clone();
                *active = buffer;
            }
        }
    }

    /// The active element
    pub fn active_element(&self) -> &SlideElement {
        match self {
            Self::Toggle { elements, active } => &elements[*active],
            Self::Crossfade { slots, active } => &slots[*active],
        }
    }

    /// All elements with their active marker
    pub fn elements(&self) -> Vec<(&SlideElement, bool)> {
        match self {
            Self::Toggle { elements, active } => elements
                .iter()
                .enumerate()
                .map(|(i, e)| (e, i == *active))
                .collect(),
            Self::Crossfade { slots, active } => slots
                .iter()
                .enumerate()
                .map(|(i, e)| (e, i == *active))
                .collect(),
        }
    }

    /// Number of elements carrying the active marker
    pub fn active_count(&self) -> usize {
        self.elements().iter().filter(|(_, active)| *active).count()
    }
}
