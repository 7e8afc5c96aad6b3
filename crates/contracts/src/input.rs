//! Input events - what the page feeds into the viewer event loop

use serde::{Deserialize, Serialize};

use crate::RootId;

/// Keyboard keys the viewer reacts to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    /// Any other key, ignored
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            other => Self::Other(other.to_string()),
        }
    }

    /// Navigation direction, if this is an arrow key
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::ArrowLeft => Some(Direction::Backward),
            Self::ArrowRight => Some(Direction::Forward),
            _ => None,
        }
    }
}

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

/// What a click landed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickTarget {
    /// The carousel root (or its current slide)
    Carousel(RootId),
    /// A thumbnail inside a carousel root
    Thumbnail { root: RootId, index: usize },
    /// A media element in the gallery, by position
    GalleryItem(usize),
    /// Gallery container outside any media element
    GalleryBackground,
    /// The overlay root itself (backdrop)
    OverlayBackdrop,
    /// The overlay's displayed image
    OverlayImage,
    /// The overlay close control
    OverlayClose,
}

/// A single page input event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerEnter(RootId),
    PointerLeave(RootId),
    Click(ClickTarget),
    /// Page-global key press
    Key(Key),
    /// Root removed from the document
    Detach(RootId),
}
