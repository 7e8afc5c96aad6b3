//! # Viewer
//!
//! The shared overlay, input routing and the page event loop.
//!
//! Responsibilities:
//! - Keep the single page-wide overlay (open/close/navigate)
//! - Route pointer, click and keyboard input to exactly one carousel and/or the overlay
//! - Open gallery media directly, without a carousel to resume
//! - Drive every carousel timer and input event on one loop

pub mod error;
pub mod gallery;
pub mod overlay;
pub mod page;
pub mod router;

pub use error::ViewerError;
pub use gallery::Gallery;
pub use overlay::{Focus, Overlay, OverlayState};
pub use page::{InputSender, Page, PageHandle, PageSnapshot, Step};
pub use router::{InputRouter, Routed};
