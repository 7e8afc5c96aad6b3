//! # Contracts
//!
//! Frozen interface contracts shared by every carousel/viewer crate.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Identity Model
//! - `RootId` names a markup root (the `id` of the carousel element on the page)
//! - `CarouselId` is the handle the registry hands out once a root is initialised

mod blueprint;
mod carousel_config;
mod error;
mod image;
mod input;
mod root_id;
mod source;

pub use blueprint::*;
pub use carousel_config::*;
pub use error::*;
pub use image::*;
pub use input::*;
pub use root_id::RootId;
pub use source::{LocalManifestFetcher, ManifestFetcher, Preloader};
