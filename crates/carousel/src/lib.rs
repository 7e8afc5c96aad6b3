//! # Carousel
//!
//! Timer-driven image rotation for independent carousel roots.
//!
//! Responsibilities:
//! - Own one index, one stage and at most one rotation timer per root
//! - Move forward/backward/jump with wrap-around, keeping exactly one active element
//! - Pause/resume on hover and on overlay hand-off
//! - Initialise every markup root exactly once
//!
//! Timers never touch carousel state directly: they only emit [`Tick`]s into
//! a channel drained by the owning event loop, which applies them through
//! [`CarouselInstance::on_tick`].
//!
//! ## Usage
//!
//! ```ignore
//! use carousel::CarouselRegistry;
//! use tokio::sync::mpsc;
//!
//! let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
//! let mut registry = CarouselRegistry::new(tick_tx, preloader);
//! registry.discover(&blueprint, &fetcher).await;
//! registry.start_all();
//!
//! while let Some(tick) = tick_rx.recv().await {
//!     registry.apply_tick(tick);
//! }
//! ```

mod error;
mod instance;
mod registry;
mod stage;
mod timer;

pub use error::CarouselError;
pub use instance::{CarouselInstance, CarouselSetup, CarouselSnapshot};
pub use registry::CarouselRegistry;
pub use stage::{ElementOrigin, SlideElement, Stage};
pub use timer::{RotationTimer, Tick, TickSender};
