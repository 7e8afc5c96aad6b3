//! Overlay - the single page-wide full-size image viewer
//!
//! The overlay does not know which carousel opened it beyond the
//! `resume_target` handle, which is written only by [`Overlay::open`] and
//! cleared only by [`Overlay::close`].

use carousel::CarouselRegistry;
use contracts::{CarouselId, Direction, OverlayMarkup};
use observability::record_overlay_open;
use serde::Serialize;
use tracing::{debug, instrument};

/// Observable overlay state
///
/// `current_src` is `Some` exactly when `is_open`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverlayState {
    pub is_open: bool,
    pub current_src: Option<String>,
    pub current_alt: Option<String>,
    pub resume_target: Option<CarouselId>,
}

/// Input focus as far as the overlay is concerned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Focus {
    #[default]
    Page,
    CloseControl,
}

/// Shared overlay
#[derive(Debug, Default)]
pub struct Overlay {
    state: OverlayState,
    focus: Focus,
    key_listener: bool,
}

impl Overlay {
    /// Build the overlay if its markup is complete.
    ///
    /// A page without an overlay root, image element or close control gets
    /// `None` and runs without click-to-enlarge.
    pub fn from_markup(markup: Option<&OverlayMarkup>) -> Option<Self> {
        match markup {
            Some(markup) if markup.is_complete() => Some(Self::default()),
            Some(markup) => {
                debug!(
                    image = markup.image,
                    close_control = markup.close_control,
                    "Overlay markup incomplete, overlay disabled"
                );
                None
            }
            None => {
                debug!("No overlay markup, overlay disabled");
                None
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Whether the transient Escape/Arrow listener is armed
    pub fn listens_for_keys(&self) -> bool {
        self.key_listener
    }

    /// Show `src` full-size. Opening while open replaces image and target.
    #[instrument(level = "debug", name = "overlay_open", skip(self, alt))]
    pub fn open(&mut self, src: &str, alt: &str, resume_target: Option<CarouselId>) {
        let replaced = self.state.is_open;
        self.display(src, alt);
        self.state.resume_target = resume_target;
        self.focus = Focus::CloseControl;
        self.key_listener = true;

        record_overlay_open(if resume_target.is_some() { "carousel" } else { "gallery" });
        debug!(replaced, "Overlay opened");
    }

    /// Hide the overlay and resume the carousel that opened it.
    ///
    /// Returns `false` if the overlay was already closed.
    #[instrument(level = "debug", name = "overlay_close", skip(self, registry))]
    pub fn close(&mut self, registry: &mut CarouselRegistry) -> bool {
        if !self.state.is_open {
            return false;
        }

        self.state.is_open = false;
        self.state.current_src = None;
        self.state.current_alt = None;
        self.key_listener = false;
        self.focus = Focus::Page;

        if let Some(target) = self.state.resume_target.take() {
            match registry.get_mut(target) {
                Some(instance) => {
                    instance.start();
                    debug!(%target, running = instance.is_running(), "Resumed carousel");
                }
                None => debug!(%target, "Resume target no longer registered"),
            }
        }
        true
    }

    /// Move the bound carousel and show its new current image.
    ///
    /// Ignored when closed, when opened without a carousel, or when the
    /// carousel's root has been detached. Returns whether anything moved.
    #[instrument(level = "debug", name = "overlay_navigate", skip(self, registry))]
    pub fn navigate(&mut self, direction: Direction, registry: &mut CarouselRegistry) -> bool {
        if !self.state.is_open {
            return false;
        }
        let Some(target) = self.state.resume_target else {
            return false;
        };
        let Some(instance) = registry.get_mut(target) else {
            return false;
        };
        if !instance.is_attached() {
            debug!(%target, "Bound carousel detached, navigation ignored");
            return false;
        }

        instance.navigate(direction);
        let image = instance.current_image().clone();
        self.display(&image.id, &image.alt_text);
        true
    }

    fn display(&mut self, src: &str, alt: &str) {
        self.state.is_open = true;
        self.state.current_src = Some(src.to_string());
        self.state.current_alt = Some(alt.to_string());
    }
}
