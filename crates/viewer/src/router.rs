//! InputRouter - routes one input event to at most one carousel and the overlay

use carousel::CarouselRegistry;
use contracts::{CarouselId, ClickTarget, InputEvent, Key, RootId};
use observability::record_input_ignored;
use serde::Serialize;
use tracing::{debug, trace};

use crate::gallery::Gallery;
use crate::overlay::Overlay;

/// What an input event ended up doing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Routed {
    Paused(CarouselId),
    Resumed(CarouselId),
    /// Thumbnail jump on a page without an overlay
    Jumped(CarouselId),
    OpenedFromCarousel(CarouselId),
    OpenedFromGallery(usize),
    Closed,
    Navigated(CarouselId),
    Detached(CarouselId),
    Ignored(&'static str),
}

/// Borrowed view of the page parts an event may touch
pub struct InputRouter<'a> {
    registry: &'a mut CarouselRegistry,
    overlay: Option<&'a mut Overlay>,
    gallery: Option<&'a Gallery>,
}

impl<'a> InputRouter<'a> {
    pub fn new(
        registry: &'a mut CarouselRegistry,
        overlay: Option<&'a mut Overlay>,
        gallery: Option<&'a Gallery>,
    ) -> Self {
        Self {
            registry,
            overlay,
            gallery,
        }
    }

    /// Apply `event` and report the outcome
    pub fn route(&mut self, event: &InputEvent) -> Routed {
        let routed = match event {
            InputEvent::PointerEnter(root) => self.hover(root, true),
            InputEvent::PointerLeave(root) => self.hover(root, false),
            InputEvent::Click(target) => self.click(target),
            InputEvent::Key(key) => self.key(key),
            InputEvent::Detach(root) => self.detach(root),
        };

        match &routed {
            Routed::Ignored(reason) => {
                trace!(?event, reason = *reason, "Input ignored");
                record_input_ignored(*reason);
            }
            outcome => debug!(?event, ?outcome, "Input routed"),
        }
        routed
    }

    fn attached(&self, root: &RootId) -> Result<CarouselId, Routed> {
        let id = self
            .registry
            .id_for_root(root.as_str())
            .ok_or(Routed::Ignored("unknown_root"))?;
        match self.registry.get(id) {
            Some(instance) if instance.is_attached() => Ok(id),
            _ => Err(Routed::Ignored("detached_root")),
        }
    }

    fn hover(&mut self, root: &RootId, entered: bool) -> Routed {
        let id = match self.attached(root) {
            Ok(id) => id,
            Err(ignored) => return ignored,
        };
        // The overlay's carousel stays paused until the overlay closes
        let bound = self
            .overlay
            .as_deref()
            .is_some_and(|overlay| overlay.is_open() && overlay.state().resume_target == Some(id));
        if bound {
            return Routed::Ignored("overlay_open");
        }
        let Some(instance) = self.registry.get_mut(id) else {
            return Routed::Ignored("unknown_root");
        };

        if entered {
            instance.on_hover_enter();
            Routed::Paused(id)
        } else {
            instance.on_hover_leave();
            Routed::Resumed(id)
        }
    }

    fn click(&mut self, target: &ClickTarget) -> Routed {
        match target {
            ClickTarget::Carousel(root) => self.open_from_carousel(root, None),
            ClickTarget::Thumbnail { root, index } => self.open_from_carousel(root, Some(*index)),
            ClickTarget::GalleryItem(index) => self.open_from_gallery(*index),
            ClickTarget::GalleryBackground => Routed::Ignored("gallery_background"),
            ClickTarget::OverlayBackdrop | ClickTarget::OverlayClose => self.close(),
            ClickTarget::OverlayImage => Routed::Ignored("overlay_image"),
        }
    }

    fn open_from_carousel(&mut self, root: &RootId, thumbnail: Option<usize>) -> Routed {
        let id = match self.attached(root) {
            Ok(id) => id,
            Err(ignored) => return ignored,
        };
        let Some(instance) = self.registry.get_mut(id) else {
            return Routed::Ignored("unknown_root");
        };

        if let Some(index) = thumbnail {
            if !instance.jump_to(index) {
                return Routed::Ignored("thumbnail_out_of_range");
            }
        }

        let Some(overlay) = self.overlay.as_deref_mut() else {
            // No overlay on the page: the jump stands, rotation continues
            return match thumbnail {
                Some(_) => Routed::Jumped(id),
                None => Routed::Ignored("no_overlay"),
            };
        };

        let image = instance.on_open_requested();
        overlay.open(&image.id, &image.alt_text, Some(id));
        Routed::OpenedFromCarousel(id)
    }

    fn open_from_gallery(&mut self, index: usize) -> Routed {
        let Some(gallery) = self.gallery else {
            return Routed::Ignored("no_gallery");
        };
        let Some((src, alt)) = gallery.overlay_image(index) else {
            return Routed::Ignored("gallery_item_without_source");
        };
        let Some(overlay) = self.overlay.as_deref_mut() else {
            return Routed::Ignored("no_overlay");
        };

        overlay.open(src, alt, None);
        Routed::OpenedFromGallery(index)
    }

    fn close(&mut self) -> Routed {
        let Some(overlay) = self.overlay.as_deref_mut() else {
            return Routed::Ignored("no_overlay");
        };
        if overlay.close(self.registry) {
            Routed::Closed
        } else {
            Routed::Ignored("overlay_closed")
        }
    }

    fn key(&mut self, key: &Key) -> Routed {
        if let Key::Escape = key {
            return self.close();
        }
        let Some(direction) = key.direction() else {
            return Routed::Ignored("unhandled_key");
        };
        let Some(overlay) = self.overlay.as_deref_mut() else {
            return Routed::Ignored("no_overlay");
        };
        if !overlay.listens_for_keys() {
            return Routed::Ignored("overlay_closed");
        }

        let target = overlay.state().resume_target;
        match target {
            Some(target) if overlay.navigate(direction, self.registry) => Routed::Navigated(target),
            _ => Routed::Ignored("no_navigable_target"),
        }
    }

    fn detach(&mut self, root: &RootId) -> Routed {
        let Some(id) = self.registry.id_for_root(root.as_str()) else {
            return Routed::Ignored("unknown_root");
        };
        match self.registry.get_mut(id) {
            Some(instance) => {
                instance.teardown();
                Routed::Detached(id)
            }
            None => Routed::Ignored("unknown_root"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{GalleryItem, GalleryMarkup, PageBlueprint, RootMarkup, StageVariant};
    use image_source::mock::{MockManifest, RecordingPreloader};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    async fn registry() -> CarouselRegistry {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut registry = CarouselRegistry::new(tx, Arc::new(RecordingPreloader::new()));
        let blueprint = PageBlueprint {
            carousels: vec![
                RootMarkup::new("a", StageVariant::Crossfade).with_attribute("data-srcs", "/a1.jpg,/a2.jpg,/a3.jpg"),
                RootMarkup::new("b", StageVariant::Toggle).with_attribute("data-srcs", "/b1.jpg,/b2.jpg"),
            ],
            ..Default::default()
        };
        registry.discover(&blueprint, &MockManifest::unavailable()).await;
        registry.start_all();
        registry
    }

    fn gallery() -> Gallery {
        Gallery::from_markup(Some(&GalleryMarkup {
            items: vec![
                GalleryItem {
                    src: Some("small.jpg".into()),
                    full: Some("large.jpg".into()),
                    ..Default::default()
                },
                GalleryItem::default(),
            ],
        }))
        .unwrap()
    }

    fn click(target: ClickTarget) -> InputEvent {
        InputEvent::Click(target)
    }

    #[tokio::test]
    async fn test_hover_pauses_and_resumes_one_carousel() {
        let mut registry = registry().await;
        let a = registry.id_for_root("a").unwrap();
        let b = registry.id_for_root("b").unwrap();
        let mut router = InputRouter::new(&mut registry, None, None);

        assert_eq!(router.route(&InputEvent::PointerEnter("a".into())), Routed::Paused(a));
        assert_eq!(router.route(&InputEvent::PointerEnter("zzz".into())), Routed::Ignored("unknown_root"));
        assert!(!registry.get(a).unwrap().is_running());
        assert!(registry.get(b).unwrap().is_running());

        let mut router = InputRouter::new(&mut registry, None, None);
        assert_eq!(router.route(&InputEvent::PointerLeave("a".into())), Routed::Resumed(a));
        assert!(registry.get(a).unwrap().is_running());
    }

    #[tokio::test]
    async fn test_click_opens_and_pauses() {
        let mut registry = registry().await;
        let a = registry.id_for_root("a").unwrap();
        let mut overlay = Overlay::default();

        let mut router = InputRouter::new(&mut registry, Some(&mut overlay), None);
        assert_eq!(router.route(&click(ClickTarget::Carousel("a".into()))), Routed::OpenedFromCarousel(a));

        assert!(!registry.get(a).unwrap().is_running());
        assert!(registry.get(registry.id_for_root("b").unwrap()).unwrap().is_running());
        assert_eq!(overlay.state().current_src.as_deref(), Some("/a1.jpg"));
        assert_eq!(overlay.state().resume_target, Some(a));
    }

    #[tokio::test]
    async fn test_hover_on_overlay_carousel_waits_for_close() {
        let mut registry = registry().await;
        let a = registry.id_for_root("a").unwrap();
        let b = registry.id_for_root("b").unwrap();
        let mut overlay = Overlay::default();
        let mut router = InputRouter::new(&mut registry, Some(&mut overlay), None);

        assert_eq!(router.route(&InputEvent::PointerEnter("a".into())), Routed::Paused(a));
        router.route(&click(ClickTarget::Carousel("a".into())));
        assert_eq!(router.route(&InputEvent::PointerLeave("a".into())), Routed::Ignored("overlay_open"));
        assert_eq!(router.route(&InputEvent::PointerEnter("a".into())), Routed::Ignored("overlay_open"));
        // Other carousels still follow the pointer
        assert_eq!(router.route(&InputEvent::PointerEnter("b".into())), Routed::Paused(b));
        assert!(!registry.get(a).unwrap().is_running());

        let mut router = InputRouter::new(&mut registry, Some(&mut overlay), None);
        assert_eq!(router.route(&InputEvent::Key(Key::Escape)), Routed::Closed);
        assert!(registry.get(a).unwrap().is_running());
        assert!(!registry.get(b).unwrap().is_running());
    }

    #[tokio::test]
    async fn test_thumbnail_click_jumps_then_opens() {
        let mut registry = registry().await;
        let a = registry.id_for_root("a").unwrap();
        let mut overlay = Overlay::default();

        let mut router = InputRouter::new(&mut registry, Some(&mut overlay), None);
        let routed = router.route(&click(ClickTarget::Thumbnail { root: "a".into(), index: 2 }));
        assert_eq!(routed, Routed::OpenedFromCarousel(a));
        let routed = router.route(&click(ClickTarget::Thumbnail { root: "a".into(), index: 7 }));
        assert_eq!(routed, Routed::Ignored("thumbnail_out_of_range"));

        assert_eq!(registry.get(a).unwrap().current_index(), 2);
        assert_eq!(overlay.state().current_src.as_deref(), Some("/a3.jpg"));
    }

    #[tokio::test]
    async fn test_clicks_without_overlay_never_pause() {
        let mut registry = registry().await;
        let a = registry.id_for_root("a").unwrap();
        let mut router = InputRouter::new(&mut registry, None, None);

        assert_eq!(router.route(&click(ClickTarget::Carousel("a".into()))), Routed::Ignored("no_overlay"));
        let routed = router.route(&click(ClickTarget::Thumbnail { root: "a".into(), index: 1 }));
        assert_eq!(routed, Routed::Jumped(a));

        let instance = registry.get(a).unwrap();
        assert!(instance.is_running());
        assert_eq!(instance.current_index(), 1);
    }

    #[tokio::test]
    async fn test_escape_and_backdrop_close() {
        let mut registry = registry().await;
        let a = registry.id_for_root("a").unwrap();
        let mut overlay = Overlay::default();
        let mut router = InputRouter::new(&mut registry, Some(&mut overlay), None);

        assert_eq!(router.route(&InputEvent::Key(Key::Escape)), Routed::Ignored("overlay_closed"));
        router.route(&click(ClickTarget::Carousel("a".into())));
        assert_eq!(router.route(&click(ClickTarget::OverlayImage)), Routed::Ignored("overlay_image"));
        assert_eq!(router.route(&InputEvent::Key(Key::Escape)), Routed::Closed);

        router.route(&click(ClickTarget::Carousel("a".into())));
        assert_eq!(router.route(&click(ClickTarget::OverlayBackdrop)), Routed::Closed);
        router.route(&click(ClickTarget::Carousel("a".into())));
        assert_eq!(router.route(&click(ClickTarget::OverlayClose)), Routed::Closed);

        assert!(!overlay.is_open());
        assert!(registry.get(a).unwrap().is_running());
    }

    #[tokio::test]
    async fn test_arrow_keys_navigate_bound_carousel() {
        let mut registry = registry().await;
        let a = registry.id_for_root("a").unwrap();
        let mut overlay = Overlay::default();
        let mut router = InputRouter::new(&mut registry, Some(&mut overlay), None);

        assert_eq!(router.route(&InputEvent::Key(Key::ArrowRight)), Routed::Ignored("overlay_closed"));
        router.route(&click(ClickTarget::Carousel("a".into())));
        assert_eq!(router.route(&InputEvent::Key(Key::ArrowRight)), Routed::Navigated(a));
        assert_eq!(router.route(&InputEvent::Key(Key::ArrowRight)), Routed::Navigated(a));
        assert_eq!(router.route(&InputEvent::Key(Key::ArrowLeft)), Routed::Navigated(a));
        assert_eq!(router.route(&InputEvent::Key(Key::Other("Enter".into()))), Routed::Ignored("unhandled_key"));

        assert_eq!(overlay.state().current_src.as_deref(), Some("/a2.jpg"));
        // Navigation while open leaves the carousel paused
        assert!(!registry.get(a).unwrap().is_running());
    }

    #[tokio::test]
    async fn test_detached_root_ignores_input() {
        let mut registry = registry().await;
        let a = registry.id_for_root("a").unwrap();
        let mut overlay = Overlay::default();
        let mut router = InputRouter::new(&mut registry, Some(&mut overlay), None);

        router.route(&click(ClickTarget::Carousel("a".into())));
        assert_eq!(router.route(&InputEvent::Detach("a".into())), Routed::Detached(a));
        assert_eq!(router.route(&InputEvent::Key(Key::ArrowRight)), Routed::Ignored("no_navigable_target"));
        assert_eq!(router.route(&InputEvent::PointerLeave("a".into())), Routed::Ignored("detached_root"));
        assert_eq!(router.route(&InputEvent::Key(Key::Escape)), Routed::Closed);

        let instance = registry.get(a).unwrap();
        assert_eq!(instance.current_index(), 0);
        assert!(!instance.is_running());
    }

    #[tokio::test]
    async fn test_gallery_click_opens_without_target() {
        let mut registry = registry().await;
        let gallery = gallery();
        let mut overlay = Overlay::default();
        let mut router = InputRouter::new(&mut registry, Some(&mut overlay), Some(&gallery));

        assert_eq!(router.route(&click(ClickTarget::GalleryItem(1))), Routed::Ignored("gallery_item_without_source"));
        assert_eq!(router.route(&click(ClickTarget::GalleryBackground)), Routed::Ignored("gallery_background"));
        assert_eq!(router.route(&click(ClickTarget::GalleryItem(0))), Routed::OpenedFromGallery(0));
        assert_eq!(router.route(&InputEvent::Key(Key::ArrowRight)), Routed::Ignored("no_navigable_target"));
        assert_eq!(router.route(&InputEvent::Key(Key::Escape)), Routed::Closed);

        assert_eq!(overlay.state().current_src, None);
        assert!(registry.iter().all(|c| c.is_running()));
    }
}
