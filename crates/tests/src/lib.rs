//! # Integration Tests
//!
//! End-to-end scenarios across the workspace.
//!
//! Covers:
//! - Page description -> registry -> running carousels
//! - Overlay hand-off between carousels and the gallery
//! - Image list resolution order as seen from a page

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
        assert_eq!(contracts::DEFAULT_INTERVAL_MS, 5000);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;
    use std::time::Duration;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ClickTarget, InputEvent, Key, PageBlueprint};
    use image_source::mock::{MockManifest, RecordingPreloader};
    use tokio::time::sleep;
    use viewer::{Page, Routed};

    const PAGE: &str = r#"
[settings]
fallback_images = ["hero1.jpg", "hero2.jpg", "hero3.jpg"]

[overlay]

[[carousels]]
root_id = "rotator"
home = true
variant = "crossfade"
[carousels.attributes]
data-srcs = '["a.jpg","b.jpg","c.jpg"]'
data-srcdir = "/img"

[[carousels]]
root_id = "thumbs"
[carousels.attributes]
data-interval = "2000"
[[carousels.children]]
src = "/t/1.jpg"
[[carousels.children]]
src = "/t/2.jpg"
active = true
[[carousels.children]]
src = "/t/3.jpg"

[[carousels]]
root_id = "promo"
variant = "crossfade"

[gallery]
[[gallery.items]]
src = "/g/small.jpg"
current_src = "/g/medium.jpg"
full = "/g/full.jpg"
alt = "Harbour"
[[gallery.items]]
kind = "video"
"#;

    fn blueprint() -> PageBlueprint {
        ConfigLoader::load_from_str(PAGE, ConfigFormat::Toml).unwrap()
    }

    async fn page_with(manifest: &MockManifest) -> Page {
        Page::build(&blueprint(), manifest, Arc::new(RecordingPreloader::new())).await
    }

    fn click(target: ClickTarget) -> InputEvent {
        InputEvent::Click(target)
    }

    /// Sleep just past `ms` and apply whatever the timers queued
    async fn advance(page: &mut Page, ms: u64) {
        sleep(Duration::from_millis(ms) + Duration::from_millis(1)).await;
        page.process_pending();
    }

    #[tokio::test(start_paused = true)]
    async fn test_rotation_wraps_after_full_cycle() {
        let mut page = page_with(&MockManifest::unavailable()).await;
        let rotator = || page.snapshot().carousel("rotator").cloned().unwrap();
        assert_eq!(rotator().active_src, "/img/a.jpg");

        advance(&mut page, 5000).await;
        let snapshot = page.snapshot();
        assert_eq!(snapshot.carousel("rotator").unwrap().active_src, "/img/b.jpg");

        advance(&mut page, 10000).await;
        let snapshot = page.snapshot();
        let rotator = snapshot.carousel("rotator").unwrap();
        assert_eq!(rotator.active_src, "/img/a.jpg");
        assert_eq!(rotator.rotations, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_image_sources_per_root() {
        let manifest = MockManifest::entries(["m1.jpg", "m2.jpg"]);
        let page = page_with(&manifest).await;

        // Inline list on the rotator, markup children on the thumbs: only
        // the promo root asks for a manifest
        assert_eq!(manifest.requested_paths(), vec!["assets/images/front_page/featured.json".to_string()]);

        let promo = page.carousel("promo").unwrap();
        assert_eq!(promo.current_image().id, "assets/images/front_page/m1.jpg");
        assert_eq!(promo.len(), 2);

        let thumbs = page.carousel("thumbs").unwrap();
        assert_eq!(thumbs.current_index(), 1);
        assert_eq!(thumbs.current_image().id, "/t/2.jpg");
    }

    #[tokio::test(start_paused = true)]
    async fn test_manifest_failure_uses_fallback() {
        let page = page_with(&MockManifest::not_an_array()).await;
        let promo = page.carousel("promo").unwrap();
        let ids: Vec<_> = promo.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "assets/images/front_page/hero1.jpg",
                "assets/images/front_page/hero2.jpg",
                "assets/images/front_page/hero3.jpg",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlay_pauses_only_opener_and_resumes_it() {
        let mut page = page_with(&MockManifest::unavailable()).await;

        assert!(matches!(
            page.dispatch(click(ClickTarget::Carousel("rotator".into()))),
            Routed::OpenedFromCarousel(_)
        ));
        let snapshot = page.snapshot();
        assert!(!snapshot.carousel("rotator").unwrap().running);
        assert!(snapshot.carousel("thumbs").unwrap().running);
        assert!(snapshot.carousel("promo").unwrap().running);

        // Paused carousel does not move while the overlay is open
        advance(&mut page, 6000).await;
        assert_eq!(page.carousel("rotator").unwrap().current_index(), 0);

        // Another carousel paused by hover stays paused after Escape
        page.dispatch(InputEvent::PointerEnter("thumbs".into()));
        assert_eq!(page.dispatch(InputEvent::Key(Key::Escape)), Routed::Closed);

        let snapshot = page.snapshot();
        assert!(snapshot.carousel("rotator").unwrap().running);
        assert!(!snapshot.carousel("thumbs").unwrap().running);
        assert!(!snapshot.overlay.unwrap().is_open);

        advance(&mut page, 5000).await;
        assert_eq!(page.carousel("rotator").unwrap().current_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pointer_leave_keeps_overlay_carousel_paused() {
        let mut page = page_with(&MockManifest::unavailable()).await;

        page.dispatch(InputEvent::PointerEnter("rotator".into()));
        page.dispatch(click(ClickTarget::Carousel("rotator".into())));
        assert_eq!(
            page.dispatch(InputEvent::PointerLeave("rotator".into())),
            Routed::Ignored("overlay_open")
        );

        advance(&mut page, 5000).await;
        let snapshot = page.snapshot();
        let rotator = snapshot.carousel("rotator").unwrap();
        let overlay = snapshot.overlay.clone().unwrap();
        assert!(overlay.is_open);
        assert!(!rotator.running);
        assert_eq!(rotator.active_src, "/img/a.jpg");
        assert_eq!(overlay.current_src.as_deref(), Some(rotator.active_src.as_str()));

        // Closing hands rotation back to the timer
        assert_eq!(page.dispatch(InputEvent::Key(Key::Escape)), Routed::Closed);
        advance(&mut page, 5000).await;
        assert_eq!(page.snapshot().carousel("rotator").unwrap().active_src, "/img/b.jpg");
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyboard_navigation_inside_overlay() {
        let mut page = page_with(&MockManifest::unavailable()).await;

        page.dispatch(click(ClickTarget::Thumbnail { root: "thumbs".into(), index: 2 }));
        page.dispatch(InputEvent::Key(Key::ArrowRight));
        let overlay = page.snapshot().overlay.unwrap();
        assert_eq!(overlay.current_src.as_deref(), Some("/t/1.jpg"));

        page.dispatch(InputEvent::Key(Key::ArrowLeft));
        page.dispatch(InputEvent::Key(Key::ArrowLeft));
        let overlay = page.snapshot().overlay.unwrap();
        assert_eq!(overlay.current_src.as_deref(), Some("/t/2.jpg"));
        assert_eq!(page.carousel("thumbs").unwrap().current_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_ignored_after_detach() {
        let mut page = page_with(&MockManifest::unavailable()).await;

        page.dispatch(click(ClickTarget::Carousel("rotator".into())));
        page.dispatch(InputEvent::Detach("rotator".into()));
        assert_eq!(
            page.dispatch(InputEvent::Key(Key::ArrowRight)),
            Routed::Ignored("no_navigable_target")
        );
        page.dispatch(InputEvent::Key(Key::Escape));

        advance(&mut page, 15000).await;
        let rotator = page.carousel("rotator").unwrap();
        assert_eq!(rotator.current_index(), 0);
        assert!(!rotator.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_gallery_opens_full_source_and_resumes_nothing() {
        let mut page = page_with(&MockManifest::unavailable()).await;
        page.dispatch(InputEvent::PointerEnter("rotator".into()));

        assert_eq!(page.dispatch(click(ClickTarget::GalleryItem(0))), Routed::OpenedFromGallery(0));
        let overlay = page.snapshot().overlay.unwrap();
        assert_eq!(overlay.current_src.as_deref(), Some("/g/full.jpg"));
        assert_eq!(overlay.current_alt.as_deref(), Some("Harbour"));
        assert_eq!(overlay.resume_target, None);

        page.dispatch(click(ClickTarget::OverlayClose));
        assert!(!page.carousel("rotator").unwrap().is_running());
        assert!(page.carousel("thumbs").unwrap().is_running());

        assert_eq!(
            page.dispatch(click(ClickTarget::GalleryItem(1))),
            Routed::Ignored("gallery_item_without_source")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_without_overlay_keeps_rotating_on_click() {
        let mut blueprint = blueprint();
        blueprint.overlay = None;
        let mut page = Page::build(
            &blueprint,
            &MockManifest::unavailable(),
            Arc::new(RecordingPreloader::new()),
        )
        .await;

        page.dispatch(click(ClickTarget::Carousel("rotator".into())));
        page.dispatch(click(ClickTarget::Thumbnail { root: "thumbs".into(), index: 0 }));
        let snapshot = page.snapshot();
        assert!(snapshot.overlay.is_none());
        assert!(snapshot.carousels.iter().all(|c| c.running));
        assert_eq!(snapshot.carousel("thumbs").unwrap().current_index, 0);

        advance(&mut page, 5000).await;
        assert_eq!(page.carousel("rotator").unwrap().current_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_preloads_next_image() {
        let preloader = Arc::new(RecordingPreloader::new());
        let mut page = Page::build(&blueprint(), &MockManifest::unavailable(), preloader.clone()).await;

        assert!(preloader.requested().contains(&"/img/b.jpg".to_string()));
        advance(&mut page, 5000).await;
        assert_eq!(page.carousel("rotator").unwrap().current_image().id, "/img/b.jpg");
        assert!(preloader.requested().contains(&"/img/c.jpg".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_page_shutdown_snapshot() {
        let handle = page_with(&MockManifest::unavailable()).await.spawn();

        handle.send(click(ClickTarget::Carousel("promo".into()))).unwrap();
        sleep(Duration::from_millis(2001)).await;
        handle.send(InputEvent::Key(Key::Escape)).unwrap();
        sleep(Duration::from_millis(1)).await;

        let snapshot = handle.shutdown().await.unwrap();
        assert_eq!(snapshot.carousel("thumbs").unwrap().current_index, 2);
        assert_eq!(snapshot.carousel("promo").unwrap().rotations, 0);
        assert!(!snapshot.overlay.unwrap().is_open);
        assert!(snapshot.carousels.iter().all(|c| !c.running));

        let json = serde_json::to_value(&snapshot.carousels[0]).unwrap();
        assert_eq!(json["root_id"], "rotator");
    }
}
