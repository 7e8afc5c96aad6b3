//! `info` command implementation.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use contracts::{CarouselConfig, PageBlueprint, RootMarkup, StageVariant};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Page info for JSON output
#[derive(Serialize)]
struct PageInfo {
    version: String,
    settings: SettingsInfo,
    carousels: Vec<CarouselInfo>,
    overlay: bool,
    gallery_items: usize,
}

#[derive(Serialize)]
struct SettingsInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<String>,
    manifest_timeout_ms: u64,
    fallback_images: Vec<String>,
}

#[derive(Serialize)]
struct CarouselInfo {
    root_id: String,
    variant: StageVariant,
    home: bool,
    sweep: bool,
    interval_ms: u64,
    base_dir: String,
    /// Where the image list will come from
    source: &'static str,
    children: usize,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(page = %args.page.display(), "Loading page info");

    let blueprint = super::load_page(&args.page)
        .with_context(|| format!("Failed to load page from {}", args.page.display()))?;

    let info = build_page_info(&blueprint, args);
    if args.json {
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize page info")?;
        println!("{}", json);
    } else {
        print_page_info(&info);
    }

    Ok(())
}

/// Expected image source for a root, before any manifest request
fn planned_source(root: &RootMarkup, config: &CarouselConfig) -> &'static str {
    if config.variant == StageVariant::Toggle && !config.children.is_empty() {
        "markup"
    } else if config.inline_srcs.as_deref().is_some_and(|s| !s.trim().is_empty()) {
        "inline"
    } else if root.children.is_empty() {
        "manifest"
    } else {
        "manifest (children reused)"
    }
}

fn build_page_info(blueprint: &PageBlueprint, args: &InfoArgs) -> PageInfo {
    let carousels = blueprint
        .carousels
        .iter()
        .map(|root| {
            let config = config_loader::carousel_config(root);
            CarouselInfo {
                root_id: root.root_id.to_string(),
                variant: root.variant,
                home: root.home,
                sweep: root.sweep,
                interval_ms: config.interval.as_millis() as u64,
                base_dir: config.base_dir.clone(),
                source: planned_source(root, &config),
                children: root.children.len(),
                attributes: if args.attributes {
                    root.attributes.clone().into_iter().collect()
                } else {
                    BTreeMap::new()
                },
            }
        })
        .collect();

    PageInfo {
        version: format!("{:?}", blueprint.version),
        settings: SettingsInfo {
            origin: blueprint.settings.origin.clone(),
            manifest_timeout_ms: blueprint.settings.manifest_timeout_ms,
            fallback_images: blueprint.settings.fallback_images.clone(),
        },
        carousels,
        overlay: blueprint.overlay.is_some_and(|o| o.is_complete()),
        gallery_items: blueprint.gallery.as_ref().map_or(0, |g| g.items.len()),
    }
}

fn print_page_info(info: &PageInfo) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Carousel Page Description                   ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("🌐 Settings");
    println!("   ├─ Version: {}", info.version);
    println!("   ├─ Origin: {}", info.settings.origin.as_deref().unwrap_or("(none)"));
    println!("   ├─ Manifest timeout: {} ms", info.settings.manifest_timeout_ms);
    println!("   └─ Fallback images: {}", info.settings.fallback_images.join(", "));

    println!("\n🎠 Carousels ({})", info.carousels.len());
    for (i, carousel) in info.carousels.iter().enumerate() {
        let is_last = i == info.carousels.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let child_prefix = if is_last { "   " } else { "│  " };

        let role = match (carousel.home, carousel.sweep) {
            (true, _) => " [home]",
            (false, false) => " [skipped]",
            _ => "",
        };
        println!("   {} {} ({:?}){}", prefix, carousel.root_id, carousel.variant, role);
        println!(
            "   {}  ├─ every {} ms, images from {}",
            child_prefix, carousel.interval_ms, carousel.source
        );
        println!("   {}  └─ base dir: {}", child_prefix, carousel.base_dir);

        for (name, value) in &carousel.attributes {
            println!("   {}       {} = {}", child_prefix, name, value);
        }
    }

    println!("\n🖼  Overlay: {}", if info.overlay { "enabled" } else { "disabled" });
    println!("   Gallery items: {}", info.gallery_items);
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{attr, ChildImage};
    use std::path::PathBuf;

    fn args(attributes: bool) -> InfoArgs {
        InfoArgs {
            page: PathBuf::from("page.toml"),
            json: true,
            attributes,
        }
    }

    #[test]
    fn test_planned_sources() {
        let mut thumbs = RootMarkup::new("thumbs", StageVariant::Toggle);
        thumbs.children = vec![ChildImage {
            src: "t1.jpg".into(),
            alt: None,
            active: false,
        }];
        let blueprint = PageBlueprint {
            carousels: vec![
                RootMarkup::new("rotator", StageVariant::Crossfade)
                    .with_attribute(attr::SRCS, "a.jpg")
                    .with_attribute(attr::INTERVAL, "-3"),
                thumbs,
                RootMarkup::new("promo", StageVariant::Crossfade).with_attribute(attr::SRCDIR, "promo\\"),
            ],
            ..Default::default()
        };

        let info = build_page_info(&blueprint, &args(true));
        let sources: Vec<_> = info.carousels.iter().map(|c| c.source).collect();
        assert_eq!(sources, vec!["inline", "markup", "manifest"]);
        assert_eq!(info.carousels[0].interval_ms, 5000);
        assert_eq!(info.carousels[2].base_dir, "promo/");
        assert_eq!(info.carousels[0].attributes.len(), 2);
    }

    #[test]
    fn test_attributes_hidden_by_default() {
        let blueprint = PageBlueprint {
            carousels: vec![RootMarkup::new("rotator", StageVariant::Crossfade).with_attribute(attr::SRCS, "a.jpg")],
            ..Default::default()
        };
        let info = build_page_info(&blueprint, &args(false));
        assert!(info.carousels[0].attributes.is_empty());
        assert!(!info.overlay);
    }
}
