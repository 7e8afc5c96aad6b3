//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{attr, PageBlueprint, StageVariant};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    page_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<PageSummary>,
}

#[derive(Serialize)]
struct PageSummary {
    version: String,
    carousel_count: usize,
    home_root: Option<String>,
    overlay: bool,
    gallery_items: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(page = %args.page.display(), "Validating page description");

    let result = validate_page(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Page validation failed")
    }
}

fn validate_page(args: &ValidateArgs) -> ValidationResult {
    let page_path = args.page.display().to_string();

    match super::load_page(&args.page) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);
            ValidationResult {
                valid: true,
                page_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(summarize(&blueprint)),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            page_path,
            error: Some(format!("{e:#}")),
            warnings: None,
            summary: None,
        },
    }
}

fn summarize(blueprint: &PageBlueprint) -> PageSummary {
    PageSummary {
        version: format!("{:?}", blueprint.version),
        carousel_count: blueprint.carousels.len(),
        home_root: blueprint
            .carousels
            .iter()
            .find(|root| root.home)
            .map(|root| root.root_id.to_string()),
        overlay: blueprint.overlay.is_some_and(|o| o.is_complete()),
        gallery_items: blueprint.gallery.as_ref().map_or(0, |g| g.items.len()),
    }
}

/// Collect non-fatal issues: things that load fine but silently do nothing
fn collect_warnings(blueprint: &PageBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    match blueprint.overlay {
        None => warnings.push("No overlay markup - clicks will not open images".to_string()),
        Some(overlay) if !overlay.is_complete() => warnings.push(
            "Overlay markup is missing its image or close control - overlay disabled".to_string(),
        ),
        Some(_) => {}
    }

    if blueprint.gallery.is_some() && !blueprint.overlay.is_some_and(|o| o.is_complete()) {
        warnings.push("Gallery present without a usable overlay - gallery clicks are ignored".to_string());
    }

    for root in &blueprint.carousels {
        if !root.home && !root.sweep {
            warnings.push(format!(
                "Carousel '{}' is neither home nor swept - it will never be initialised",
                root.root_id
            ));
        }
        if root.home && root.variant != StageVariant::Crossfade {
            warnings.push(format!(
                "Home carousel '{}' uses the {:?} variant instead of crossfade",
                root.root_id, root.variant
            ));
        }
        if let Some(raw) = root.attribute(attr::INTERVAL) {
            if config_loader::parse_interval(Some(raw)).to_string() != raw.trim() {
                warnings.push(format!(
                    "Carousel '{}' has {}=\"{}\" - interpreted as {} ms",
                    root.root_id,
                    attr::INTERVAL,
                    raw,
                    config_loader::parse_interval(Some(raw))
                ));
            }
        }
    }

    if let Some(gallery) = &blueprint.gallery {
        let unusable = gallery.items.iter().filter(|i| i.overlay_source().is_none()).count();
        if unusable > 0 {
            warnings.push(format!("{unusable} gallery item(s) have no source and will be ignored"));
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Page description is valid: {}", result.page_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Carousels: {}", summary.carousel_count);
            println!("  Home root: {}", summary.home_root.as_deref().unwrap_or("-"));
            println!("  Overlay: {}", if summary.overlay { "yes" } else { "no" });
            println!("  Gallery items: {}", summary.gallery_items);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Page description is invalid: {}", result.page_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
