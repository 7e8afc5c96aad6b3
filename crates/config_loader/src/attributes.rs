//! Root attribute interpretation
//!
//! Turns the raw `data-*` attributes of a carousel root into a
//! [`CarouselConfig`]. Attribute problems never fail: each value falls back
//! to its default.

use std::time::Duration;

use contracts::{attr, CarouselConfig, RootMarkup, DEFAULT_ALT_TEXT, DEFAULT_BASE_DIR, DEFAULT_INTERVAL_MS};
use tracing::debug;

/// Interpret all attributes of `root`
pub fn carousel_config(root: &RootMarkup) -> CarouselConfig {
    let interval_ms = parse_interval(root.attribute(attr::INTERVAL));

    let inline_srcs = root
        .attribute(attr::SRCS)
        .filter(|raw| !raw.trim().is_empty())
        .map(str::to_string);

    let alt_text = root
        .attribute(attr::ALT)
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .unwrap_or(DEFAULT_ALT_TEXT)
        .to_string();

    CarouselConfig {
        root_id: root.root_id.clone(),
        variant: root.variant,
        interval: Duration::from_millis(interval_ms),
        inline_srcs,
        base_dir: normalize_base_dir(root.attribute(attr::SRCDIR)),
        alt_text,
        children: root.children.clone(),
    }
}

/// Parse `data-interval` as milliseconds.
///
/// Leading decimal digits are taken (`"4000ms"` reads as 4000). Absent,
/// digit-less and zero values yield [`DEFAULT_INTERVAL_MS`].
pub fn parse_interval(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return DEFAULT_INTERVAL_MS;
    };

    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<u64>() {
        Ok(ms) if ms > 0 => ms,
        _ => {
            debug!(value = raw, "Invalid data-interval, using default");
            DEFAULT_INTERVAL_MS
        }
    }
}

/// Normalise `data-srcdir`: backslashes become `/`, trailing slashes collapse
/// to exactly one. Absent or blank values yield [`DEFAULT_BASE_DIR`].
pub fn normalize_base_dir(raw: Option<&str>) -> String {
    let dir = raw.map(str::trim).filter(|d| !d.is_empty()).unwrap_or(DEFAULT_BASE_DIR);
    let dir = dir.replace('\\', "/");
    format!("{}/", dir.trim_end_matches('/'))
}
