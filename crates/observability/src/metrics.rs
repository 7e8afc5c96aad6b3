//! Carousel / overlay metrics
//!
//! Thin wrappers over the `metrics` facade. Nothing is exported unless the
//! embedding application installs a recorder.

use metrics::{counter, gauge};

/// Where a carousel's image list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStep {
    Inline,
    Manifest,
    Fallback,
    /// Pre-rendered children reused as the slide set
    Markup,
}

impl SourceStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Manifest => "manifest",
            Self::Fallback => "fallback",
            Self::Markup => "markup",
        }
    }
}

/// Record which resolution step produced a carousel's image list
pub fn record_source_resolved(step: SourceStep, image_count: usize) {
    counter!("carousel_image_source_resolutions_total", "step" => step.as_str()).increment(1);
    gauge!("carousel_image_source_last_count", "step" => step.as_str()).set(image_count as f64);
}

/// Record a manifest fetch that was treated as absent
pub fn record_manifest_absent(reason: &'static str) {
    counter!("carousel_manifest_absent_total", "reason" => reason).increment(1);
}

/// Record one index move
pub fn record_rotation(root_id: &str, trigger: &'static str) {
    counter!(
        "carousel_rotations_total",
        "root_id" => root_id.to_string(),
        "trigger" => trigger
    )
    .increment(1);
}

/// Record a timer being (re)started
pub fn record_timer_start(root_id: &str) {
    counter!("carousel_timer_starts_total", "root_id" => root_id.to_string()).increment(1);
}

/// Record the overlay opening, by origin (`carousel` / `gallery`)
pub fn record_overlay_open(origin: &'static str) {
    counter!("overlay_opens_total", "origin" => origin).increment(1);
}

/// Record an input event that was ignored by the router
pub fn record_input_ignored(reason: &'static str) {
    counter!("input_events_ignored_total", "reason" => reason).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_source_resolved(SourceStep::Inline, 2);
        record_rotation("rotator", "timer");
        record_overlay_open("gallery");
        assert_eq!(SourceStep::Fallback.as_str(), "fallback");
    }
}
