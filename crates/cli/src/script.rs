//! Timed input scripts for the `run` command.
//!
//! One JSON object per line: `{"after_ms": 1500, "event": {"Key": "Escape"}}`.
//! `after_ms` is relative to the previous step. Blank lines and lines
//! starting with `#` are skipped.

use std::path::Path;
use std::time::Duration;

use contracts::InputEvent;
use serde::Deserialize;
use tracing::{debug, info, warn};
use viewer::InputSender;

use crate::error::{CliError, Result};

/// One scripted input event
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScriptStep {
    #[serde(default)]
    pub after_ms: u64,
    pub event: InputEvent,
}

/// Parse a script file
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let content = std::fs::read_to_string(path)?;
    parse_script(&content, &path.display().to_string())
}

fn parse_script(content: &str, origin: &str) -> Result<Vec<ScriptStep>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| CliError::script(origin, i + 1, e.to_string()))
        })
        .collect()
}

/// Feed `steps` into a page. Returns how many events were delivered.
pub async fn replay(steps: Vec<ScriptStep>, sender: InputSender) -> usize {
    info!(steps = steps.len(), "Replaying input script");

    let mut delivered = 0;
    for step in steps {
        if step.after_ms > 0 {
            tokio::time::sleep(Duration::from_millis(step.after_ms)).await;
        }
        debug!(event = ?step.event, "Scripted input");
        if sender.send(step.event).is_err() {
            warn!(delivered, "Page stopped before the script finished");
            break;
        }
        delivered += 1;
    }
    delivered
}
