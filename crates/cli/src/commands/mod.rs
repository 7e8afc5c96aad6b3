//! Command implementations.

mod info;
mod run;
mod validate;

pub use info::run_info;
pub use run::run_page;
pub use validate::run_validate;

use std::path::Path;

use contracts::PageBlueprint;

use crate::error::CliError;

/// Load a page description, reporting a missing file distinctly
fn load_page(path: &Path) -> anyhow::Result<PageBlueprint> {
    if !path.exists() {
        return Err(CliError::page_not_found(path.display().to_string()).into());
    }
    let blueprint = config_loader::ConfigLoader::load_from_path(path)?;
    Ok(blueprint)
}
