//! # Config Loader
//!
//! Turns a page description file into a validated [`PageBlueprint`] and
//! interprets each carousel root's `data-*` attributes into a
//! [`contracts::CarouselConfig`].
//!
//! Loading is a developer action, so a broken file is an error. Attribute
//! problems are not: they fall back to defaults in [`carousel_config`].
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//!
//! let blueprint = ConfigLoader::load_from_path("page.toml".as_ref())?;
//! for root in &blueprint.carousels {
//!     let config = config_loader::carousel_config(root);
//!     println!("{} every {:?}", root.root_id, config.interval);
//! }
//! # Ok::<(), contracts::ContractError>(())
//! ```

mod attributes;
mod parser;
mod validator;

pub use attributes::{carousel_config, normalize_base_dir, parse_interval};
pub use contracts::PageBlueprint;
pub use parser::ConfigFormat;

use std::path::Path;

use contracts::ContractError;

/// Entry point for page descriptions
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read, parse and validate the page description at `path`.
    ///
    /// The format follows the extension: `.toml` or `.json`.
    pub fn load_from_path(path: &Path) -> Result<PageBlueprint, ContractError> {
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ConfigFormat::from_extension)
            .ok_or_else(|| {
                ContractError::config_parse(format!(
                    "unsupported page description format: {}",
                    path.display()
                ))
            })?;
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content, format)
    }

    /// Parse and validate an in-memory page description
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<PageBlueprint, ContractError> {
        let blueprint = parser::parse(content, format)?;
        validator::validate(&blueprint)?;
        Ok(blueprint)
    }

    pub fn to_toml(blueprint: &PageBlueprint) -> Result<String, ContractError> {
        toml::to_string_pretty(blueprint).map_err(|e| {
            ContractError::config_parse(format!("cannot render page as TOML: {e}"))
        })
    }

    pub fn to_json(blueprint: &PageBlueprint) -> Result<String, ContractError> {
        serde_json::to_string_pretty(blueprint).map_err(|e| {
            ContractError::config_parse(format!("cannot render page as JSON: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HOME_PAGE_TOML: &str = r#"
[settings]
origin = "https://example.org/"

[overlay]

[[carousels]]
root_id = "rotator"
home = true
variant = "crossfade"
[carousels.attributes]
data-interval = "5000"
data-srcdir = "assets/images/front_page"

[[carousels]]
root_id = "strip"
[[carousels.children]]
src = "t1.jpg"
[[carousels.children]]
src = "t2.jpg"
"#;

    #[test]
    fn test_load_from_str_toml() {
        let result = ConfigLoader::load_from_str(HOME_PAGE_TOML, ConfigFormat::Toml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.carousels.len(), 2);
        assert_eq!(bp.settings.origin.as_deref(), Some("https://example.org/"));
    }

    #[test]
    fn test_json_export_reloads() {
        let bp = ConfigLoader::load_from_str(HOME_PAGE_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&bp).unwrap();
        let bp2 = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(bp2.carousels[1].children.len(), 2);
        assert!(bp2.carousels[0].home);
    }

    #[test]
    fn test_load_from_path_detects_format() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(HOME_PAGE_TOML.as_bytes()).unwrap();
        let bp = ConfigLoader::load_from_path(file.path()).unwrap();
        assert_eq!(bp.carousels[0].root_id, "rotator");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = ConfigLoader::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported page description format"));
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let content = r#"
[[carousels]]
root_id = "strip"

[[carousels]]
root_id = "strip"
"#;
        let result = ConfigLoader::load_from_str(content, ConfigFormat::Toml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }
}
