//! Page description validation
//!
//! Rules:
//! - root_id non-empty and unique
//! - at most one home root
//! - pre-rendered children carry a non-empty src
//! - settings pass their field-level checks

use std::collections::HashSet;

use contracts::{ContractError, PageBlueprint};
use validator::Validate;

/// Validate a PageBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &PageBlueprint) -> Result<(), ContractError> {
    validate_settings(blueprint)?;
    validate_root_ids(blueprint)?;
    validate_home_roots(blueprint)?;
    validate_children(blueprint)?;
    Ok(())
}

fn validate_settings(blueprint: &PageBlueprint) -> Result<(), ContractError> {
    blueprint.settings.validate().map_err(|errors| {
        let field = errors
            .field_errors()
            .keys()
            .next()
            .map(|f| format!("settings.{f}"))
            .unwrap_or_else(|| "settings".to_string());
        ContractError::config_validation(field, errors.to_string())
    })
}

/// root_id must be non-empty and unique across the page
fn validate_root_ids(blueprint: &PageBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for (idx, root) in blueprint.carousels.iter().enumerate() {
        if root.root_id.as_str().trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("carousels[{idx}].root_id"),
                "root_id cannot be empty",
            ));
        }
        if !seen.insert(root.root_id.as_str()) {
            return Err(ContractError::config_validation(
                format!("carousels[root_id={}]", root.root_id),
                "duplicate root_id",
            ));
        }
    }
    Ok(())
}

fn validate_home_roots(blueprint: &PageBlueprint) -> Result<(), ContractError> {
    let homes: Vec<_> = blueprint
        .carousels
        .iter()
        .filter(|root| root.home)
        .map(|root| root.root_id.as_str())
        .collect();

    if homes.len() > 1 {
        return Err(ContractError::config_validation(
            "carousels[].home",
            format!("at most one home root allowed, found {homes:?}"),
        ));
    }
    Ok(())
}

fn validate_children(blueprint: &PageBlueprint) -> Result<(), ContractError> {
    for root in &blueprint.carousels {
        for (idx, child) in root.children.iter().enumerate() {
            if child.src.trim().is_empty() {
                return Err(ContractError::config_validation(
                    format!("carousels[{}].children[{idx}].src", root.root_id),
                    "child src cannot be empty",
                ));
            }
        }
    }
    Ok(())
}
