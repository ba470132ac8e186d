//! Catalog options supplied by the host, and the immutable configuration the
//! pipeline runs with.
//!
//! [`CatalogOptions`] mirrors what a host may set (every field optional).
//! [`CatalogConfig::apply_defaults`] merges it with the built-in defaults
//! once per run; nothing downstream mutates the result.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::condition::{Condition, Operator};
use crate::ConfigError;

/// Node type label used when the host does not set one.
pub const DEFAULT_NODE_TYPE: &str = "ShifterStripeProduct";

/// Internal billing keys stripped from product metadata by default.
pub const DEFAULT_DROP_METADATA_KEYS: [&str; 6] = [
    "user_limit",
    "backup",
    "projects_limit",
    "gatsby_support",
    "slack_notification",
    "enable_subuser",
];

/// Replace `key`'s value with `value` when `condition` holds for the
/// current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceRule {
    pub key: String,
    pub value: String,
    pub condition: Condition,
}

/// Host-supplied catalog options. Unset fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CatalogOptions {
    pub node_type: Option<String>,
    pub additional_product_ids: Option<Vec<String>>,
    pub drop_metadata_keys: Option<Vec<String>>,
    pub replace_metadata_items: Option<Vec<ReplaceRule>>,
}

/// Effective catalog configuration for a single pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    pub node_type: String,
    pub additional_product_ids: Vec<String>,
    pub drop_metadata_keys: BTreeSet<String>,
    pub replace_metadata_items: Vec<ReplaceRule>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::apply_defaults(CatalogOptions::default())
    }
}

impl CatalogConfig {
    /// Merges host options over the built-in defaults.
    ///
    /// A field the host sets replaces the default wholesale; lists are not
    /// concatenated with the defaults.
    #[must_use]
    pub fn apply_defaults(options: CatalogOptions) -> Self {
        Self {
            node_type: options
                .node_type
                .unwrap_or_else(|| DEFAULT_NODE_TYPE.to_string()),
            additional_product_ids: options.additional_product_ids.unwrap_or_default(),
            drop_metadata_keys: options.drop_metadata_keys.map_or_else(
                || {
                    DEFAULT_DROP_METADATA_KEYS
                        .iter()
                        .map(|k| (*k).to_string())
                        .collect()
                },
                |keys| keys.into_iter().collect(),
            ),
            replace_metadata_items: options
                .replace_metadata_items
                .unwrap_or_else(default_replace_rules),
        }
    }
}

/// A negative storage quota means "no limit"; show it as `Unlimited`.
fn default_replace_rules() -> Vec<ReplaceRule> {
    vec![ReplaceRule {
        key: "max_media_storage_gb".to_string(),
        value: "Unlimited".to_string(),
        condition: Condition::Numeric {
            operator: Operator::Lt,
            operand: 0.0,
            raw: "0".to_string(),
        },
    }]
}

/// Load and validate catalog options from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog_options(path: &Path) -> Result<CatalogOptions, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_catalog_options(&content)
}

/// Parse and validate catalog options from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text cannot be parsed or fails validation.
pub fn parse_catalog_options(content: &str) -> Result<CatalogOptions, ConfigError> {
    let options: CatalogOptions = serde_yaml::from_str(content)?;
    validate_options(&options)?;
    Ok(options)
}

fn validate_options(options: &CatalogOptions) -> Result<(), ConfigError> {
    if let Some(node_type) = &options.node_type {
        if node_type.trim().is_empty() {
            return Err(ConfigError::Validation(
                "nodeType must be non-empty".to_string(),
            ));
        }
    }

    // Repeated ids (among extras or against the built-in list) are allowed;
    // the resolver keeps the first occurrence.
    if let Some(ids) = &options.additional_product_ids {
        if ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "additionalProductIds entries must be non-empty".to_string(),
            ));
        }
    }

    if let Some(keys) = &options.drop_metadata_keys {
        if keys.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "dropMetadataKeys entries must be non-empty".to_string(),
            ));
        }
    }

    if let Some(rules) = &options.replace_metadata_items {
        if let Some(idx) = rules.iter().position(|r| r.key.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "replaceMetadataItems[{idx}] has an empty key"
            )));
        }
    }

    Ok(())
}
