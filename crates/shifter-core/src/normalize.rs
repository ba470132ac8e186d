//! Metadata normalization and assembly of [`NormalizedProduct`]s.
//!
//! Everything here is pure: inputs are borrowed or consumed, and the result
//! is a fresh value.

use std::collections::BTreeSet;

use crate::catalog_config::{CatalogConfig, ReplaceRule};
use crate::classify::classify;
use crate::types::{Metadata, NormalizedProduct, RawPlan, RawProduct};

/// Produces the final metadata mapping for a product.
///
/// 1. When `raw` is absent or empty and `fallback` is present, `fallback`
///    becomes the working mapping. It is a full substitution, not a merge.
/// 2. Every key in `drop_keys` is removed.
/// 3. Each rule in order overwrites its key with the rule value when the key
///    is present and the rule's condition holds for the current value.
#[must_use]
pub fn normalize_metadata(
    raw: Option<&Metadata>,
    fallback: Option<&Metadata>,
    drop_keys: &BTreeSet<String>,
    replace_rules: &[ReplaceRule],
) -> Metadata {
    let mut metadata = match (raw, fallback) {
        (Some(raw), _) if !raw.is_empty() => raw.clone(),
        (_, Some(fallback)) => fallback.clone(),
        (raw, None) => raw.cloned().unwrap_or_default(),
    };

    metadata.retain(|key, _| !drop_keys.contains(key));

    for rule in replace_rules {
        if let Some(current) = metadata.get_mut(&rule.key) {
            if rule.condition.holds(current) {
                current.clone_from(&rule.value);
            }
        }
    }

    metadata
}

/// Normalizes one resolved product and its active plans.
///
/// The first plan's metadata is the fallback for a product without metadata,
/// and plans are returned with their metadata stripped. Returns `None` when
/// the product has no plans.
#[must_use]
pub fn normalize_product(
    product: RawProduct,
    plans: Vec<RawPlan>,
    config: &CatalogConfig,
) -> Option<NormalizedProduct> {
    let fallback = plans.first()?.metadata.as_ref();
    let metadata = normalize_metadata(
        product.metadata.as_ref(),
        fallback,
        &config.drop_metadata_keys,
        &config.replace_metadata_items,
    );
    let category = classify(&product.id);

    Some(NormalizedProduct {
        id: product.id,
        metadata,
        category,
        plans: plans.into_iter().map(RawPlan::without_metadata).collect(),
        attributes: product.attributes,
    })
}
