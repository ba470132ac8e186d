//! Catalog run: resolve, normalize, classify, and emit indexing nodes.

use shifter_core::{normalize_product, CatalogConfig, CatalogNode, CatalogSource};

use crate::error::CatalogError;
use crate::resolve::{resolve, ResolvedProduct, PUBLISHABLE_PRODUCT_IDS};

/// Runs the full catalog pipeline against `source`.
///
/// Nothing is returned unless every fetch succeeds; a hard failure aborts
/// the run.
///
/// # Errors
///
/// Propagates [`CatalogError`] from resolution or node construction.
pub async fn run<S: CatalogSource>(
    source: &S,
    config: &CatalogConfig,
    concurrency: usize,
) -> Result<Vec<CatalogNode>, CatalogError> {
    let resolved = resolve(
        source,
        &PUBLISHABLE_PRODUCT_IDS,
        &config.additional_product_ids,
        concurrency,
    )
    .await?;
    let resolved_count = resolved.len();

    let nodes = assemble(resolved, config)?;
    tracing::info!(
        node_type = %config.node_type,
        resolved = resolved_count,
        emitted = nodes.len(),
        "catalog run complete"
    );
    Ok(nodes)
}

/// Turns resolved products into nodes, in resolver order.
///
/// Products without active plans are skipped.
///
/// # Errors
///
/// Returns [`CatalogError::NodeBuild`] if a node cannot be serialized for
/// its content digest.
pub fn assemble(
    resolved: Vec<ResolvedProduct>,
    config: &CatalogConfig,
) -> Result<Vec<CatalogNode>, CatalogError> {
    let mut nodes = Vec::with_capacity(resolved.len());

    for ResolvedProduct { product, plans } in resolved {
        let product_id = product.id.clone();
        let Some(normalized) = normalize_product(product, plans, config) else {
            tracing::debug!(product_id = %product_id, "no active plans; skipping product");
            continue;
        };

        let node = CatalogNode::from_product(normalized, &config.node_type)
            .map_err(|source| CatalogError::NodeBuild { product_id, source })?;
        nodes.push(node);
    }

    Ok(nodes)
}
