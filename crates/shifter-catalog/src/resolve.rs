//! Resolution of the product catalog from the billing provider.
//!
//! Products are fetched concurrently, then the active plans of every
//! surviving product. Both fan-outs use an order-preserving buffered stream,
//! so output follows identifier order no matter which fetch finishes first.

use std::collections::HashSet;

use futures::stream::{self, StreamExt, TryStreamExt};
use shifter_core::{CatalogSource, RawPlan, RawProduct, SourceError};

use crate::error::CatalogError;

/// Products always published, ahead of any configured extras.
pub const PUBLISHABLE_PRODUCT_IDS: [&str; 8] = [
    // free dev
    "prod_BTjousBnAy46AC",
    // free prod
    "prod_BTcvVC4JyGnOXW",
    // static tiers
    "tier_01",
    "tier_02",
    "tier_03",
    // headless tiers
    "hl_tier_01",
    "hl_tier_02",
    "hl_tier_03",
];

/// A product together with its active plans.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProduct {
    pub product: RawProduct,
    pub plans: Vec<RawPlan>,
}

/// Whether an id lives in the provider's product namespace (`prod…`) rather
/// than being a hand-named tier id. Only these may be missing upstream.
#[must_use]
pub fn is_product_style(id: &str) -> bool {
    id.contains("prod")
}

/// Resolves `base_ids` followed by `extra_ids` into products with their
/// active plans, preserving id order.
///
/// An id listed more than once is fetched once, at its first position. A
/// product-style id the provider does not know is skipped. Any other failure
/// aborts the whole resolution.
///
/// # Errors
///
/// - [`CatalogError::ProductFetch`] if a product fetch fails for any reason
///   other than a missing product-style id.
/// - [`CatalogError::PlanFetch`] if listing a product's plans fails.
pub async fn resolve<S: CatalogSource>(
    source: &S,
    base_ids: &[&str],
    extra_ids: &[String],
    concurrency: usize,
) -> Result<Vec<ResolvedProduct>, CatalogError> {
    let width = concurrency.max(1);
    let mut seen = HashSet::new();
    let ids: Vec<&str> = base_ids
        .iter()
        .copied()
        .chain(extra_ids.iter().map(String::as_str))
        .filter(|id| {
            let first = seen.insert(*id);
            if !first {
                tracing::debug!(product_id = *id, "repeated product id; keeping first");
            }
            first
        })
        .collect();
    let requested = ids.len();

    let products: Vec<RawProduct> = stream::iter(ids)
        .map(|id| fetch_product(source, id))
        .buffered(width)
        .try_collect::<Vec<_>>()
        .await?
        .into_iter()
        .flatten()
        .collect();

    tracing::debug!(
        requested,
        found = products.len(),
        "resolved products; fetching active plans"
    );

    stream::iter(products)
        .map(|product| fetch_plans(source, product))
        .buffered(width)
        .try_collect()
        .await
}

/// Fetches one product, mapping a tolerated not-found to `None`.
async fn fetch_product<S: CatalogSource>(
    source: &S,
    id: &str,
) -> Result<Option<RawProduct>, CatalogError> {
    match source.retrieve_product(id).await {
        Ok(product) => Ok(Some(product)),
        Err(err) if err.is_not_found() && is_product_style(id) => {
            tracing::debug!(product_id = id, "product not found upstream; skipping");
            Ok(None)
        }
        Err(err) => {
            tracing::error!(product_id = id, error = %err, "failed to fetch product");
            Err(CatalogError::ProductFetch {
                product_id: id.to_string(),
                source: Box::new(err),
            })
        }
    }
}

async fn fetch_plans<S: CatalogSource>(
    source: &S,
    product: RawProduct,
) -> Result<ResolvedProduct, CatalogError> {
    let plans = match source.list_active_plans(&product.id).await {
        Ok(plans) => plans,
        Err(err) => {
            tracing::error!(product_id = %product.id, error = %err, "failed to list plans");
            return Err(CatalogError::PlanFetch {
                product_id: product.id,
                source: Box::new(err),
            });
        }
    };

    let plans: Vec<RawPlan> = plans.into_iter().filter(|plan| plan.active).collect();
    tracing::debug!(product_id = %product.id, plans = plans.len(), "listed active plans");
    Ok(ResolvedProduct { product, plans })
}
