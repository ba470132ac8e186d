//! The billing-provider boundary the catalog resolver fetches through.

use std::future::Future;

use crate::types::{RawPlan, RawProduct};

/// Error surfaced by a [`CatalogSource`].
pub trait SourceError: std::error::Error + Send + Sync + 'static {
    /// Whether the provider reported that the requested resource does not
    /// exist.
    fn is_not_found(&self) -> bool;
}

/// Read access to the billing provider's product catalog.
pub trait CatalogSource: Sync {
    type Error: SourceError;

    /// Fetches a single product by id.
    fn retrieve_product(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<RawProduct, Self::Error>> + Send;

    /// Lists the active plans attached to a product, in provider order.
    fn list_active_plans(
        &self,
        product_id: &str,
    ) -> impl Future<Output = Result<Vec<RawPlan>, Self::Error>> + Send;
}
