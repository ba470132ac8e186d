use thiserror::Error;

type BoxedSourceError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort a catalog run.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Fetching a product failed and the id was not a tolerated soft-missing
    /// product id.
    #[error("failed to fetch product {product_id}: {source}")]
    ProductFetch {
        product_id: String,
        #[source]
        source: BoxedSourceError,
    },

    /// Listing plans for a resolved product failed.
    #[error("failed to list plans for product {product_id}: {source}")]
    PlanFetch {
        product_id: String,
        #[source]
        source: BoxedSourceError,
    },

    /// A node could not be serialized for its content digest.
    #[error("failed to build node for product {product_id}: {source}")]
    NodeBuild {
        product_id: String,
        #[source]
        source: serde_json::Error,
    },
}
