pub mod error;
pub mod pipeline;
pub mod resolve;

#[cfg(test)]
mod test_support;

pub use error::CatalogError;
pub use pipeline::{assemble, run};
pub use resolve::{is_product_style, resolve, ResolvedProduct, PUBLISHABLE_PRODUCT_IDS};
