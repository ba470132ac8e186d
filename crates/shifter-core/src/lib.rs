pub mod app_config;
pub mod catalog_config;
pub mod classify;
pub mod condition;
pub mod config;
pub mod error;
pub mod node;
pub mod normalize;
pub mod source;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use catalog_config::{
    load_catalog_options, parse_catalog_options, CatalogConfig, CatalogOptions, ReplaceRule,
    DEFAULT_DROP_METADATA_KEYS, DEFAULT_NODE_TYPE,
};
pub use classify::{classify, Category};
pub use condition::{evaluate, Condition, ConditionSpec, Operator, Variant};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_STRIPE_API_VERSION};
pub use error::ConfigError;
pub use node::{node_id, CatalogNode, NodeInternal};
pub use normalize::{normalize_metadata, normalize_product};
pub use source::{CatalogSource, SourceError};
pub use types::{Metadata, NormalizedProduct, RawPlan, RawProduct};
