//! Records handed to the content-indexing layer.
//!
//! A [`CatalogNode`] carries a stable id derived from the node type and the
//! provider's product id, plus a SHA-256 content digest the indexer uses for
//! deduplication. Identical inputs produce byte-identical nodes.

use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::classify::Category;
use crate::types::{Metadata, NormalizedProduct, RawPlan};

/// Namespace for node ids (UUIDv5).
const NODE_ID_NAMESPACE: Uuid = Uuid::from_u128(0x5d1f_7c1e_2b0a_4f8e_9a57_c0f3_1e6b_d402);

/// Keys owned by the node itself; provider attributes with these names are
/// dropped rather than emitted twice.
const RESERVED_KEYS: [&str; 6] = [
    "id",
    "productId",
    "productType",
    "metadata",
    "plans",
    "internal",
];

/// Indexing bookkeeping attached to every node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInternal {
    #[serde(rename = "type")]
    pub node_type: String,
    pub content_digest: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogNode {
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    pub id: Uuid,
    pub product_id: String,
    pub product_type: Category,
    pub metadata: Metadata,
    pub plans: Vec<RawPlan>,
    pub internal: NodeInternal,
}

/// The digested part of a node: everything except `internal`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeContent<'a> {
    #[serde(flatten)]
    attributes: &'a serde_json::Map<String, serde_json::Value>,
    id: &'a Uuid,
    product_id: &'a str,
    product_type: Category,
    metadata: &'a Metadata,
    plans: &'a [RawPlan],
}

/// Derives the stable node id for a product under the given node type.
#[must_use]
pub fn node_id(node_type: &str, product_id: &str) -> Uuid {
    Uuid::new_v5(
        &NODE_ID_NAMESPACE,
        format!("{node_type}{product_id}").as_bytes(),
    )
}

impl CatalogNode {
    /// Builds the node for a normalized product.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if the node content cannot be serialized
    /// for digesting.
    pub fn from_product(
        product: NormalizedProduct,
        node_type: &str,
    ) -> Result<Self, serde_json::Error> {
        let NormalizedProduct {
            id: product_id,
            metadata,
            category,
            plans,
            mut attributes,
        } = product;
        attributes.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));

        let id = node_id(node_type, &product_id);
        let content = NodeContent {
            attributes: &attributes,
            id: &id,
            product_id: &product_id,
            product_type: category,
            metadata: &metadata,
            plans: &plans,
        };
        let content_digest = format!("{:x}", Sha256::digest(serde_json::to_vec(&content)?));

        Ok(Self {
            attributes,
            id,
            product_id,
            product_type: category,
            metadata,
            plans,
            internal: NodeInternal {
                node_type: node_type.to_string(),
                content_digest,
            },
        })
    }
}
