//! Provider-facing product and plan shapes, and the normalized product the
//! pipeline hands to the indexing layer.
//!
//! Metadata is keyed with a [`BTreeMap`] and pass-through attributes use
//! `serde_json::Map`, so serializing the same input twice produces the same
//! bytes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::Category;

/// String-to-string metadata attached to products and plans.
pub type Metadata = BTreeMap<String, String>;

/// A product record as returned by the billing provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    pub id: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    /// Every other provider attribute (name, description, images, ...).
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

/// A pricing plan attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlan {
    pub id: String,
    #[serde(rename = "product")]
    pub product_id: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Every other provider attribute (amount, currency, interval, ...).
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl RawPlan {
    /// Returns the plan with its metadata removed and every other attribute
    /// intact.
    #[must_use]
    pub fn without_metadata(self) -> Self {
        Self {
            metadata: None,
            ..self
        }
    }
}

/// A product after metadata normalization and classification.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProduct {
    pub id: String,
    pub metadata: Metadata,
    pub category: Category,
    pub plans: Vec<RawPlan>,
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_product_keeps_unknown_attributes() {
        let json = serde_json::json!({
            "id": "prod_1",
            "name": "Tier One",
            "metadata": { "max_media_storage_gb": "10" },
            "images": []
        });
        let product: RawProduct = serde_json::from_value(json).unwrap();
        assert_eq!(product.id, "prod_1");
        assert_eq!(
            product.metadata.as_ref().and_then(|m| m.get("max_media_storage_gb")),
            Some(&"10".to_string())
        );
        assert_eq!(product.attributes.get("name"), Some(&serde_json::json!("Tier One")));
        assert!(!product.attributes.contains_key("metadata"));
    }

    #[test]
    fn raw_product_null_metadata_is_none() {
        let json = serde_json::json!({ "id": "prod_1", "metadata": null });
        let product: RawProduct = serde_json::from_value(json).unwrap();
        assert!(product.metadata.is_none());
    }

    #[test]
    fn raw_plan_reads_product_field_as_product_id() {
        let json = serde_json::json!({
            "id": "plan_1",
            "product": "tier_01",
            "active": true,
            "amount": 2000,
            "currency": "usd"
        });
        let plan: RawPlan = serde_json::from_value(json).unwrap();
        assert_eq!(plan.product_id, "tier_01");
        assert!(plan.active);
        assert_eq!(plan.attributes.get("amount"), Some(&serde_json::json!(2000)));
    }

    #[test]
    fn without_metadata_omits_metadata_when_serialized() {
        let plan = RawPlan {
            id: "plan_1".to_string(),
            product_id: "tier_01".to_string(),
            active: true,
            metadata: Some(Metadata::from([("a".to_string(), "1".to_string())])),
            attributes: serde_json::Map::new(),
        };
        let stripped = plan.without_metadata();
        assert!(stripped.metadata.is_none());
        let value = serde_json::to_value(&stripped).unwrap();
        assert!(value.get("metadata").is_none());
        assert_eq!(value.get("product"), Some(&serde_json::json!("tier_01")));
    }
}
