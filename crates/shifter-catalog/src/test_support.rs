//! In-memory [`CatalogSource`] for resolver and pipeline tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use shifter_core::{CatalogSource, Metadata, RawPlan, RawProduct, SourceError};

#[derive(Debug, thiserror::Error)]
pub(crate) enum MemoryError {
    #[error("no such resource: {0}")]
    NotFound(String),
    #[error("upstream unavailable for {0}")]
    Unavailable(String),
}

impl SourceError for MemoryError {
    fn is_not_found(&self) -> bool {
        matches!(self, MemoryError::NotFound(_))
    }
}

#[derive(Default)]
pub(crate) struct MemorySource {
    products: HashMap<String, RawProduct>,
    plans: HashMap<String, Vec<RawPlan>>,
    delays: HashMap<String, Duration>,
    unavailable: HashSet<String>,
    completed: Mutex<Vec<String>>,
    plans_completed: Mutex<Vec<String>>,
}

pub(crate) fn meta(pairs: &[(&str, &str)]) -> Metadata {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

pub(crate) fn plan(id: &str, product_id: &str, active: bool, metadata: Option<Metadata>) -> RawPlan {
    RawPlan {
        id: id.to_string(),
        product_id: product_id.to_string(),
        active,
        metadata,
        attributes: serde_json::Map::from_iter([(
            "currency".to_string(),
            serde_json::json!("usd"),
        )]),
    }
}

impl MemorySource {
    pub(crate) fn with_product(mut self, id: &str, metadata: Option<Metadata>) -> Self {
        self.products.insert(
            id.to_string(),
            RawProduct {
                id: id.to_string(),
                metadata,
                attributes: serde_json::Map::new(),
            },
        );
        self
    }

    pub(crate) fn with_plans(mut self, product_id: &str, plans: Vec<RawPlan>) -> Self {
        self.plans.insert(product_id.to_string(), plans);
        self
    }

    pub(crate) fn with_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_string(), delay);
        self
    }

    /// Delays the plan listing of `product_id`; the product fetch is unaffected.
    pub(crate) fn with_plans_delay(self, product_id: &str, delay: Duration) -> Self {
        self.with_delay(&format!("plans:{product_id}"), delay)
    }

    pub(crate) fn with_unavailable(mut self, id: &str) -> Self {
        self.unavailable.insert(id.to_string());
        self
    }

    /// Every base id present with one active plan and no product metadata.
    pub(crate) fn with_base_catalog(mut self) -> Self {
        for id in crate::PUBLISHABLE_PRODUCT_IDS {
            self = self
                .with_product(id, None)
                .with_plans(id, vec![plan(&format!("plan_{id}"), id, true, None)]);
        }
        self
    }

    /// Product ids in the order their fetches finished.
    pub(crate) fn completion_order(&self) -> Vec<String> {
        self.completed.lock().expect("lock poisoned").clone()
    }

    /// Product ids in the order their plan listings finished.
    pub(crate) fn plans_completion_order(&self) -> Vec<String> {
        self.plans_completed.lock().expect("lock poisoned").clone()
    }
}

impl CatalogSource for MemorySource {
    type Error = MemoryError;

    async fn retrieve_product(&self, id: &str) -> Result<RawProduct, MemoryError> {
        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        if self.unavailable.contains(id) {
            return Err(MemoryError::Unavailable(id.to_string()));
        }
        let product = self
            .products
            .get(id)
            .cloned()
            .ok_or_else(|| MemoryError::NotFound(id.to_string()))?;
        self.completed
            .lock()
            .expect("lock poisoned")
            .push(id.to_string());
        Ok(product)
    }

    async fn list_active_plans(&self, product_id: &str) -> Result<Vec<RawPlan>, MemoryError> {
        let key = format!("plans:{product_id}");
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        if self.unavailable.contains(&key) {
            return Err(MemoryError::Unavailable(product_id.to_string()));
        }
        self.plans_completed
            .lock()
            .expect("lock poisoned")
            .push(product_id.to_string());
        Ok(self.plans.get(product_id).cloned().unwrap_or_default())
    }
}
