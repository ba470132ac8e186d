use serde::{Deserialize, Serialize};

/// Product category derived from the identifier prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Static,
    Headless,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Static => write!(f, "static"),
            Category::Headless => write!(f, "headless"),
        }
    }
}

/// Classifies a product identifier.
///
/// `tier…` ids are static plans and `hl…` ids are headless plans. Anything
/// else (including `prod_…` ids) is static. Matching is case-sensitive and
/// anchored at the start of the id.
#[must_use]
pub fn classify(id: &str) -> Category {
    if id.starts_with("tier") {
        Category::Static
    } else if id.starts_with("hl") {
        Category::Headless
    } else {
        Category::Static
    }
}
