use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A single catalog product. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku_id: String,
    pub name: String,
    pub category: String,
    pub features: Vec<String>,
    /// Kept as the catalog wrote it, so integer prices echo back as integers.
    pub unit_price: Number,
    /// Any additional fields from the catalog file, echoed back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(
        sku_id: &str,
        name: &str,
        category: &str,
        features: &[&str],
        unit_price: impl Into<Number>,
    ) -> Self {
        Self {
            sku_id: sku_id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            features: features.iter().map(|f| f.to_string()).collect(),
            unit_price: unit_price.into(),
            extra: Map::new(),
        }
    }

    pub fn price(&self) -> f64 {
        self.unit_price.as_f64().unwrap_or(f64::NAN)
    }
}

/// A catalog product as returned from an analysis, with its synthetic match percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedProduct {
    #[serde(flatten)]
    pub product: Product,
    /// Rendered as e.g. `"95%"`.
    pub match_score: String,
}

impl RecommendedProduct {
    /// Any `match_score` carried in the catalog record is dropped so the key
    /// is emitted once.
    pub fn new(product: &Product, percent: u32) -> Self {
        let mut product = product.clone();
        product.extra.remove("match_score");
        Self {
            product,
            match_score: format!("{percent}%"),
        }
    }
}
