//! Product catalog — loaded once at startup from a JSON file, or the embedded
//! fallback list when no file exists. Read-only for the process lifetime.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::info;

use crate::models::product::Product;

/// Where the loaded catalog came from. Reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    File,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    source: CatalogSource,
}

impl Catalog {
    /// Builds a catalog from an explicit product list, rejecting invalid records.
    pub fn new(products: Vec<Product>, source: CatalogSource) -> Result<Self> {
        let catalog = Self { products, source };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The embedded three-product catalog used when no catalog file is present.
    pub fn fallback() -> Self {
        Self {
            products: vec![
                Product::new(
                    "AP-EXT-005",
                    "Apex Ultima Protek",
                    "Exterior",
                    &["waterproofing", "anti-algal", "10-year warranty"],
                    620,
                ),
                Product::new(
                    "AP-ROY-001",
                    "Royale Aspira",
                    "Interior",
                    &["washable", "teflon", "crack-bridging"],
                    850,
                ),
                Product::new(
                    "AP-IND-009",
                    "Apcolite Premium",
                    "Enamel",
                    &["high gloss", "rust protection"],
                    450,
                ),
            ],
            source: CatalogSource::Fallback,
        }
    }

    /// Loads the catalog from `path`. A missing file silently yields the fallback;
    /// an unreadable, malformed, or invalid file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "Catalog file {} not found, using embedded fallback catalog",
                    path.display()
                );
                return Ok(Self::fallback());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read catalog {}", path.display()))
            }
        };

        let products: Vec<Product> = serde_json::from_str(&raw)
            .with_context(|| format!("Catalog {} is not a valid product list", path.display()))?;

        Self::new(products, CatalogSource::File)
            .with_context(|| format!("Catalog {} failed validation", path.display()))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn source(&self) -> CatalogSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Every product needs at least one feature tag and a finite, non-negative price.
    pub fn validate(&self) -> Result<()> {
        for product in &self.products {
            if product.features.is_empty() {
                bail!("Product {} has no features", product.sku_id);
            }
            let price = product.price();
            if !price.is_finite() || price < 0.0 {
                bail!(
                    "Product {} has invalid unit_price {}",
                    product.sku_id,
                    product.unit_price
                );
            }
        }
        Ok(())
    }
}
