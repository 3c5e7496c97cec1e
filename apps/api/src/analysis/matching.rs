//! Catalog matching — scores every product against the extracted requirements
//! by case-insensitive substring overlap with its feature tags.
//!
//! Algorithm:
//! 1. score = number of requirements that overlap any feature tag
//!    (requirement contains tag, or tag contains requirement)
//! 2. products with score 0 are dropped
//! 3. match percentage = min(85 + 5 × score, 98)
//! 4. stable sort descending by percentage, keep the top three
//! 5. cost = unit_price × procurement volume, summed per the configured `CostBasis`

use std::str::FromStr;

use thiserror::Error;

use crate::models::product::{Product, RecommendedProduct};

pub const BASE_MATCH_PERCENT: u32 = 85;
pub const MATCH_PERCENT_PER_HIT: u32 = 5;
pub const MAX_MATCH_PERCENT: u32 = 98;
pub const MAX_RECOMMENDATIONS: usize = 3;
pub const DEFAULT_PROCUREMENT_VOLUME: f64 = 500.0;

// ────────────────────────────────────────────────────────────────────────────
// Cost basis
// ────────────────────────────────────────────────────────────────────────────

/// Which matched products contribute to `total_estimated_cost`.
///
/// `AllMatches` sums every product with a non-zero score, including ones cut
/// from the top-three list. `Recommended` sums only what is returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CostBasis {
    #[default]
    AllMatches,
    Recommended,
}

#[derive(Debug, Error)]
#[error("unknown cost basis '{0}' (expected 'all_matches' or 'recommended')")]
pub struct UnknownCostBasis(String);

impl FromStr for CostBasis {
    type Err = UnknownCostBasis;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all_matches" | "all" => Ok(CostBasis::AllMatches),
            "recommended" | "top" => Ok(CostBasis::Recommended),
            other => Err(UnknownCostBasis(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MatchSettings {
    pub procurement_volume: f64,
    pub cost_basis: CostBasis,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            procurement_volume: DEFAULT_PROCUREMENT_VOLUME,
            cost_basis: CostBasis::AllMatches,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// At most `MAX_RECOMMENDATIONS`, best first.
    pub recommended: Vec<RecommendedProduct>,
    pub total_estimated_cost: f64,
    /// Products with a non-zero score, before truncation.
    pub matched_count: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Core matching
// ────────────────────────────────────────────────────────────────────────────

/// Counts the requirements that overlap at least one of the product's features.
pub fn score_product(requirements: &[String], product: &Product) -> u32 {
    let features: Vec<String> = product.features.iter().map(|f| f.to_lowercase()).collect();

    requirements
        .iter()
        .filter(|req| {
            let req = req.to_lowercase();
            features
                .iter()
                .any(|feat| feat.contains(&req) || req.contains(feat.as_str()))
        })
        .count() as u32
}

pub fn match_percent(score: u32) -> u32 {
    (BASE_MATCH_PERCENT + score * MATCH_PERCENT_PER_HIT).min(MAX_MATCH_PERCENT)
}

pub fn match_products(
    requirements: &[String],
    products: &[Product],
    settings: MatchSettings,
) -> MatchOutcome {
    let mut scored: Vec<(u32, &Product)> = products
        .iter()
        .filter_map(|product| {
            let score = score_product(requirements, product);
            (score > 0).then(|| (match_percent(score), product))
        })
        .collect();

    let matched_count = scored.len();
    let all_matches_cost: f64 = scored
        .iter()
        .map(|(_, p)| p.price() * settings.procurement_volume)
        .sum();

    // sort_by is stable: equal percentages keep catalog order
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(MAX_RECOMMENDATIONS);

    let total_estimated_cost = match settings.cost_basis {
        CostBasis::AllMatches => all_matches_cost,
        CostBasis::Recommended => scored
            .iter()
            .map(|(_, p)| p.price() * settings.procurement_volume)
            .sum(),
    };

    let recommended = scored
        .into_iter()
        .map(|(percent, product)| RecommendedProduct::new(product, percent))
        .collect();

    MatchOutcome {
        recommended,
        total_estimated_cost,
        matched_count,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
