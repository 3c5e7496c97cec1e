//! Requirement extraction — pluggable, trait-based backend that turns document
//! text into a summary plus a list of requirement tags.
//!
//! `AppState` holds an `Arc<dyn RequirementExtractor>`. The only backend is
//! `SimulatedExtractor`, which returns a fixed narrative regardless of input.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const SIMULATED_SUMMARY: &str = "Expansion project for Blue Horizon Corporate Wing requiring high-performance exterior waterproofing and premium washable interior finishes.";

const SIMULATED_REQUIREMENTS: [&str; 6] = [
    "waterproofing",
    "10-year warranty",
    "washable",
    "anti-algal",
    "high gloss",
    "rust protection",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRequirements {
    pub summary: String,
    pub requirements: Vec<String>,
}

#[async_trait]
pub trait RequirementExtractor: Send + Sync {
    async fn extract(&self, document_text: &str) -> Result<ExtractedRequirements, AppError>;

    /// Backend label, logged with each analysis.
    fn backend(&self) -> &'static str;
}

/// Returns the same hardcoded requirements for every document.
pub struct SimulatedExtractor;

#[async_trait]
impl RequirementExtractor for SimulatedExtractor {
    async fn extract(&self, _document_text: &str) -> Result<ExtractedRequirements, AppError> {
        Ok(simulated_requirements())
    }

    fn backend(&self) -> &'static str {
        "simulated"
    }
}

pub fn simulated_requirements() -> ExtractedRequirements {
    ExtractedRequirements {
        summary: SIMULATED_SUMMARY.to_string(),
        requirements: SIMULATED_REQUIREMENTS.iter().map(|r| r.to_string()).collect(),
    }
}
