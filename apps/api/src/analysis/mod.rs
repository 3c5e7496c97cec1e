// RFP analysis pipeline: document text extraction, requirement extraction,
// and catalog matching. The only requirement backend is simulated.

pub mod document;
pub mod extractor;
pub mod handlers;
pub mod matching;
