pub mod activities;
pub mod models;
pub mod prompt;
pub mod service;

pub use models::{extract_citations, Citation};
pub use prompt::{build_prompt, LEGAL_EXPERT_INSTRUCTION};
pub use service::ClassificationService;
