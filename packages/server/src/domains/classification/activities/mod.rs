pub mod analyze_document;

pub use analyze_document::{analyze_document, AnalysisError, DocumentAnalysis};
