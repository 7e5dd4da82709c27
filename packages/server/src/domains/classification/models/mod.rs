pub mod citation;

pub use citation::{extract_citations, Citation};
