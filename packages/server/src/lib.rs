// FIR Section Suggestion - Core
//
// Turns crime narratives into suggested penal-code section citations and
// keeps the filed First Information Reports they belong to.
//
// Classification lives in domains/classification, persistence and the
// filing flows in domains/reports.

pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
