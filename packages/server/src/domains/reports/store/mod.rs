//! Report persistence.
//!
//! `ReportStore` is the only shared mutable resource in the system. Backends
//! must make `create` and `update_output` atomic and serialize writers per
//! FIR number so readers never observe a half-written record.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryReportStore;
pub use postgres::PgReportStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::domains::classification::Citation;
use crate::domains::reports::models::CrimeReport;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Report {0} already exists")]
    DuplicateKey(String),

    #[error("Report {0} not found")]
    NotFound(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Stored citations for report {fir_no} could not be decoded: {source}")]
    Encoding {
        fir_no: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persist a new report. Fails with `DuplicateKey` if the FIR number is
    /// taken, leaving the existing record untouched.
    async fn create(&self, report: &CrimeReport) -> Result<(), StoreError>;

    /// Fetch a report by FIR number.
    async fn get(&self, fir_no: &str) -> Result<Option<CrimeReport>, StoreError>;

    /// Replace the stored citations, leaving every other field as filed.
    /// Fails with `NotFound` if no report has this FIR number.
    async fn update_output(&self, fir_no: &str, citations: &[Citation]) -> Result<(), StoreError>;
}

pub(crate) fn ensure_fir_no(fir_no: &str) -> Result<(), StoreError> {
    if fir_no.trim().is_empty() {
        return Err(StoreError::MalformedInput("firNo is required".into()));
    }
    Ok(())
}
