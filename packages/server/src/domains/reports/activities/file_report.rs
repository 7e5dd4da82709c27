//! Filing a new FIR.
//!
//! Pipeline: validate submission → classify narrative → create record.
//! Validation happens first so malformed input never costs an inference call.

use inference_client::InferenceError;
use thiserror::Error;
use tracing::{info, warn};

use crate::domains::reports::models::{CrimeReport, NewCrimeReport};
use crate::domains::reports::store::StoreError;
use crate::kernel::ServerDeps;

#[derive(Debug, Error)]
pub enum FilingError {
    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub async fn file_report(
    submission: NewCrimeReport,
    deps: &ServerDeps,
) -> Result<CrimeReport, FilingError> {
    let mut report = submission.parse()?;

    // Skip inference for a FIR number that is already taken; `create`
    // still enforces uniqueness against concurrent filings.
    if deps.reports.get(&report.fir_no).await?.is_some() {
        warn!(fir_no = %report.fir_no, "Report already filed");
        return Err(StoreError::DuplicateKey(report.fir_no).into());
    }

    report.model_output = deps.classifier.classify(&report.reported_crime).await?;
    deps.reports.create(&report).await?;

    info!(
        fir_no = %report.fir_no,
        citations = report.model_output.len(),
        "Crime report filed"
    );

    Ok(report)
}

/// Fetch a filed report, treating absence as `NotFound`.
pub async fn find_report(fir_no: &str, deps: &ServerDeps) -> Result<CrimeReport, StoreError> {
    deps.reports
        .get(fir_no)
        .await?
        .ok_or_else(|| StoreError::NotFound(fir_no.to_string()))
}
