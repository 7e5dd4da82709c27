//! Scanned-document analysis.
//!
//! Pipeline: recognize text → classify. Nothing is persisted; the clerk
//! reviews the recognized text and suggestions before filing a report.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::domains::classification::models::Citation;
use crate::domains::classification::ClassificationService;
use crate::kernel::BaseTextRecognizer;
use inference_client::InferenceError;

/// Recognized text with the sections suggested for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    pub extracted_text: String,
    pub citations: Vec<Citation>,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Document contained no data")]
    EmptyDocument,

    #[error("Text recognition failed: {0}")]
    Recognition(#[source] anyhow::Error),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

pub async fn analyze_document(
    image: &[u8],
    recognizer: &dyn BaseTextRecognizer,
    classifier: &ClassificationService,
) -> Result<DocumentAnalysis, AnalysisError> {
    if image.is_empty() {
        return Err(AnalysisError::EmptyDocument);
    }

    let extracted_text = recognizer.recognize(image).await.map_err(|e| {
        warn!(error = %e, bytes = image.len(), "Text recognition failed");
        AnalysisError::Recognition(e)
    })?;

    let citations = classifier.classify(&extracted_text).await?;

    info!(
        text_length = extracted_text.len(),
        citations = citations.len(),
        "Document analyzed"
    );

    Ok(DocumentAnalysis {
        extracted_text,
        citations,
    })
}
