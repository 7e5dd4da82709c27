// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Text generation is abstracted by `inference_client::TextGenerator` and
// report persistence by `domains::reports::ReportStore`.
//
// Naming convention: Base* for trait names (e.g., BaseTextRecognizer)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Text Recognition Trait (Infrastructure - OCR)
// =============================================================================

#[async_trait]
pub trait BaseTextRecognizer: Send + Sync {
    /// Recognize printed or handwritten text in an uploaded image.
    async fn recognize(&self, image: &[u8]) -> Result<String>;
}
