//! Clerk corrections to the suggested sections.

use tracing::info;

use crate::domains::classification::Citation;
use crate::domains::reports::store::StoreError;
use crate::kernel::ServerDeps;

/// Overwrite the citations of a filed report.
pub async fn correct_sections(
    fir_no: &str,
    citations: &[Citation],
    deps: &ServerDeps,
) -> Result<(), StoreError> {
    deps.reports.update_output(fir_no, citations).await?;

    info!(fir_no = %fir_no, citations = citations.len(), "Report sections corrected");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::reports::activities::{file_report, find_report};
    use crate::domains::reports::models::NewCrimeReport;
    use crate::kernel::test_dependencies::MockTextGenerator;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_correction_replaces_suggestions() {
        let deps = ServerDeps::in_memory(Arc::new(
            MockTextGenerator::new().with_fragments(&["Section 379"]),
        ));
        let input = NewCrimeReport {
            fir_no: Some("FIR200".into()),
            date: Some("2024-01-02".into()),
            date_of_occurrence: Some("2024-01-01".into()),
            dob: Some("2000-02-29".into()),
            reported_crime: Some("Phone stolen from a parked car".into()),
            ..Default::default()
        };
        let filed = file_report(input, &deps).await.unwrap();

        let corrected = vec![Citation::from("Section 379"), Citation::from("Section 427")];
        correct_sections("FIR200", &corrected, &deps).await.unwrap();

        let stored = find_report("FIR200", &deps).await.unwrap();
        assert_eq!(stored.model_output, corrected);
        assert_eq!(stored.reported_crime, filed.reported_crime);
        assert_eq!(stored.filed_on, filed.filed_on);
    }

    #[tokio::test]
    async fn test_correction_for_unknown_report() {
        let deps = ServerDeps::in_memory(Arc::new(MockTextGenerator::new()));

        let err = correct_sections("FIR404", &[], &deps).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
