use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{ensure_fir_no, ReportStore, StoreError};
use crate::domains::classification::Citation;
use crate::domains::reports::models::CrimeReport;

/// Process-local report store.
///
/// Writers hold the write lock for the whole mutation, so concurrent
/// updates to one FIR number apply one at a time.
#[derive(Default)]
pub struct InMemoryReportStore {
    reports: RwLock<HashMap<String, CrimeReport>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.is_empty()
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn create(&self, report: &CrimeReport) -> Result<(), StoreError> {
        ensure_fir_no(&report.fir_no)?;

        match self.reports.write().await.entry(report.fir_no.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateKey(report.fir_no.clone())),
            Entry::Vacant(slot) => {
                slot.insert(report.clone());
                Ok(())
            }
        }
    }

    async fn get(&self, fir_no: &str) -> Result<Option<CrimeReport>, StoreError> {
        Ok(self.reports.read().await.get(fir_no).cloned())
    }

    async fn update_output(&self, fir_no: &str, citations: &[Citation]) -> Result<(), StoreError> {
        match self.reports.write().await.get_mut(fir_no) {
            Some(report) => {
                report.model_output = citations.to_vec();
                Ok(())
            }
            None => Err(StoreError::NotFound(fir_no.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn report(fir_no: &str) -> CrimeReport {
        CrimeReport::builder()
            .fir_no(fir_no)
            .district("Nagpur")
            .filed_on(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap())
            .date_of_occurrence(NaiveDate::from_ymd_opt(2024, 2, 9).unwrap())
            .date_of_birth(NaiveDate::from_ymd_opt(1975, 1, 20).unwrap())
            .complainant_name("A. Khan")
            .reported_crime("A theft was reported where someone broke into a house and stole valuables.")
            .model_output(vec![Citation::from("Section 378"), Citation::from("Section 457")])
            .build()
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = InMemoryReportStore::new();
        let original = report("FIR001");

        tokio_test::assert_ok!(store.create(&original).await);

        assert_eq!(store.get("FIR001").await.unwrap(), Some(original));
        assert_eq!(store.get("FIR404").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_create_keeps_original() {
        let store = InMemoryReportStore::new();
        let original = report("FIR001");
        store.create(&original).await.unwrap();

        let mut imposter = report("FIR001");
        imposter.district = Some("Elsewhere".into());
        imposter.model_output = vec![];

        let err = store.create(&imposter).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(ref key) if key == "FIR001"));
        assert_eq!(store.get("FIR001").await.unwrap(), Some(original));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_requires_fir_no() {
        let store = InMemoryReportStore::new();

        let err = store.create(&report(" ")).await.unwrap_err();
        assert!(matches!(err, StoreError::MalformedInput(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_output_changes_only_citations() {
        let store = InMemoryReportStore::new();
        let before = report("FIR001");
        store.create(&before).await.unwrap();

        let corrected = vec![Citation::from("Section 380"), Citation::from("Section 454")];
        store.update_output("FIR001", &corrected).await.unwrap();

        let after = store.get("FIR001").await.unwrap().unwrap();
        assert_eq!(after.model_output, corrected);
        assert_eq!(
            CrimeReport {
                model_output: before.model_output.clone(),
                ..after
            },
            before
        );
    }

    #[tokio::test]
    async fn test_update_output_missing_report() {
        let store = InMemoryReportStore::new();

        let err = store
            .update_output("FIR404", &[Citation::from("Section 378")])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(ref key) if key == "FIR404"));
        assert!(store.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_last_write_wins_whole() {
        let store = Arc::new(InMemoryReportStore::new());
        store.create(&report("FIR001")).await.unwrap();

        let candidates: Vec<Vec<Citation>> = (0..32)
            .map(|i| {
                (0..=i % 5)
                    .map(|j| Citation::new(format!("Section {}{}", 100 + i, j)))
                    .collect()
            })
            .collect();

        let handles: Vec<_> = candidates
            .iter()
            .cloned()
            .map(|citations| {
                let store = store.clone();
                tokio::spawn(async move { store.update_output("FIR001", &citations).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = store.get("FIR001").await.unwrap().unwrap().model_output;
        assert!(candidates.contains(&stored));
    }
}
