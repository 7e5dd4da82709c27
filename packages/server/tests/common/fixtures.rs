// Test fixtures for creating report data

use chrono::NaiveDate;
use fir_core::domains::classification::Citation;
use fir_core::domains::reports::{CrimeReport, NewCrimeReport};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_FIR: AtomicUsize = AtomicUsize::new(1);

/// FIR number unique within this test run, so tests sharing a database
/// never collide.
pub fn unique_fir_no(prefix: &str) -> String {
    format!(
        "{}-{}-{}",
        prefix,
        std::process::id(),
        NEXT_FIR.fetch_add(1, Ordering::SeqCst)
    )
}

pub const THEFT_NARRATIVE: &str =
    "A theft was reported where someone broke into a house and stole valuables.";

/// A complete report with every descriptive field populated.
pub fn sample_report(fir_no: &str) -> CrimeReport {
    CrimeReport::builder()
        .fir_no(fir_no)
        .district("Lucknow")
        .filed_on(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap())
        .day("Wednesday")
        .date_of_occurrence(NaiveDate::from_ymd_opt(2024, 6, 11).unwrap())
        .place_of_occurrence("Aminabad market")
        .complainant_name("S. Verma")
        .date_of_birth(NaiveDate::from_ymd_opt(1985, 3, 3).unwrap())
        .nationality("Indian")
        .occupation("Shopkeeper")
        .address("44 Latouche Road")
        .reported_crime(THEFT_NARRATIVE)
        .properties_involved("Cash box, two watches")
        .model_output(vec![Citation::from("Section 378"), Citation::from("Section 457")])
        .build()
}

/// A form submission for `fir_no` with valid dates.
pub fn sample_submission(fir_no: &str) -> NewCrimeReport {
    NewCrimeReport {
        fir_no: Some(fir_no.to_string()),
        district: Some("Lucknow".into()),
        date: Some("2024-06-12".into()),
        day: Some("Wednesday".into()),
        date_of_occurrence: Some("2024-06-11".into()),
        place_of_occurrence: Some("Aminabad market".into()),
        name: Some("S. Verma".into()),
        dob: Some("1985-03-03".into()),
        nationality: Some("Indian".into()),
        occupation: Some("Shopkeeper".into()),
        address: Some("44 Latouche Road".into()),
        reported_crime: Some(THEFT_NARRATIVE.into()),
        properties_involved: Some("Cash box, two watches".into()),
    }
}
