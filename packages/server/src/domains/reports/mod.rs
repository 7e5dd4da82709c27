pub mod activities;
pub mod models;
pub mod store;

pub use models::{CrimeReport, NewCrimeReport};
pub use store::{InMemoryReportStore, PgReportStore, ReportStore, StoreError};
