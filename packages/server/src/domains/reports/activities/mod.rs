pub mod correct_sections;
pub mod file_report;

pub use correct_sections::correct_sections;
pub use file_report::{file_report, find_report, FilingError};
