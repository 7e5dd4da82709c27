pub mod crime_report;

pub use crime_report::{CrimeReport, NewCrimeReport, DATE_FORMAT};
