pub mod classification;
pub mod reports;
