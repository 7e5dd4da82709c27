use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::domains::classification::Citation;
use crate::domains::reports::store::StoreError;

/// Date format used by the FIR form.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A filed First Information Report.
///
/// `fir_no` is the identity. Descriptive fields are stored and returned
/// verbatim; only `model_output` changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
#[serde(rename_all = "camelCase")]
pub struct CrimeReport {
    pub fir_no: String,
    #[builder(default, setter(strip_option))]
    pub district: Option<String>,
    #[serde(rename = "date")]
    pub filed_on: NaiveDate,
    #[builder(default, setter(strip_option))]
    pub day: Option<String>,
    pub date_of_occurrence: NaiveDate,
    #[builder(default, setter(strip_option))]
    pub place_of_occurrence: Option<String>,
    #[serde(rename = "name")]
    #[builder(default, setter(strip_option))]
    pub complainant_name: Option<String>,
    #[serde(rename = "dob")]
    pub date_of_birth: NaiveDate,
    #[builder(default, setter(strip_option))]
    pub nationality: Option<String>,
    #[builder(default, setter(strip_option))]
    pub occupation: Option<String>,
    #[builder(default, setter(strip_option))]
    pub address: Option<String>,
    #[builder(default)]
    pub reported_crime: String,
    #[builder(default, setter(strip_option))]
    pub properties_involved: Option<String>,
    #[builder(default)]
    pub model_output: Vec<Citation>,
}

/// A report as submitted from the FIR form, before validation.
///
/// Field names match the form's JSON payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewCrimeReport {
    pub fir_no: Option<String>,
    pub district: Option<String>,
    pub date: Option<String>,
    pub day: Option<String>,
    pub date_of_occurrence: Option<String>,
    pub place_of_occurrence: Option<String>,
    pub name: Option<String>,
    pub dob: Option<String>,
    pub nationality: Option<String>,
    pub occupation: Option<String>,
    pub address: Option<String>,
    pub reported_crime: Option<String>,
    pub properties_involved: Option<String>,
}

impl NewCrimeReport {
    /// Validate the submission into a report with no citations yet.
    pub fn parse(self) -> Result<CrimeReport, StoreError> {
        let fir_no = match self.fir_no {
            Some(fir_no) if !fir_no.trim().is_empty() => fir_no,
            _ => return Err(StoreError::MalformedInput("firNo is required".into())),
        };

        Ok(CrimeReport {
            filed_on: parse_date("date", self.date.as_deref())?,
            date_of_occurrence: parse_date("dateOfOccurrence", self.date_of_occurrence.as_deref())?,
            date_of_birth: parse_date("dob", self.dob.as_deref())?,
            fir_no,
            district: self.district,
            day: self.day,
            place_of_occurrence: self.place_of_occurrence,
            complainant_name: self.name,
            nationality: self.nationality,
            occupation: self.occupation,
            address: self.address,
            reported_crime: self.reported_crime.unwrap_or_default(),
            properties_involved: self.properties_involved,
            model_output: Vec::new(),
        })
    }
}

fn parse_date(field: &str, value: Option<&str>) -> Result<NaiveDate, StoreError> {
    let value = value.ok_or_else(|| StoreError::MalformedInput(format!("{} is required", field)))?;
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        StoreError::MalformedInput(format!("{} must be YYYY-MM-DD, got {:?}: {}", field, value, e))
    })
}
