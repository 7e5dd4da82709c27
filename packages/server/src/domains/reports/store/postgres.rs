use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

use super::{ensure_fir_no, ReportStore, StoreError};
use crate::domains::classification::Citation;
use crate::domains::reports::models::CrimeReport;

const REPORT_COLUMNS: &str = "fir_no, district, filed_on, day, date_of_occurrence, \
    place_of_occurrence, complainant_name, date_of_birth, nationality, occupation, \
    address, reported_crime, properties_involved, model_output";

/// Row shape of `crime_reports`; citations are a JSON array in a TEXT column.
#[derive(Debug, sqlx::FromRow)]
struct CrimeReportRow {
    fir_no: String,
    district: Option<String>,
    filed_on: NaiveDate,
    day: Option<String>,
    date_of_occurrence: NaiveDate,
    place_of_occurrence: Option<String>,
    complainant_name: Option<String>,
    date_of_birth: NaiveDate,
    nationality: Option<String>,
    occupation: Option<String>,
    address: Option<String>,
    reported_crime: String,
    properties_involved: Option<String>,
    model_output: String,
}

impl TryFrom<CrimeReportRow> for CrimeReport {
    type Error = StoreError;

    fn try_from(row: CrimeReportRow) -> Result<Self, Self::Error> {
        let model_output = decode_citations(&row.fir_no, &row.model_output)?;
        Ok(CrimeReport {
            fir_no: row.fir_no,
            district: row.district,
            filed_on: row.filed_on,
            day: row.day,
            date_of_occurrence: row.date_of_occurrence,
            place_of_occurrence: row.place_of_occurrence,
            complainant_name: row.complainant_name,
            date_of_birth: row.date_of_birth,
            nationality: row.nationality,
            occupation: row.occupation,
            address: row.address,
            reported_crime: row.reported_crime,
            properties_involved: row.properties_involved,
            model_output,
        })
    }
}

pub(crate) fn encode_citations(fir_no: &str, citations: &[Citation]) -> Result<String, StoreError> {
    serde_json::to_string(citations).map_err(|source| StoreError::Encoding {
        fir_no: fir_no.to_string(),
        source,
    })
}

pub(crate) fn decode_citations(fir_no: &str, raw: &str) -> Result<Vec<Citation>, StoreError> {
    serde_json::from_str(raw).map_err(|source| StoreError::Encoding {
        fir_no: fir_no.to_string(),
        source,
    })
}

/// Postgres-backed report store.
///
/// `create` relies on the primary key and `ON CONFLICT DO NOTHING`;
/// `update_output` is a single-row UPDATE, which Postgres serializes per row.
#[derive(Clone)]
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn create(&self, report: &CrimeReport) -> Result<(), StoreError> {
        ensure_fir_no(&report.fir_no)?;
        let model_output = encode_citations(&report.fir_no, &report.model_output)?;

        let inserted = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO crime_reports (
                fir_no, district, filed_on, day, date_of_occurrence,
                place_of_occurrence, complainant_name, date_of_birth, nationality,
                occupation, address, reported_crime, properties_involved, model_output
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (fir_no) DO NOTHING
            RETURNING fir_no
            "#,
        )
        .bind(&report.fir_no)
        .bind(&report.district)
        .bind(report.filed_on)
        .bind(&report.day)
        .bind(report.date_of_occurrence)
        .bind(&report.place_of_occurrence)
        .bind(&report.complainant_name)
        .bind(report.date_of_birth)
        .bind(&report.nationality)
        .bind(&report.occupation)
        .bind(&report.address)
        .bind(&report.reported_crime)
        .bind(&report.properties_involved)
        .bind(model_output)
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some(_) => {
                debug!(fir_no = %report.fir_no, "Crime report inserted");
                Ok(())
            }
            None => Err(StoreError::DuplicateKey(report.fir_no.clone())),
        }
    }

    async fn get(&self, fir_no: &str) -> Result<Option<CrimeReport>, StoreError> {
        let row = sqlx::query_as::<_, CrimeReportRow>(&format!(
            "SELECT {} FROM crime_reports WHERE fir_no = $1",
            REPORT_COLUMNS
        ))
        .bind(fir_no)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CrimeReport::try_from).transpose()
    }

    async fn update_output(&self, fir_no: &str, citations: &[Citation]) -> Result<(), StoreError> {
        let model_output = encode_citations(fir_no, citations)?;

        let result = sqlx::query(
            "UPDATE crime_reports SET model_output = $2, updated_at = NOW() WHERE fir_no = $1",
        )
        .bind(fir_no)
        .bind(model_output)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(fir_no.to_string()));
        }

        debug!(fir_no = %fir_no, citations = citations.len(), "Crime report citations updated");
        Ok(())
    }
}
