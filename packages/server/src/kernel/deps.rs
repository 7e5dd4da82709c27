//! Server dependencies for activities (using traits for testability)
//!
//! Built once at process start and passed by reference to every activity.

use anyhow::{Context, Result};
use inference_client::{GenerationParams, TextGenerator};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::domains::classification::ClassificationService;
use crate::domains::reports::{InMemoryReportStore, PgReportStore, ReportStore};

/// Server dependencies accessible to activities
#[derive(Clone)]
pub struct ServerDeps {
    pub classifier: ClassificationService,
    pub reports: Arc<dyn ReportStore>,
}

impl ServerDeps {
    pub fn new(generator: Arc<dyn TextGenerator>, reports: Arc<dyn ReportStore>) -> Self {
        Self {
            classifier: ClassificationService::new(generator),
            reports,
        }
    }

    /// Dependencies backed by an in-process store (tests, dry runs).
    pub fn in_memory(generator: Arc<dyn TextGenerator>) -> Self {
        Self::new(generator, Arc::new(InMemoryReportStore::new()))
    }

    /// Connect to Postgres and the inference backend described by `config`.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(config.database_url()?)
            .await
            .context("Failed to connect to database")?;
        info!("Database connected");

        Ok(Self {
            classifier: ClassificationService::from_config(config),
            reports: Arc::new(PgReportStore::new(pool)),
        })
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.classifier = self.classifier.with_params(params);
        self
    }
}
