//! Operator CLI for FIR section suggestion
//!
//! Runs migrations, classifies narratives, files and corrects reports.
//! Results are printed as JSON on stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fir_core::config::Config;
use fir_core::domains::classification::{Citation, ClassificationService};
use fir_core::domains::reports::activities::{correct_sections, file_report, find_report};
use fir_core::domains::reports::NewCrimeReport;
use fir_core::kernel::ServerDeps;
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fir_cli")]
#[command(about = "Suggest penal-code sections for crime reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,

    /// Suggest sections for a narrative without storing anything
    Classify {
        /// Narrative text describing the reported crime
        text: String,
        /// Deadline in seconds (defaults to INFERENCE_TIMEOUT_SECS)
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// File a new report from a JSON submission
    File {
        /// Path to the JSON submission (FIR form field names)
        #[arg(long)]
        json: PathBuf,
    },

    /// Show a filed report
    Show { fir_no: String },

    /// Replace the sections recorded for a report
    Correct {
        fir_no: String,
        /// Corrected citations, e.g. "Section 379"
        sections: Vec<String>,
    },
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
struct Response<T: Serialize> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
}

fn output<T: Serialize>(result: Option<T>, message: Option<String>) -> Result<()> {
    let response = Response {
        status: "success",
        message,
        result,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fir_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Migrate => {
            let pool = PgPoolOptions::new()
                .max_connections(1)
                .connect(config.database_url()?)
                .await
                .context("Failed to connect to database")?;

            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            output::<()>(None, Some("Migrations complete".into()))
        }
        Commands::Classify { text, timeout_secs } => {
            let classifier = ClassificationService::from_config(&config);
            let citations = match timeout_secs {
                Some(secs) => {
                    classifier
                        .classify_with_timeout(&text, Duration::from_secs(secs))
                        .await
                }
                None => classifier.classify(&text).await,
            }
            .context("Classification failed")?;

            output(Some(citations), None)
        }
        Commands::File { json } => {
            let raw = std::fs::read_to_string(&json)
                .with_context(|| format!("Failed to read {}", json.display()))?;
            let submission: NewCrimeReport =
                serde_json::from_str(&raw).context("Submission is not valid JSON")?;

            let deps = ServerDeps::from_config(&config).await?;
            let report = file_report(submission, &deps)
                .await
                .context("Failed to file report")?;

            output(Some(report), None)
        }
        Commands::Show { fir_no } => {
            let deps = ServerDeps::from_config(&config).await?;
            let report = find_report(&fir_no, &deps).await?;

            output(Some(report), None)
        }
        Commands::Correct { fir_no, sections } => {
            let deps = ServerDeps::from_config(&config).await?;
            let citations: Vec<Citation> = sections.into_iter().map(Citation::from).collect();
            correct_sections(&fir_no, &citations, &deps).await?;

            output::<()>(None, Some("Sections updated successfully".into()))
        }
    }
}
