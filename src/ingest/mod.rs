//! Ingestion pipeline
//!
//! Loads threat records into the database, either from a CSV file or from a
//! built-in sample set. One invocation uses one connection and one
//! transaction: every successful insert is committed together at the end of
//! the run, and a malformed row never aborts the batch.

pub mod mapper;
pub mod recommend;

use std::path::Path;

use csv::ByteRecord;
use sqlx::{Connection, MySqlConnection};
use thiserror::Error;

use crate::config::Config;
use crate::db;
use crate::models::{NewThreat, Severity, Threat};

use mapper::ColumnMap;

/// Default confidence assigned to sample records.
const SAMPLE_CONFIDENCE: f32 = 85.0;

/// Progress is logged once per this many successful rows.
const PROGRESS_INTERVAL: usize = 100;

/// Fatal ingestion failures. These abort the whole run and propagate to the
/// caller; per-row failures are [`RowError`] and never escalate.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Failures scoped to a single row. Logged with the row index and skipped.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("invalid UTF-8 in record: {0}")]
    Utf8(#[from] csv::FromUtf8Error),

    #[error("insert failed: {0}")]
    Insert(#[from] sqlx::Error),
}

/// Outcome of one ingestion run: how many rows were persisted and which rows
/// were skipped, with the reason for each.
#[derive(Debug, Default)]
pub struct IngestSummary {
    pub ingested: usize,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug)]
pub struct SkippedRow {
    pub index: usize,
    pub reason: String,
}

impl IngestSummary {
    fn skip(&mut self, index: usize, error: &RowError) {
        tracing::warn!("Error processing row {}: {}", index, error);
        self.skipped.push(SkippedRow {
            index,
            reason: error.to_string(),
        });
    }
}

/// Entry point for the ingestion command.
///
/// With a path argument, ingests that CSV file if it exists; a nonexistent
/// path is logged and the run ends without touching the store. With no
/// argument, seeds the sample data set.
pub async fn run(config: &Config, csv_path: Option<&str>) -> Result<(), IngestError> {
    match csv_path {
        Some(arg) => {
            let path = Path::new(arg);
            if !path.exists() {
                tracing::error!("CSV file not found: {}", path.display());
                return Ok(());
            }

            let mut conn = connect(config).await?;
            let summary = ingest_csv(&mut conn, path).await?;
            conn.close().await?;

            if !summary.skipped.is_empty() {
                tracing::warn!("Skipped {} rows, see log for details", summary.skipped.len());
            }
        }
        None => {
            let mut conn = connect(config).await?;
            seed_samples(&mut conn).await?;
            conn.close().await?;

            tracing::info!(
                "Sample data ingestion completed. Run `ingest <csv_file>` to load records from CSV."
            );
        }
    }

    Ok(())
}

async fn connect(config: &Config) -> Result<MySqlConnection, IngestError> {
    let mut conn = MySqlConnection::connect_with(&config.connect_options())
        .await
        .map_err(|e| {
            tracing::error!("Database connection error: {}", e);
            e
        })?;

    db::ensure_schema(&mut conn).await?;
    Ok(conn)
}

/// Ingest threat records from a CSV file.
///
/// The whole file is read into memory up front; a file-level read or parse
/// failure is fatal. Rows are then mapped and inserted one at a time, with
/// failing rows skipped, and the batch is committed once at the end.
pub async fn ingest_csv(
    conn: &mut MySqlConnection,
    path: &Path,
) -> Result<IngestSummary, IngestError> {
    tracing::info!("Starting data ingestion from: {}", path.display());

    let (columns, records) = read_records(path)?;
    tracing::info!("Loaded {} records from CSV", records.len());

    let mut tx = conn.begin().await?;
    let mut summary = IngestSummary::default();

    for (index, raw) in records.iter().enumerate() {
        let record = match mapper::map_record(&columns, raw, index) {
            Ok(record) => record,
            Err(error) => {
                summary.skip(index, &error);
                continue;
            }
        };

        if let Err(error) = Threat::insert(&mut *tx, &record).await {
            summary.skip(index, &RowError::Insert(error));
            continue;
        }

        summary.ingested += 1;
        if summary.ingested % PROGRESS_INTERVAL == 0 {
            tracing::info!("Ingested {} records...", summary.ingested);
        }
    }

    tx.commit().await?;
    tracing::info!("Successfully ingested {} threat records", summary.ingested);

    Ok(summary)
}

fn read_records(path: &Path) -> Result<(ColumnMap, Vec<ByteRecord>), IngestError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let columns = ColumnMap::from_headers(reader.headers()?);
    let records = reader.byte_records().collect::<Result<Vec<_>, _>>()?;
    Ok((columns, records))
}

/// Seed the sample threat data set.
///
/// The records are literal and well formed, so any insert failure here is
/// fatal rather than skipped.
pub async fn seed_samples(conn: &mut MySqlConnection) -> Result<usize, IngestError> {
    tracing::info!("Ingesting sample threat data...");

    let samples = sample_threats();

    let mut tx = conn.begin().await?;
    for threat in &samples {
        Threat::insert(&mut *tx, threat).await?;
    }
    tx.commit().await?;

    tracing::info!("Successfully ingested {} sample threats", samples.len());
    Ok(samples.len())
}

fn sample_threat(
    title: &str,
    description: &str,
    severity: Severity,
    threat_type: &str,
    source: &str,
    indicators: &[&str],
    status: &str,
) -> NewThreat {
    NewThreat {
        title: title.to_string(),
        description: description.to_string(),
        severity,
        threat_type: threat_type.to_string(),
        source: source.to_string(),
        status: Some(status.to_string()),
        confidence: Some(SAMPLE_CONFIDENCE),
        indicators: indicators.iter().map(|i| i.to_string()).collect(),
        recommendations: recommend::generate(severity, threat_type),
        tags: vec![
            threat_type.to_string(),
            severity.to_string(),
            "sample-data".to_string(),
        ],
    }
}

fn sample_threats() -> Vec<NewThreat> {
    vec![
        sample_threat(
            "Phishing Campaign Targeting Financial Institutions",
            "Large-scale phishing campaign using sophisticated social engineering to target banking customers",
            Severity::High,
            "phishing",
            "Email Security Gateway",
            &["phishing-domain.com", "attacker@malicious.com", "203.0.113.1"],
            "active",
        ),
        sample_threat(
            "Ransomware Variant Detection",
            "New ransomware variant detected with improved encryption and anti-analysis capabilities",
            Severity::High,
            "malware",
            "Endpoint Security",
            &["ransomware.exe", "C2-server.com", "a1b2c3d4e5f6"],
            "active",
        ),
        sample_threat(
            "Suspicious Network Activity",
            "Unusual network traffic patterns suggesting potential data exfiltration",
            Severity::Medium,
            "network",
            "Network Monitor",
            &["192.168.1.100", "unusual-traffic-pattern", "port-443"],
            "investigating",
        ),
        sample_threat(
            "Brute Force Attack Detection",
            "Multiple failed login attempts detected from various IP addresses",
            Severity::Medium,
            "brute_force",
            "Authentication System",
            &["203.0.113.5", "failed-logins", "admin-account"],
            "blocked",
        ),
        sample_threat(
            "Social Engineering Attempt",
            "Reported social engineering attempt targeting IT support staff",
            Severity::Low,
            "social_engineering",
            "Security Awareness",
            &["fake-support-call", "credential-request"],
            "resolved",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_mapping_skips_bad_rows_and_keeps_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("threats.csv");

        // 10 rows, one of them with invalid UTF-8 in the title
        let mut data = Vec::from(&b"title,severity,type\n"[..]);
        for i in 0..9 {
            data.extend_from_slice(format!("threat {i},high,malware\n").as_bytes());
        }
        data.extend_from_slice(b"\xff\xfebroken,high,malware\n");
        fs::write(&path, data).unwrap();

        let (columns, records) = read_records(&path).unwrap();
        assert_eq!(records.len(), 10);

        let mut summary = IngestSummary::default();
        for (index, raw) in records.iter().enumerate() {
            match mapper::map_record(&columns, raw, index) {
                Ok(_) => summary.ingested += 1,
                Err(error) => summary.skip(index, &error),
            }
        }

        assert_eq!(summary.ingested, 9);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].index, 9);
        assert!(summary.skipped[0].reason.contains("UTF-8"));
    }

    #[test]
    fn test_read_records_missing_file_is_fatal() {
        let result = read_records(Path::new("/nonexistent/threats.csv"));
        assert!(matches!(result, Err(IngestError::Csv(_))));
    }

    #[tokio::test]
    async fn test_run_with_nonexistent_path_does_nothing() {
        // The path check happens before any connection is opened, so this
        // must succeed without a database.
        let config = Config {
            db_host: "localhost".to_string(),
            db_user: "root".to_string(),
            db_password: "password".to_string(),
            db_name: "threat_intelligence".to_string(),
            db_port: 3306,
            port: 8080,
        };

        let result = run(&config, Some("/nonexistent/threats.csv")).await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_sample_set_shape() {
        let samples = sample_threats();
        assert_eq!(samples.len(), 5);

        for threat in &samples {
            assert_eq!(threat.confidence, Some(SAMPLE_CONFIDENCE));
            assert_eq!(threat.tags.len(), 3);
            assert_eq!(threat.tags[2], "sample-data");
            assert!(threat.status.is_some());
            assert!(threat.recommendations.len() >= 3);
        }

        let severities: Vec<Severity> = samples.iter().map(|t| t.severity).collect();
        assert!(severities.contains(&Severity::High));
        assert!(severities.contains(&Severity::Medium));
        assert!(severities.contains(&Severity::Low));
    }

    #[test]
    fn test_sample_tags_order_is_type_severity_marker() {
        let samples = sample_threats();
        assert_eq!(samples[0].tags, vec!["phishing", "high", "sample-data"]);
        assert_eq!(samples[4].tags, vec!["social_engineering", "low", "sample-data"]);
    }
}
