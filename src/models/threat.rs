//! Threat record model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, MySqlExecutor};

/// Three-level threat severity.
///
/// Source feeds use a mixed vocabulary (synonyms, numeric codes); everything
/// is collapsed to one of these three values before persistence. Stored and
/// served as its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Map heterogeneous severity input to a standard value.
    ///
    /// Total over its input domain: unrecognized or absent values resolve
    /// to `Medium`, never to an error.
    pub fn normalize(value: Option<&str>) -> Self {
        let raw = match value {
            Some(v) => v.trim().to_lowercase(),
            None => return Severity::Medium,
        };

        match raw.as_str() {
            "high" | "critical" | "3" | "severe" => Severity::High,
            "medium" | "moderate" | "2" | "warning" => Severity::Medium,
            "low" | "info" | "1" | "minor" => Severity::Low,
            _ => Severity::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted threat record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Threat {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub severity: Severity,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub threat_type: String,
    pub source: Option<String>,
    pub status: Option<String>,
    pub confidence: Option<f32>,
    pub indicators: Json<Vec<String>>,
    pub recommendations: Json<Vec<String>>,
    pub tags: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A threat record ready for insertion.
///
/// Built transiently per source row by the ingestion pipeline; status and
/// confidence stay `None` on the CSV path.
#[derive(Debug, Clone)]
pub struct NewThreat {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub threat_type: String,
    pub source: String,
    pub status: Option<String>,
    pub confidence: Option<f32>,
    pub indicators: Vec<String>,
    pub recommendations: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ThreatFilter {
    pub severity: Option<Severity>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Threat {
    pub async fn insert(
        executor: impl MySqlExecutor<'_>,
        record: &NewThreat,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO threats (title, description, severity, type, source, status, confidence, indicators, recommendations, tags)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.severity)
        .bind(&record.threat_type)
        .bind(&record.source)
        .bind(record.status.as_deref())
        .bind(record.confidence)
        .bind(Json(&record.indicators))
        .bind(Json(&record.recommendations))
        .bind(Json(&record.tags))
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(
        executor: impl MySqlExecutor<'_>,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Threat>("SELECT * FROM threats WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn list(
        executor: impl MySqlExecutor<'_>,
        filter: ThreatFilter,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let limit = filter.limit.unwrap_or(50);
        let offset = filter.offset.unwrap_or(0);

        sqlx::query_as::<_, Threat>(
            r#"
            SELECT * FROM threats
            WHERE (? IS NULL OR severity = ?)
              AND (? IS NULL OR status = ?)
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(filter.severity)
        .bind(filter.severity)
        .bind(&filter.status)
        .bind(&filter.status)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_high_synonyms() {
        for value in ["high", "Critical", "3", "SEVERE"] {
            assert_eq!(Severity::normalize(Some(value)), Severity::High, "{value}");
        }
    }

    #[test]
    fn test_normalize_medium_synonyms() {
        for value in ["medium", "Moderate", "2", "WARNING"] {
            assert_eq!(Severity::normalize(Some(value)), Severity::Medium, "{value}");
        }
    }

    #[test]
    fn test_normalize_low_synonyms() {
        for value in ["low", "Info", "1", "MINOR"] {
            assert_eq!(Severity::normalize(Some(value)), Severity::Low, "{value}");
        }
    }

    #[test]
    fn test_normalize_unrecognized_falls_back_to_medium() {
        for value in ["", "urgent", "4", "n/a", "  "] {
            assert_eq!(Severity::normalize(Some(value)), Severity::Medium, "{value:?}");
        }
        assert_eq!(Severity::normalize(None), Severity::Medium);
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(Severity::normalize(Some("  high ")), Severity::High);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::High.to_string(), "high");
        assert_eq!(Severity::Medium.as_str(), "medium");
        assert_eq!(Severity::Low.as_str(), "low");
    }
}
