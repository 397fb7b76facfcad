//! CSV row mapping
//!
//! Maps heterogeneous CSV columns onto the threat schema. Every field has a
//! fallback; the only way a row can fail to map is invalid UTF-8 in the
//! record, which is a per-row error (the row is skipped, not the batch).

use csv::{ByteRecord, StringRecord};

use super::{recommend, RowError};
use crate::models::{NewThreat, Severity};

/// Column indexes for the fields the mapper understands, resolved once from
/// the header row. Unknown columns are ignored.
#[derive(Debug, Default)]
pub struct ColumnMap {
    title: Option<usize>,
    description: Option<usize>,
    text: Option<usize>,
    severity: Option<usize>,
    label: Option<usize>,
    threat_type: Option<usize>,
    source: Option<usize>,
    indicators: Option<usize>,
}

impl ColumnMap {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let mut map = ColumnMap::default();
        for (index, name) in headers.iter().enumerate() {
            match name.trim() {
                "title" => map.title = Some(index),
                "description" => map.description = Some(index),
                "text" => map.text = Some(index),
                "severity" => map.severity = Some(index),
                "label" => map.label = Some(index),
                "type" => map.threat_type = Some(index),
                "source" => map.source = Some(index),
                "indicators" => map.indicators = Some(index),
                _ => {}
            }
        }
        map
    }
}

/// Map one CSV record to a new threat record.
///
/// `index` is the 0-based position of the record in the file; it feeds the
/// synthesized 1-based title placeholder for rows without a title.
pub fn map_record(
    columns: &ColumnMap,
    raw: &ByteRecord,
    index: usize,
) -> Result<NewThreat, RowError> {
    let record = StringRecord::from_byte_record(raw.clone())?;

    let title = cell(&record, columns.title)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Threat {}", index + 1));

    let description = cell(&record, columns.description)
        .or_else(|| cell(&record, columns.text))
        .unwrap_or("")
        .to_string();

    let severity = Severity::normalize(
        cell(&record, columns.severity).or_else(|| cell(&record, columns.label)),
    );

    let threat_type = cell(&record, columns.threat_type)
        .unwrap_or("unknown")
        .to_string();

    let source = cell(&record, columns.source)
        .unwrap_or("CSV Import")
        .to_string();

    let indicators = match cell(&record, columns.indicators) {
        Some(value) => parse_indicators(value),
        None => Vec::new(),
    };

    let recommendations = recommend::generate(severity, &threat_type);
    let tags = vec![threat_type.clone(), severity.to_string()];

    Ok(NewThreat {
        title,
        description,
        severity,
        threat_type,
        source,
        status: None,
        confidence: None,
        indicators,
        recommendations,
        tags,
    })
}

/// Fetch a cell by resolved column index; empty or whitespace-only cells
/// count as absent so fallbacks apply.
fn cell<'r>(record: &'r StringRecord, index: Option<usize>) -> Option<&'r str> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Parse an indicators cell as a JSON string array. A value that is not a
/// valid array becomes a single-element list holding the raw text — a
/// malformed list is kept as one noisy indicator rather than dropped.
fn parse_indicators(value: &str) -> Vec<String> {
    serde_json::from_str::<Vec<String>>(value).unwrap_or_else(|_| vec![value.to_string()])
}
