use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CoreError;

/// One raw input row as supplied by the page bootstrap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// ISO-8601 date (`2024-01-31`) or full RFC 3339 timestamp.
    pub date: String,

    #[serde(rename = "valueNumerico", alias = "numericValue")]
    pub numeric_value: f64,
}

impl RawRecord {
    pub fn new(date: impl Into<String>, numeric_value: f64) -> Self {
        Self {
            date: date.into(),
            numeric_value,
        }
    }
}

/// The single immutable snapshot a session is built from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(rename = "registrosPorISIN", alias = "recordsByInstrument")]
    pub records_by_instrument: BTreeMap<String, Vec<RawRecord>>,

    /// Optional explicit weights as fractions in `[0, 1]`.
    #[serde(rename = "pesosCartera", alias = "weights", default)]
    pub weights: BTreeMap<String, f64>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dataset from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style helper: add records for an instrument.
    pub fn with_records(mut self, instrument_id: impl Into<String>, records: Vec<RawRecord>) -> Self {
        self.records_by_instrument.insert(instrument_id.into(), records);
        self
    }

    /// Builder-style helper: set an explicit weight fraction.
    pub fn with_weight(mut self, instrument_id: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(instrument_id.into(), weight);
        self
    }
}

/// Parse a record date at day resolution.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
