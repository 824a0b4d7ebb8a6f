use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved id of the synthetic blended series.
pub const PORTFOLIO_ID: &str = "Portfolio";

/// Returns `true` for the reserved synthetic `Portfolio` id.
pub fn is_portfolio(instrument_id: &str) -> bool {
    instrument_id == PORTFOLIO_ID
}

/// A single periodic observation for one instrument (date → percentage value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePoint {
    pub date: NaiveDate,
    pub value: f64,
    pub instrument_id: String,
}

impl TimePoint {
    pub fn new(date: NaiveDate, value: f64, instrument_id: impl Into<String>) -> Self {
        Self {
            date,
            value,
            instrument_id: instrument_id.into(),
        }
    }
}

/// Instrument id → date-sorted series.
pub type SeriesMap = BTreeMap<String, Vec<TimePoint>>;

/// All series held for one dashboard session.
///
/// - `original`: full history per real instrument, written once at load.
/// - `filtered`: the date-windowed view, plus the derived `Portfolio` series.
///
/// Every series is sorted ascending by date with no duplicate dates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesSet {
    /// Instrument ids in display order; `Portfolio` is always last.
    pub instrument_ids: Vec<String>,

    pub original: SeriesMap,

    pub filtered: SeriesMap,

    /// Earliest date across all original series.
    pub min_date: Option<NaiveDate>,

    /// Latest date across all original series.
    pub max_date: Option<NaiveDate>,

    /// Currently applied inclusive window, `None` when showing full history.
    pub window: Option<(NaiveDate, NaiveDate)>,
}

impl SeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filtered series for an instrument (empty when unknown).
    pub fn filtered(&self, instrument_id: &str) -> &[TimePoint] {
        self.filtered
            .get(instrument_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Original series for an instrument (empty for `Portfolio` or unknown ids).
    pub fn original(&self, instrument_id: &str) -> &[TimePoint] {
        self.original
            .get(instrument_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Filtered values only, in date order.
    pub fn filtered_values(&self, instrument_id: &str) -> Vec<f64> {
        self.filtered(instrument_id).iter().map(|p| p.value).collect()
    }

    /// Real (non-Portfolio) instrument ids in display order.
    pub fn real_instruments(&self) -> impl Iterator<Item = &str> {
        self.instrument_ids
            .iter()
            .map(String::as_str)
            .filter(|id| !is_portfolio(id))
    }

    pub fn contains(&self, instrument_id: &str) -> bool {
        self.instrument_ids.iter().any(|id| id == instrument_id)
    }

    /// Filtered value of an instrument on an exact date. Binary search (O(log n)).
    pub fn filtered_value_on(&self, instrument_id: &str, date: NaiveDate) -> Option<f64> {
        let points = self.filtered(instrument_id);
        points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|idx| points[idx].value)
    }

    /// Sub-range of an instrument's original series, inclusive on both ends.
    pub fn original_range(&self, instrument_id: &str, from: NaiveDate, to: NaiveDate) -> Vec<TimePoint> {
        let points = self.original(instrument_id);
        let start = points
            .binary_search_by_key(&from, |p| p.date)
            .unwrap_or_else(|pos| pos);
        let end = points
            .binary_search_by_key(&to, |p| p.date)
            .map(|pos| pos + 1)
            .unwrap_or_else(|pos| pos);
        if start >= end {
            return Vec::new();
        }
        points[start..end].to_vec()
    }

    /// Total number of filtered points across all series (Portfolio included).
    pub fn total_filtered_points(&self) -> usize {
        self.filtered.values().map(Vec::len).sum()
    }
}
