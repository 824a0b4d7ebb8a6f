use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::errors::CoreError;
use crate::models::dataset::{parse_date, Dataset};
use crate::models::series::{is_portfolio, SeriesMap, SeriesSet, TimePoint, PORTFOLIO_ID};
use crate::stats;

/// Builds and windows the per-instrument series.
///
/// Pure data transformation, no I/O. The derived `Portfolio` series is not
/// touched here; see `WeightingService::recompute_portfolio`.
pub struct SeriesService;

impl SeriesService {
    pub fn new() -> Self {
        Self
    }

    /// Build the original series for every instrument in the dataset.
    ///
    /// Records are parsed, sorted ascending by date and de-duplicated (the first
    /// record for a date wins). `filtered` starts as an independent copy of
    /// `original`. Records listed under the reserved `Portfolio` id are ignored.
    pub fn load(&self, dataset: &Dataset) -> Result<SeriesSet, CoreError> {
        let mut set = SeriesSet::new();

        for (instrument_id, records) in &dataset.records_by_instrument {
            if is_portfolio(instrument_id) {
                if !records.is_empty() {
                    warn!(
                        records = records.len(),
                        "ignoring records supplied for the reserved Portfolio id"
                    );
                }
                continue;
            }

            let mut points = Vec::with_capacity(records.len());
            for record in records {
                let date = parse_date(&record.date).ok_or_else(|| CoreError::InvalidRecord {
                    instrument_id: instrument_id.clone(),
                    message: format!("unparsable date '{}'", record.date),
                })?;
                points.push(TimePoint::new(date, record.numeric_value, instrument_id.as_str()));
            }

            // Stable sort keeps input order among equal dates, so dedup keeps the first.
            points.sort_by_key(|p| p.date);
            let before = points.len();
            points.dedup_by_key(|p| p.date);
            if points.len() < before {
                warn!(
                    instrument = %instrument_id,
                    dropped = before - points.len(),
                    "dropped records with duplicate dates"
                );
            }

            set.instrument_ids.push(instrument_id.clone());
            set.original.insert(instrument_id.clone(), points);
        }

        if set.instrument_ids.is_empty() {
            return Err(CoreError::ValidationError(
                "Dataset contains no instruments".into(),
            ));
        }
        set.instrument_ids.push(PORTFOLIO_ID.to_string());

        set.min_date = set.original.values().filter_map(|s| s.first()).map(|p| p.date).min();
        set.max_date = set.original.values().filter_map(|s| s.last()).map(|p| p.date).max();
        set.filtered = set.original.clone();

        info!(
            instruments = set.instrument_ids.len() - 1,
            min_date = ?set.min_date,
            max_date = ?set.max_date,
            "dataset loaded"
        );
        Ok(set)
    }

    /// Replace every real instrument's filtered series with the inclusive
    /// `[start, end]` sub-range of its original series.
    ///
    /// Rejects `start > end` without touching any series.
    pub fn filter_by_date_range(
        &self,
        set: &mut SeriesSet,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(), CoreError> {
        if start > end {
            return Err(CoreError::InvalidRange { start, end });
        }

        let ids: Vec<String> = set.real_instruments().map(str::to_string).collect();
        for id in ids {
            let range = set.original_range(&id, start, end);
            set.filtered.insert(id, range);
        }
        set.window = Some((start, end));

        debug!(%start, %end, points = set.total_filtered_points(), "date filter applied");
        Ok(())
    }

    /// Restore the full history window.
    pub fn clear_filter(&self, set: &mut SeriesSet) {
        let ids: Vec<String> = set.real_instruments().map(str::to_string).collect();
        for id in ids {
            let full = set.original(&id).to_vec();
            set.filtered.insert(id, full);
        }
        set.window = None;
    }

    /// Cumulative-return variant of every non-empty series in `series`.
    ///
    /// Does not modify the input.
    pub fn cumulative_returns(&self, series: &SeriesMap) -> SeriesMap {
        series
            .iter()
            .filter(|(_, points)| !points.is_empty())
            .map(|(id, points)| (id.clone(), stats::cumulative_series(points)))
            .collect()
    }
}

impl Default for SeriesService {
    fn default() -> Self {
        Self::new()
    }
}
