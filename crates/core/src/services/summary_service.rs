use tracing::debug;

use crate::models::analytics::{DistributionProfile, HistogramBin};
use crate::models::chart::RiskReturnPoint;
use crate::models::portfolio::Allocation;
use crate::models::series::{is_portfolio, SeriesSet};
use crate::models::summary::SummaryRecord;
use crate::stats;

/// Produces per-instrument statistics records for the table and scatter plots.
///
/// Stateless: every call recomputes from the current filtered series.
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// One record per instrument with at least two filtered points, in the
    /// order of `instrument_ids`. Instruments with fewer points are omitted.
    pub fn compute_summary(
        &self,
        series: &SeriesSet,
        allocation: &Allocation,
        instrument_ids: &[String],
        risk_free_rate: f64,
    ) -> Vec<SummaryRecord> {
        let records: Vec<SummaryRecord> = instrument_ids
            .iter()
            .filter_map(|id| {
                let points = series.filtered(id);
                if points.len() < 2 {
                    return None;
                }
                let values: Vec<f64> = points.iter().map(|p| p.value).collect();

                let max_drawdown_depth = stats::max_drawdown(&stats::cumulative_series(points))
                    .map_or(0.0, |dd| dd.depth.abs());

                Some(SummaryRecord {
                    instrument_id: id.clone(),
                    weight_percent: weight_fraction(allocation, id) * 100.0,
                    cumulative_return: stats::cumulative_return(&values),
                    volatility: stats::deviation(&values).unwrap_or(0.0),
                    sharpe_ratio: stats::sharpe_ratio(&values, risk_free_rate),
                    max_drawdown_depth,
                    mean: stats::mean(&values).unwrap_or(0.0),
                    median: stats::median(&values).unwrap_or(0.0),
                    visible: allocation.is_visible(id),
                })
            })
            .collect();

        debug!(rows = records.len(), risk_free_rate, "summary computed");
        records
    }

    /// Risk/return bubbles for visible instruments with at least two points.
    pub fn risk_return_points(
        &self,
        series: &SeriesSet,
        allocation: &Allocation,
        risk_free_rate: f64,
    ) -> Vec<RiskReturnPoint> {
        series
            .instrument_ids
            .iter()
            .filter(|id| allocation.is_visible(id))
            .filter_map(|id| {
                let values = series.filtered_values(id);
                if values.len() < 2 {
                    return None;
                }
                Some(RiskReturnPoint {
                    instrument_id: id.clone(),
                    cumulative_return: stats::cumulative_return(&values),
                    volatility: stats::deviation(&values).unwrap_or(0.0),
                    sharpe_ratio: stats::sharpe_ratio(&values, risk_free_rate),
                    weight: weight_fraction(allocation, id),
                })
            })
            .collect()
    }

    /// Descriptive statistics of an instrument's filtered values.
    /// `None` when the series is empty.
    pub fn distribution(&self, series: &SeriesSet, instrument_id: &str) -> Option<DistributionProfile> {
        let values = series.filtered_values(instrument_id);
        if values.is_empty() {
            return None;
        }
        Some(DistributionProfile {
            instrument_id: instrument_id.to_string(),
            count: values.len(),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean: stats::mean(&values)?,
            median: stats::median(&values)?,
            deviation: stats::deviation(&values).unwrap_or(0.0),
            skewness: stats::skewness(&values),
            kurtosis: stats::kurtosis(&values),
        })
    }

    pub fn histogram(&self, series: &SeriesSet, instrument_id: &str, bins: usize) -> Vec<HistogramBin> {
        stats::histogram(&series.filtered_values(instrument_id), bins)
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}

fn weight_fraction(allocation: &Allocation, instrument_id: &str) -> f64 {
    if is_portfolio(instrument_id) {
        1.0
    } else {
        allocation.weight(instrument_id)
    }
}
