pub mod errors;
pub mod models;
pub mod services;
pub mod stats;

use chrono::NaiveDate;
use models::{
    analytics::{DistributionProfile, Drawdown, HistogramBin},
    chart::{CorrelationMatrix, PairScatter, RiskReturnPoint},
    dataset::Dataset,
    portfolio::{Allocation, WeightCheck},
    series::{SeriesMap, SeriesSet, TimePoint, PORTFOLIO_ID},
    settings::{Settings, DEFAULT_RISK_FREE_RATE},
    summary::{SummaryRecord, SummarySort},
};
use services::{
    correlation_service::CorrelationService, series_service::SeriesService,
    summary_service::SummaryService, weighting_service::WeightingService,
};
use tracing::warn;

use errors::CoreError;

/// Main entry point for the returns-dashboard engine.
///
/// Holds one session's series, weights, visibility and settings. UI event
/// handlers call the mutators; each one recomputes the `Portfolio` series
/// before returning, and a rejected mutation leaves the prior state intact.
#[must_use]
pub struct ReturnsDashboard {
    series: SeriesSet,
    allocation: Allocation,
    settings: Settings,
    series_service: SeriesService,
    weighting_service: WeightingService,
    summary_service: SummaryService,
    correlation_service: CorrelationService,
}

impl std::fmt::Debug for ReturnsDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReturnsDashboard")
            .field("instruments", &self.series.instrument_ids)
            .field("window", &self.series.window)
            .field("filtered_points", &self.series.total_filtered_points())
            .field("settings", &self.settings)
            .finish()
    }
}

impl ReturnsDashboard {
    /// Build a session from a dataset with default settings.
    pub fn load(dataset: &Dataset) -> Result<Self, CoreError> {
        Self::load_with_settings(dataset, Settings::default())
    }

    /// Build a session from a dataset with explicit settings.
    pub fn load_with_settings(dataset: &Dataset, settings: Settings) -> Result<Self, CoreError> {
        let series_service = SeriesService::new();
        let weighting_service = WeightingService::new();

        let mut series = series_service.load(dataset)?;
        let mut allocation = Allocation::new();
        weighting_service.initialize_weights(&mut allocation, &series.instrument_ids, &dataset.weights)?;
        weighting_service.recompute_portfolio(&allocation, &mut series);

        Ok(Self {
            series,
            allocation,
            settings,
            series_service,
            weighting_service,
            summary_service: SummaryService::new(),
            correlation_service: CorrelationService::new(),
        })
    }

    /// Parse a JSON dataset and build a session from it.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let dataset = Dataset::from_json(json)?;
        Self::load(&dataset)
    }

    // ── Instruments & Series ────────────────────────────────────────

    /// All instrument ids; `Portfolio` is last.
    #[must_use]
    pub fn instrument_ids(&self) -> &[String] {
        &self.series.instrument_ids
    }

    /// Ids whose visibility flag is set, in instrument order.
    #[must_use]
    pub fn visible_instruments(&self) -> Vec<String> {
        self.series
            .instrument_ids
            .iter()
            .filter(|id| self.allocation.is_visible(id))
            .cloned()
            .collect()
    }

    /// Earliest date across all original series.
    #[must_use]
    pub fn min_date(&self) -> Option<NaiveDate> {
        self.series.min_date
    }

    /// Latest date across all original series.
    #[must_use]
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.series.max_date
    }

    /// Currently applied date window, `None` when showing full history.
    #[must_use]
    pub fn date_window(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.series.window
    }

    #[must_use]
    pub fn original_series(&self, instrument_id: &str) -> &[TimePoint] {
        self.series.original(instrument_id)
    }

    #[must_use]
    pub fn filtered_series(&self, instrument_id: &str) -> &[TimePoint] {
        self.series.filtered(instrument_id)
    }

    /// Every filtered series, `Portfolio` included.
    #[must_use]
    pub fn filtered(&self) -> &SeriesMap {
        &self.series.filtered
    }

    #[must_use]
    pub fn portfolio_series(&self) -> &[TimePoint] {
        self.series.filtered(PORTFOLIO_ID)
    }

    /// Cumulative-return variant of every non-empty filtered series.
    #[must_use]
    pub fn cumulative_returns(&self) -> SeriesMap {
        self.series_service.cumulative_returns(&self.series.filtered)
    }

    /// Cumulative-return series of a single instrument.
    #[must_use]
    pub fn cumulative_series(&self, instrument_id: &str) -> Vec<TimePoint> {
        stats::cumulative_series(self.series.filtered(instrument_id))
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Window every real instrument to `[start, end]` (inclusive) and
    /// recompute the Portfolio series.
    pub fn filter_by_date_range(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), CoreError> {
        if let Err(e) = self
            .series_service
            .filter_by_date_range(&mut self.series, start, end)
        {
            warn!(%start, %end, "date filter rejected");
            return Err(e);
        }
        self.recompute_portfolio();
        Ok(())
    }

    /// Set a real instrument's weight in percent (`0..=100`).
    /// Returns the weight-sum check after recomputation.
    pub fn set_weight(&mut self, instrument_id: &str, percent: f64) -> Result<WeightCheck, CoreError> {
        self.weighting_service.set_weight(
            &mut self.allocation,
            &mut self.series,
            instrument_id,
            percent,
            self.settings.weight_tolerance,
        )
    }

    /// Show or hide an instrument (`Portfolio` included).
    pub fn set_visibility(&mut self, instrument_id: &str, visible: bool) -> Result<WeightCheck, CoreError> {
        self.weighting_service.set_visibility(
            &mut self.allocation,
            &mut self.series,
            instrument_id,
            visible,
            self.settings.weight_tolerance,
        )
    }

    /// Flip an instrument's visibility.
    pub fn toggle_visibility(&mut self, instrument_id: &str) -> Result<WeightCheck, CoreError> {
        let visible = !self.allocation.is_visible(instrument_id);
        self.set_visibility(instrument_id, visible)
    }

    /// Rebuild the Portfolio series from current weights, visibility and window.
    pub fn recompute_portfolio(&mut self) {
        self.weighting_service
            .recompute_portfolio(&self.allocation, &mut self.series);
    }

    /// Restore initial weights, full visibility, the default risk-free rate
    /// and the full date window.
    pub fn reset(&mut self) -> Result<(), CoreError> {
        let explicit = self.allocation.explicit_weights.clone();
        let mut allocation = Allocation::new();
        self.weighting_service
            .initialize_weights(&mut allocation, &self.series.instrument_ids, &explicit)?;

        self.allocation = allocation;
        self.settings.risk_free_rate = DEFAULT_RISK_FREE_RATE;
        self.series_service.clear_filter(&mut self.series);
        self.recompute_portfolio();
        Ok(())
    }

    // ── Weights ─────────────────────────────────────────────────────

    /// Weight fraction of a real instrument, `None` for `Portfolio` or unknown ids.
    #[must_use]
    pub fn weight(&self, instrument_id: &str) -> Option<f64> {
        self.allocation.weights.get(instrument_id).copied()
    }

    #[must_use]
    pub fn is_visible(&self, instrument_id: &str) -> bool {
        self.allocation.is_visible(instrument_id)
    }

    #[must_use]
    pub fn allocation(&self) -> &Allocation {
        &self.allocation
    }

    /// Advisory weight-sum check (see `WeightingService::validate_weight_sum`).
    #[must_use]
    pub fn validate_weight_sum(&self) -> WeightCheck {
        self.weighting_service
            .validate_weight_sum(&self.allocation, self.settings.weight_tolerance)
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Summary rows for the given ids at an explicit risk-free rate.
    #[must_use]
    pub fn compute_summary(&self, instrument_ids: &[String], risk_free_rate: f64) -> Vec<SummaryRecord> {
        self.summary_service
            .compute_summary(&self.series, &self.allocation, instrument_ids, risk_free_rate)
    }

    /// Summary rows for every instrument at the configured risk-free rate.
    #[must_use]
    pub fn summary(&self) -> Vec<SummaryRecord> {
        self.compute_summary(&self.series.instrument_ids, self.settings.risk_free_rate)
    }

    /// Summary rows ordered for display.
    #[must_use]
    pub fn sorted_summary(&self, sort: &SummarySort) -> Vec<SummaryRecord> {
        let mut records = self.summary();
        sort.apply(&mut records);
        records
    }

    /// Risk/return points of the visible instruments.
    #[must_use]
    pub fn risk_return_points(&self) -> Vec<RiskReturnPoint> {
        self.summary_service
            .risk_return_points(&self.series, &self.allocation, self.settings.risk_free_rate)
    }

    /// Correlation matrix over the visible instruments.
    #[must_use]
    pub fn correlation_matrix(&self) -> CorrelationMatrix {
        self.correlation_service
            .correlation_matrix(&self.series, &self.visible_instruments())
    }

    /// Pairplot cell data for `y_id` against `x_id`.
    pub fn pair_scatter(&self, x_id: &str, y_id: &str) -> Result<PairScatter, CoreError> {
        for id in [x_id, y_id] {
            if !self.series.contains(id) {
                return Err(CoreError::UnknownInstrument(id.to_string()));
            }
        }
        Ok(self.correlation_service.pair_scatter(&self.series, x_id, y_id))
    }

    /// Max drawdown of an instrument's cumulative series.
    #[must_use]
    pub fn max_drawdown(&self, instrument_id: &str) -> Option<Drawdown> {
        stats::max_drawdown(&self.cumulative_series(instrument_id))
    }

    #[must_use]
    pub fn distribution(&self, instrument_id: &str) -> Option<DistributionProfile> {
        self.summary_service.distribution(&self.series, instrument_id)
    }

    /// Histogram of an instrument's filtered values using the configured bin count.
    #[must_use]
    pub fn histogram(&self, instrument_id: &str) -> Vec<HistogramBin> {
        self.summary_service
            .histogram(&self.series, instrument_id, self.settings.histogram_bins)
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set the risk-free rate from a UI percent value (2 → 0.02).
    pub fn set_risk_free_rate_percent(&mut self, percent: f64) -> Result<(), CoreError> {
        if !percent.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Risk-free rate must be a finite number, got {percent}"
            )));
        }
        self.settings.risk_free_rate = percent / 100.0;
        Ok(())
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Serialize summary rows as JSON for the table collaborator.
    pub fn summary_to_json(records: &[SummaryRecord]) -> Result<String, CoreError> {
        serde_json::to_string_pretty(records)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize summary: {e}")))
    }
}
