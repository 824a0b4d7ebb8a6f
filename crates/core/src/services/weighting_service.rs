use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::portfolio::{Allocation, WeightCheck};
use crate::models::series::{is_portfolio, SeriesSet, TimePoint, PORTFOLIO_ID};

/// Owns the weighting rules: initial weights, weight/visibility edits,
/// the blended `Portfolio` series and the weight-sum check.
///
/// Every mutation fully recomputes the `Portfolio` series from the current
/// weights, visibility and filtered series.
pub struct WeightingService;

impl WeightingService {
    pub fn new() -> Self {
        Self
    }

    /// Set initial weights and make every instrument visible.
    ///
    /// A real instrument takes its explicit weight when one is supplied,
    /// otherwise `1 / (count - 1)` where `count` includes `Portfolio`.
    /// Explicit weights for real instruments must lie in `[0, 1]`; on error the
    /// allocation is untouched. Weights for unknown ids or `Portfolio` are ignored.
    pub fn initialize_weights(
        &self,
        allocation: &mut Allocation,
        instrument_ids: &[String],
        explicit_weights: &BTreeMap<String, f64>,
    ) -> Result<(), CoreError> {
        for (id, weight) in explicit_weights {
            if !instrument_ids.contains(id) || is_portfolio(id) {
                warn!(instrument = %id, "explicit weight for unknown instrument ignored");
                continue;
            }
            if !(0.0..=1.0).contains(weight) {
                return Err(CoreError::OutOfRange {
                    instrument_id: id.clone(),
                    percent: weight * 100.0,
                });
            }
        }

        let uniform = if instrument_ids.len() > 1 {
            1.0 / (instrument_ids.len() - 1) as f64
        } else {
            0.0
        };

        allocation.weights.clear();
        allocation.visibility.clear();
        allocation.explicit_weights.clear();
        for id in instrument_ids {
            if !is_portfolio(id) {
                let weight = match explicit_weights.get(id) {
                    Some(&w) => {
                        allocation.explicit_weights.insert(id.clone(), w);
                        w
                    }
                    None => uniform,
                };
                allocation.weights.insert(id.clone(), weight);
            }
            allocation.visibility.insert(id.clone(), true);
        }
        Ok(())
    }

    /// Store `percent / 100` as the instrument's weight, then recompute the
    /// Portfolio series and re-run the weight-sum check.
    pub fn set_weight(
        &self,
        allocation: &mut Allocation,
        series: &mut SeriesSet,
        instrument_id: &str,
        percent: f64,
        tolerance: f64,
    ) -> Result<WeightCheck, CoreError> {
        if !series.contains(instrument_id) {
            return Err(CoreError::UnknownInstrument(instrument_id.to_string()));
        }
        if is_portfolio(instrument_id) {
            return Err(CoreError::ValidationError(
                "Portfolio weight is fixed at 100% and cannot be edited".into(),
            ));
        }
        if !(0.0..=100.0).contains(&percent) {
            warn!(instrument = %instrument_id, percent, "weight rejected");
            return Err(CoreError::OutOfRange {
                instrument_id: instrument_id.to_string(),
                percent,
            });
        }

        allocation
            .weights
            .insert(instrument_id.to_string(), percent / 100.0);
        self.recompute_portfolio(allocation, series);
        Ok(self.validate_weight_sum(allocation, tolerance))
    }

    /// Show or hide an instrument, then recompute and re-check.
    pub fn set_visibility(
        &self,
        allocation: &mut Allocation,
        series: &mut SeriesSet,
        instrument_id: &str,
        visible: bool,
        tolerance: f64,
    ) -> Result<WeightCheck, CoreError> {
        if !series.contains(instrument_id) {
            return Err(CoreError::UnknownInstrument(instrument_id.to_string()));
        }
        allocation
            .visibility
            .insert(instrument_id.to_string(), visible);
        self.recompute_portfolio(allocation, series);
        Ok(self.validate_weight_sum(allocation, tolerance))
    }

    /// Rebuild the `Portfolio` filtered series.
    ///
    /// For every date in the union of the visible real instruments' filtered
    /// series, the value is the weighted mean over the instruments that have a
    /// point on that date, with weights renormalized per date. A date where all
    /// contributing weights are zero gets 0. No visible real instrument yields
    /// an empty series.
    pub fn recompute_portfolio(&self, allocation: &Allocation, series: &mut SeriesSet) {
        let visible: Vec<String> = series
            .real_instruments()
            .filter(|id| allocation.is_visible(id))
            .map(str::to_string)
            .collect();

        let dates: BTreeSet<NaiveDate> = visible
            .iter()
            .flat_map(|id| series.filtered(id).iter().map(|p| p.date))
            .collect();

        let blended: Vec<TimePoint> = dates
            .into_iter()
            .map(|date| {
                let mut weighted = 0.0;
                let mut total_weight = 0.0;
                for id in &visible {
                    if let Some(value) = series.filtered_value_on(id, date) {
                        let weight = allocation.weight(id);
                        weighted += value * weight;
                        total_weight += weight;
                    }
                }
                let value = if total_weight > 0.0 {
                    weighted / total_weight
                } else {
                    0.0
                };
                TimePoint::new(date, value, PORTFOLIO_ID)
            })
            .collect();

        debug!(
            visible = visible.len(),
            points = blended.len(),
            "portfolio series recomputed"
        );
        series.filtered.insert(PORTFOLIO_ID.to_string(), blended);
    }

    /// Advisory check that real-instrument weights sum to 100%.
    ///
    /// Sums every real instrument's weight regardless of its own visibility.
    /// Only enforced while `Portfolio` is visible; otherwise always valid.
    pub fn validate_weight_sum(&self, allocation: &Allocation, tolerance: f64) -> WeightCheck {
        let sum = allocation.weight_sum();
        if !allocation.is_visible(PORTFOLIO_ID) || (sum - 1.0).abs() <= tolerance {
            return WeightCheck::valid(sum);
        }
        warn!(weight_sum = sum, "weight sum does not equal 100%");
        WeightCheck::invalid(sum)
    }
}

impl Default for WeightingService {
    fn default() -> Self {
        Self::new()
    }
}
