use serde::{Deserialize, Serialize};

/// Default annualized risk-free rate (2%).
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Allowed distance of the weight sum from 100%.
pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 0.001;

/// Bin count used for distribution histograms.
pub const DEFAULT_HISTOGRAM_BINS: usize = 15;

/// User-adjustable session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Annualized risk-free rate as a fraction (0.02 = 2%).
    pub risk_free_rate: f64,

    pub weight_tolerance: f64,

    pub histogram_bins: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            weight_tolerance: DEFAULT_WEIGHT_TOLERANCE,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}
