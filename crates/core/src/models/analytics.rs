use serde::{Deserialize, Serialize};

use super::series::TimePoint;

/// Largest peak-to-trough decline in a cumulative-return series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawdown {
    /// The earlier, higher point
    pub peak_start: TimePoint,

    /// The later, lower point
    pub trough: TimePoint,

    /// Negative drop in percentage points (always `<= 0`)
    pub depth: f64,
}

/// Ordinary-least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionLine {
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionLine {
    /// Evaluate the line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// One equal-width histogram bucket, `[lower, upper)` except the last which is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Descriptive statistics of an instrument's filtered periodic returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionProfile {
    pub instrument_id: String,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,

    /// Sample standard deviation; 0 with fewer than two points
    pub deviation: f64,

    pub skewness: f64,

    /// Excess kurtosis
    pub kurtosis: f64,
}
