use serde::{Deserialize, Serialize};

use super::analytics::RegressionLine;

/// One bubble on the risk/return scatter plots.
///
/// The engine computes the numbers; the frontend only renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReturnPoint {
    pub instrument_id: String,

    /// Compounded return over the filtered window, in percent
    pub cumulative_return: f64,

    /// Sample standard deviation of the periodic returns
    pub volatility: f64,

    pub sharpe_ratio: f64,

    /// Weight as a fraction; `Portfolio` always reports 1.0
    pub weight: f64,
}

/// A pair of same-date values from two instruments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairPoint {
    pub x: f64,
    pub y: f64,
}

/// Scatter data for one cell of the pairplot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairScatter {
    pub x_id: String,
    pub y_id: String,
    pub points: Vec<PairPoint>,
    pub correlation: f64,

    /// `None` when fewer than two points or all x values are equal
    pub regression: Option<RegressionLine>,
}

/// Square matrix of Pearson correlations, rows and columns in `instrument_ids` order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationMatrix {
    pub instrument_ids: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlation between two instruments, `None` if either is not in the matrix
    /// or the cell is missing.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.instrument_ids.iter().position(|id| id == a)?;
        let j = self.instrument_ids.iter().position(|id| id == b)?;
        self.values.get(i)?.get(j).copied()
    }

    pub fn len(&self) -> usize {
        self.instrument_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instrument_ids.is_empty()
    }
}
