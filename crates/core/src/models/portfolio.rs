use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Per-instrument weight and visibility state.
///
/// Weights are fractions in `[0, 1]` and only exist for real instruments.
/// Visibility exists for every instrument, `Portfolio` included.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Allocation {
    pub weights: BTreeMap<String, f64>,

    pub visibility: BTreeMap<String, bool>,

    /// Weights supplied with the dataset, kept so a reset can restore them.
    #[serde(default)]
    pub explicit_weights: BTreeMap<String, f64>,
}

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight fraction of an instrument (0 when unset).
    pub fn weight(&self, instrument_id: &str) -> f64 {
        self.weights.get(instrument_id).copied().unwrap_or(0.0)
    }

    /// Visibility flag (unknown ids are hidden).
    pub fn is_visible(&self, instrument_id: &str) -> bool {
        self.visibility.get(instrument_id).copied().unwrap_or(false)
    }

    /// Sum of all real-instrument weights, visible or not, in instrument id order.
    pub fn weight_sum(&self) -> f64 {
        self.weights.values().sum()
    }
}

/// Which side of 100% an invalid weight sum lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightDeviation {
    Over,
    Under,
}

impl fmt::Display for WeightDeviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightDeviation::Over => write!(f, "Over"),
            WeightDeviation::Under => write!(f, "Under"),
        }
    }
}

/// Outcome of the advisory weight-sum check.
///
/// Invalid state never blocks other operations; renderers use it to decide
/// between drawing data and showing a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightCheck {
    pub valid: bool,

    /// Sum of real-instrument weights as a fraction.
    pub weight_sum: f64,

    /// `None` when valid.
    pub deviation: Option<WeightDeviation>,

    /// Banner text for the warning collaborator, `None` when valid.
    pub message: Option<String>,
}

impl WeightCheck {
    pub fn valid(weight_sum: f64) -> Self {
        Self {
            valid: true,
            weight_sum,
            deviation: None,
            message: None,
        }
    }

    pub fn invalid(weight_sum: f64) -> Self {
        let pct = weight_sum * 100.0;
        let (deviation, message) = if weight_sum > 1.0 {
            (
                WeightDeviation::Over,
                format!(
                    "Weight sum exceeds 100% ({pct:.2}%). Adjust weights or uncheck Portfolio to view charts."
                ),
            )
        } else {
            (
                WeightDeviation::Under,
                format!(
                    "Weight sum is less than 100% ({pct:.2}%). Adjust weights or uncheck Portfolio to view charts."
                ),
            )
        };
        Self {
            valid: false,
            weight_sum,
            deviation: Some(deviation),
            message: Some(message),
        }
    }
}
