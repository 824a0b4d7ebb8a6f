use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::series::is_portfolio;

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub instrument_id: String,

    /// Weight in percent; `Portfolio` always reports 100
    pub weight_percent: f64,

    pub cumulative_return: f64,

    /// Sample standard deviation of the periodic returns
    pub volatility: f64,

    pub sharpe_ratio: f64,

    /// Absolute depth of the max drawdown (0 when there is none)
    pub max_drawdown_depth: f64,

    pub mean: f64,

    pub median: f64,

    pub visible: bool,
}

impl SummaryRecord {
    /// Numeric value of a sortable column.
    pub fn column_value(&self, column: SummaryColumn) -> f64 {
        match column {
            SummaryColumn::Weight => self.weight_percent,
            SummaryColumn::CumulativeReturn => self.cumulative_return,
            SummaryColumn::Volatility => self.volatility,
            SummaryColumn::SharpeRatio => self.sharpe_ratio,
            SummaryColumn::MaxDrawdown => self.max_drawdown_depth,
            SummaryColumn::Mean => self.mean,
            SummaryColumn::Median => self.median,
        }
    }
}

/// Sortable columns of the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummaryColumn {
    Weight,
    CumulativeReturn,
    Volatility,
    SharpeRatio,
    MaxDrawdown,
    Mean,
    Median,
}

impl fmt::Display for SummaryColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SummaryColumn::Weight => "weight",
            SummaryColumn::CumulativeReturn => "cumulativeReturn",
            SummaryColumn::Volatility => "volatility",
            SummaryColumn::SharpeRatio => "sharpeRatio",
            SummaryColumn::MaxDrawdown => "maxDrawdown",
            SummaryColumn::Mean => "mean",
            SummaryColumn::Median => "median",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Current sort of the summary table.
///
/// Clicking a column cycles: unsorted → descending → ascending → unsorted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySort {
    pub active: Option<(SummaryColumn, SortDirection)>,
}

impl SummarySort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the sort state for a clicked column.
    pub fn toggle(&mut self, column: SummaryColumn) {
        self.active = match self.active {
            Some((current, SortDirection::Desc)) if current == column => {
                Some((column, SortDirection::Asc))
            }
            Some((current, SortDirection::Asc)) if current == column => None,
            _ => Some((column, SortDirection::Desc)),
        };
    }

    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Order records for display.
    ///
    /// Unsorted keeps computation order but moves the `Portfolio` row last.
    pub fn apply(&self, records: &mut [SummaryRecord]) {
        match self.active {
            Some((column, direction)) => {
                records.sort_by(|a, b| {
                    let ord = a
                        .column_value(column)
                        .partial_cmp(&b.column_value(column))
                        .unwrap_or(Ordering::Equal);
                    match direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    }
                });
            }
            // stable: real instruments keep their relative order
            None => records.sort_by_key(|r| is_portfolio(&r.instrument_id)),
        }
    }
}
