use std::cmp::Ordering;

use crate::models::chart::{CorrelationMatrix, PairPoint, PairScatter};
use crate::models::series::{SeriesSet, TimePoint};
use crate::stats;

/// Pairwise correlation and regression between instruments, computed on
/// demand from the filtered series. Nothing is cached.
pub struct CorrelationService;

impl CorrelationService {
    pub fn new() -> Self {
        Self
    }

    /// Correlation matrix over `instrument_ids`, rows/columns in that order.
    ///
    /// Each cell pairs values on common dates; fewer than two pairs gives 0.
    pub fn correlation_matrix(&self, series: &SeriesSet, instrument_ids: &[String]) -> CorrelationMatrix {
        let values = instrument_ids
            .iter()
            .map(|a| {
                instrument_ids
                    .iter()
                    .map(|b| {
                        let pairs = common_pairs(series.filtered(a), series.filtered(b));
                        stats::pearson_correlation(&pairs)
                    })
                    .collect()
            })
            .collect();

        CorrelationMatrix {
            instrument_ids: instrument_ids.to_vec(),
            values,
        }
    }

    /// Scatter points, correlation and regression line for `y_id` against `x_id`.
    pub fn pair_scatter(&self, series: &SeriesSet, x_id: &str, y_id: &str) -> PairScatter {
        let points = common_pairs(series.filtered(x_id), series.filtered(y_id));
        let regression = if points.len() < 2 {
            None
        } else {
            stats::linear_regression(&points)
        };
        PairScatter {
            x_id: x_id.to_string(),
            y_id: y_id.to_string(),
            correlation: stats::pearson_correlation(&points),
            regression,
            points,
        }
    }
}

impl Default for CorrelationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Same-date `(x, y)` pairs of two date-sorted series, in date order.
pub fn common_pairs(xs: &[TimePoint], ys: &[TimePoint]) -> Vec<PairPoint> {
    let mut pairs = Vec::with_capacity(xs.len().min(ys.len()));
    let (mut i, mut j) = (0, 0);
    while i < xs.len() && j < ys.len() {
        match xs[i].date.cmp(&ys[j].date) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                pairs.push(PairPoint {
                    x: xs[i].value,
                    y: ys[j].value,
                });
                i += 1;
                j += 1;
            }
        }
    }
    pairs
}
