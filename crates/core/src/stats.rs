//! Pure numerical functions over periodic percentage returns.
//!
//! No shared state. Degenerate inputs (too few points, zero variance) resolve
//! to neutral values instead of NaN so renderers never see them.

use crate::models::analytics::{Drawdown, HistogramBin, RegressionLine};
use crate::models::chart::PairPoint;
use crate::models::series::TimePoint;

/// Periods per year used to annualize monthly returns.
pub const PERIODS_PER_YEAR: f64 = 12.0;

/// One compounding step: cumulative percent `acc` extended by periodic percent `value`.
pub fn compound(acc: f64, value: f64) -> f64 {
    ((1.0 + acc / 100.0) * (1.0 + value / 100.0) - 1.0) * 100.0
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Bessel-corrected sample standard deviation. `None` with fewer than two values.
pub fn deviation(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    if is_constant(values) {
        return Some(0.0);
    }
    let m = mean(values)?;
    let n = values.len() as f64;
    let var = values
        .iter()
        .map(|v| {
            let diff = v - m;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1.0);
    Some(var.sqrt())
}

/// Middle value; the average of the two middle values for even counts.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Third standardized moment, `Σ((x - mean) / std)^3 / n`. 0 when std is 0 or undefined.
pub fn skewness(values: &[f64]) -> f64 {
    standardized_moment(values, 3).unwrap_or(0.0)
}

/// Excess kurtosis, `Σ((x - mean) / std)^4 / n - 3`. 0 when std is 0 or undefined.
pub fn kurtosis(values: &[f64]) -> f64 {
    standardized_moment(values, 4).map_or(0.0, |m| m - 3.0)
}

fn standardized_moment(values: &[f64], power: i32) -> Option<f64> {
    let std = deviation(values)?;
    if std == 0.0 {
        return None;
    }
    let m = mean(values)?;
    let n = values.len() as f64;
    Some(values.iter().map(|v| ((v - m) / std).powi(power)).sum::<f64>() / n)
}

/// Closed-form OLS fit. `None` when empty or all x are equal.
pub fn linear_regression(points: &[PairPoint]) -> Option<RegressionLine> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sum_x, sum_y, sum_xy, sum_xx) = points.iter().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sxx), p| (sx + p.x, sy + p.y, sxy + p.x * p.y, sxx + p.x * p.x),
    );
    let denom = n * sum_xx - sum_x * sum_x;
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    if denom == 0.0 || is_constant(&xs) {
        return None;
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    Some(RegressionLine { slope, intercept })
}

/// Pearson correlation, `Σ(dx·dy) / sqrt(Σdx²·Σdy²)`.
///
/// 0 with fewer than two pairs or when either side has no variance.
pub fn pearson_correlation(pairs: &[PairPoint]) -> f64 {
    if pairs.len() < 2 {
        return 0.0;
    }
    let xs: Vec<f64> = pairs.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = pairs.iter().map(|p| p.y).collect();
    if is_constant(&xs) || is_constant(&ys) {
        return 0.0;
    }
    let (Some(mean_x), Some(mean_y)) = (mean(&xs), mean(&ys)) else {
        return 0.0;
    };

    let mut numerator = 0.0;
    let mut denom_x = 0.0;
    let mut denom_y = 0.0;
    for (x, y) in xs.iter().zip(&ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        numerator += dx * dy;
        denom_x += dx * dx;
        denom_y += dy * dy;
    }

    let denominator = (denom_x * denom_y).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Largest drop between any earlier point and any later, lower point of a
/// cumulative-return series. `None` when the series never declines.
///
/// Exhaustive pairwise search; on equal drops the first pair found is kept.
pub fn max_drawdown(series: &[TimePoint]) -> Option<Drawdown> {
    let mut best: Option<(usize, usize)> = None;
    let mut largest_drop = 0.0;

    for (i, peak) in series.iter().enumerate() {
        for (j, trough) in series.iter().enumerate().skip(i + 1) {
            if trough.value < peak.value {
                let drop = peak.value - trough.value;
                if drop > largest_drop {
                    largest_drop = drop;
                    best = Some((i, j));
                }
            }
        }
    }

    best.map(|(i, j)| Drawdown {
        peak_start: series[i].clone(),
        trough: series[j].clone(),
        depth: -largest_drop,
    })
}

/// Compounded return of ordered periodic returns, starting from 0.
pub fn cumulative_return(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| compound(acc, *v))
}

/// Running compounded return through each point of a periodic series.
pub fn cumulative_series(points: &[TimePoint]) -> Vec<TimePoint> {
    let mut acc = 0.0;
    points
        .iter()
        .map(|p| {
            acc = compound(acc, p.value);
            TimePoint {
                date: p.date,
                value: acc,
                instrument_id: p.instrument_id.clone(),
            }
        })
        .collect()
}

/// Annualized Sharpe ratio of monthly returns:
/// `(mean * 12 - rf) / (std * sqrt(12))`, 0 when std is 0 or undefined.
pub fn sharpe_ratio(values: &[f64], risk_free_rate: f64) -> f64 {
    let std = deviation(values).unwrap_or(0.0);
    if std <= 0.0 {
        return 0.0;
    }
    let annualized_return = mean(values).unwrap_or(0.0) * PERIODS_PER_YEAR;
    (annualized_return - risk_free_rate) / (std * PERIODS_PER_YEAR.sqrt())
}

/// Equal-width histogram over `[min, max]`.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();
    for v in values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        result[idx].count += 1;
    }
    result
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}
