// ═══════════════════════════════════════════════════════════════════
// Statistics Tests — descriptive stats, regression, correlation,
// drawdown, compounding, Sharpe, histogram
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use returns_dashboard_core::models::chart::PairPoint;
use returns_dashboard_core::models::series::TimePoint;
use returns_dashboard_core::stats;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn series(values: &[f64]) -> Vec<TimePoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| TimePoint::new(d(2024, 1, 1) + chrono::Days::new(i as u64), *v, "X"))
        .collect()
}

fn pairs(xs: &[f64], ys: &[f64]) -> Vec<PairPoint> {
    xs.iter().zip(ys).map(|(x, y)| PairPoint { x: *x, y: *y }).collect()
}

// ── Mean / deviation / median ───────────────────────────────────────

mod descriptive {
    use super::*;

    #[test]
    fn mean_of_values() {
        assert!((stats::mean(&[1.0, 2.0, 3.0, 6.0]).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert!(stats::mean(&[]).is_none());
    }

    #[test]
    fn deviation_is_sample_std() {
        let dev = stats::deviation(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((dev - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn deviation_needs_two_values() {
        assert!(stats::deviation(&[]).is_none());
        assert!(stats::deviation(&[5.0]).is_none());
    }

    #[test]
    fn deviation_of_constant_is_zero() {
        assert_eq!(stats::deviation(&[0.1, 0.1, 0.1]), Some(0.0));
    }

    #[test]
    fn median_odd_count() {
        assert_eq!(stats::median(&[3.0, 1.0, 2.0]), Some(2.0));
    }

    #[test]
    fn median_even_count_averages_middle() {
        assert_eq!(stats::median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn median_does_not_reorder_input() {
        let values = vec![3.0, 1.0, 2.0];
        let _ = stats::median(&values);
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn median_of_empty_is_none() {
        assert!(stats::median(&[]).is_none());
    }
}

// ── Skewness / kurtosis ─────────────────────────────────────────────

mod moments {
    use super::*;

    #[test]
    fn symmetric_input_has_zero_skew() {
        assert!(stats::skewness(&[1.0, 2.0, 3.0]).abs() < 1e-12);
    }

    #[test]
    fn right_tail_has_positive_skew() {
        assert!(stats::skewness(&[1.0, 1.0, 1.0, 10.0]) > 0.0);
    }

    #[test]
    fn kurtosis_is_excess() {
        // std = 1, Σz⁴ = 2, 2/3 - 3
        assert!((stats::kurtosis(&[1.0, 2.0, 3.0]) - (2.0 / 3.0 - 3.0)).abs() < 1e-12);
    }

    #[test]
    fn constant_input_resolves_to_zero() {
        assert_eq!(stats::skewness(&[0.1, 0.1, 0.1]), 0.0);
        assert_eq!(stats::kurtosis(&[0.1, 0.1, 0.1]), 0.0);
    }

    #[test]
    fn single_value_resolves_to_zero() {
        assert_eq!(stats::skewness(&[4.0]), 0.0);
        assert_eq!(stats::kurtosis(&[4.0]), 0.0);
    }
}

// ── Regression / correlation ────────────────────────────────────────

mod regression {
    use super::*;

    #[test]
    fn exact_line() {
        let line = stats::linear_regression(&pairs(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0])).unwrap();
        assert!((line.slope - 2.0).abs() < 1e-12);
        assert!(line.intercept.abs() < 1e-12);
        assert!((line.predict(10.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn with_intercept() {
        let line = stats::linear_regression(&pairs(&[0.0, 1.0, 2.0], &[1.0, 4.0, 7.0])).unwrap();
        assert!((line.slope - 3.0).abs() < 1e-12);
        assert!((line.intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn all_x_equal_is_undefined() {
        assert!(stats::linear_regression(&pairs(&[2.0, 2.0, 2.0], &[1.0, 5.0, 9.0])).is_none());
        assert!(stats::linear_regression(&pairs(&[0.1, 0.1, 0.1], &[1.0, 5.0, 9.0])).is_none());
    }

    #[test]
    fn empty_is_undefined() {
        assert!(stats::linear_regression(&[]).is_none());
    }
}

mod correlation {
    use super::*;

    #[test]
    fn self_correlation_is_one() {
        let xs = [1.5, -2.0, 0.3, 4.1, -0.7];
        let r = stats::pearson_correlation(&pairs(&xs, &xs));
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverse_is_minus_one() {
        let r = stats::pearson_correlation(&pairs(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]));
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_series_is_zero() {
        let xs = [0.1, 0.1, 0.1, 0.1];
        assert_eq!(stats::pearson_correlation(&pairs(&xs, &xs)), 0.0);
        assert_eq!(stats::pearson_correlation(&pairs(&xs, &[1.0, 2.0, 3.0, 4.0])), 0.0);
    }

    #[test]
    fn fewer_than_two_pairs_is_zero() {
        assert_eq!(stats::pearson_correlation(&[]), 0.0);
        assert_eq!(stats::pearson_correlation(&pairs(&[1.0], &[2.0])), 0.0);
    }

    #[test]
    fn bounded() {
        let r = stats::pearson_correlation(&pairs(&[1.0, 3.0, 2.0, 5.0], &[2.0, 1.0, 4.0, 3.0]));
        assert!((-1.0..=1.0).contains(&r));
    }
}

// ── Drawdown ────────────────────────────────────────────────────────

mod drawdown {
    use super::*;

    #[test]
    fn strictly_increasing_has_none() {
        assert!(stats::max_drawdown(&series(&[0.0, 1.0, 2.5, 7.0])).is_none());
    }

    #[test]
    fn empty_has_none() {
        assert!(stats::max_drawdown(&[]).is_none());
    }

    #[test]
    fn picks_largest_pairwise_drop() {
        let dd = stats::max_drawdown(&series(&[0.0, 10.0, -5.0, 8.0])).unwrap();
        assert_eq!(dd.peak_start.value, 10.0);
        assert_eq!(dd.trough.value, -5.0);
        assert_eq!(dd.depth, -15.0);
        assert_eq!(dd.peak_start.date, d(2024, 1, 2));
        assert_eq!(dd.trough.date, d(2024, 1, 3));
    }

    #[test]
    fn later_peak_can_win() {
        // drops: 5→3 = 2, 20→1 = 19
        let dd = stats::max_drawdown(&series(&[5.0, 3.0, 20.0, 1.0])).unwrap();
        assert_eq!(dd.peak_start.value, 20.0);
        assert_eq!(dd.trough.value, 1.0);
        assert_eq!(dd.depth, -19.0);
    }

    #[test]
    fn ties_keep_first_pair() {
        // 10→5 and 8→3 both drop 5
        let dd = stats::max_drawdown(&series(&[10.0, 5.0, 8.0, 3.0])).unwrap();
        // 10→3 = 7 beats both
        assert_eq!(dd.depth, -7.0);

        let dd = stats::max_drawdown(&series(&[10.0, 5.0, 12.0, 7.0])).unwrap();
        assert_eq!(dd.peak_start.date, d(2024, 1, 1));
        assert_eq!(dd.trough.date, d(2024, 1, 2));
        assert_eq!(dd.depth, -5.0);
    }

    #[test]
    fn depth_is_never_positive() {
        let dd = stats::max_drawdown(&series(&[3.0, -1.0, 2.0, -4.0, 0.5])).unwrap();
        assert!(dd.depth <= 0.0);
        assert_eq!(dd.depth, -7.0);
    }
}

// ── Compounding / Sharpe ────────────────────────────────────────────

mod returns {
    use super::*;

    #[test]
    fn compounding_fold() {
        assert!((stats::cumulative_return(&[10.0, 10.0]) - 21.0).abs() < 1e-9);
        assert!((stats::cumulative_return(&[50.0, -50.0]) + 25.0).abs() < 1e-9);
    }

    #[test]
    fn cumulative_of_empty_is_zero() {
        assert_eq!(stats::cumulative_return(&[]), 0.0);
    }

    #[test]
    fn cumulative_series_seeded_from_first_point() {
        let cum = stats::cumulative_series(&series(&[2.0, 3.0, -1.0]));
        assert_eq!(cum.len(), 3);
        assert!((cum[0].value - 2.0).abs() < 1e-12);
        assert!((cum[1].value - stats::compound(2.0, 3.0)).abs() < 1e-12);
        assert!((cum[2].value - stats::cumulative_return(&[2.0, 3.0, -1.0])).abs() < 1e-12);
        assert_eq!(cum[2].instrument_id, "X");
    }

    #[test]
    fn sharpe_ratio_annualized() {
        let values = [1.0, 3.0];
        let expected = (2.0 * 12.0 - 0.02) / (2.0_f64.sqrt() * 12.0_f64.sqrt());
        assert!((stats::sharpe_ratio(&values, 0.02) - expected).abs() < 1e-12);
    }

    #[test]
    fn sharpe_zero_when_no_volatility() {
        assert_eq!(stats::sharpe_ratio(&[1.0, 1.0, 1.0], 0.02), 0.0);
        assert_eq!(stats::sharpe_ratio(&[1.0], 0.02), 0.0);
        assert_eq!(stats::sharpe_ratio(&[], 0.02), 0.0);
    }
}

// ── Histogram ───────────────────────────────────────────────────────

mod histogram {
    use super::*;

    #[test]
    fn equal_width_bins() {
        let bins = stats::histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[1].count, 3);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[1].upper, 4.0);
    }

    #[test]
    fn counts_every_value() {
        let values: Vec<f64> = (0..100).map(|i| (i as f64 * 0.37).sin()).collect();
        let bins = stats::histogram(&values, 15);
        assert_eq!(bins.len(), 15);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
    }

    #[test]
    fn constant_values_single_bin() {
        let bins = stats::histogram(&[2.0, 2.0, 2.0], 15);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn empty_has_no_bins() {
        assert!(stats::histogram(&[], 15).is_empty());
        assert!(stats::histogram(&[1.0, 2.0], 0).is_empty());
    }
}
