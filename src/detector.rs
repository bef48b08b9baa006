//! IQR detection of days with unusual order counts.
//!
//! Finds the 1st and 3rd quartile of the per-day counts and the
//! difference between them, the range of the middle half of the data.
//! Anything below Q1 - 1.5*IQR or above Q3 + 1.5*IQR is an outlier.

use crate::error::{AnomalyError, Result};
use crate::models::{AnomalyReport, DailyCount, QuantileBounds};

const IQR_MULTIPLIER: f64 = 1.5;

/// Compute the IQR fences over the per-day counts and return the days
/// whose count falls strictly outside them, sorted ascending by date.
///
/// A count exactly equal to either fence is not an anomaly. Fails with
/// [`AnomalyError::EmptyInput`] on an empty collection, where quantiles
/// are undefined.
pub fn detect_anomalies(counts: &[DailyCount]) -> Result<AnomalyReport> {
    let bounds = QuantileBounds::from_counts(counts)?;

    let mut anomalies: Vec<DailyCount> = counts
        .iter()
        .filter(|d| {
            let count = d.count as f64;
            count < bounds.lower || count > bounds.upper
        })
        .cloned()
        .collect();
    anomalies.sort_by_key(|d| d.date);

    Ok(AnomalyReport { bounds, anomalies })
}

impl QuantileBounds {
    /// Derive the fences from the full set of counts.
    pub fn from_counts(counts: &[DailyCount]) -> Result<Self> {
        if counts.is_empty() {
            return Err(AnomalyError::EmptyInput);
        }

        let mut values: Vec<f64> = counts.iter().map(|d| d.count as f64).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = quantile(&values, 0.25);
        let q3 = quantile(&values, 0.75);
        let iqr = q3 - q1;

        Ok(Self {
            q1,
            q3,
            iqr,
            lower: q1 - IQR_MULTIPLIER * iqr,
            upper: q3 + IQR_MULTIPLIER * iqr,
        })
    }
}

/// Quantile by linear interpolation between closest ranks: the quantile
/// at fraction `q` of n sorted values sits at rank `q * (n - 1)`,
/// interpolating between the two bracketing values when the rank is
/// non-integral. Matches the pandas/NumPy "linear" method bit for bit.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if hi >= sorted.len() {
        return sorted[sorted.len() - 1];
    }
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32, count: i64) -> DailyCount {
        DailyCount {
            date: NaiveDate::from_ymd_opt(2014, 1, d).unwrap(),
            count,
        }
    }

    fn days(counts: &[i64]) -> Vec<DailyCount> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &c)| day(i as u32 + 1, c))
            .collect()
    }

    #[test]
    fn test_quantile_interpolation() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&sorted, 0.25) - 1.75).abs() < 1e-12);
        assert!((quantile(&sorted, 0.5) - 2.5).abs() < 1e-12);
        assert!((quantile(&sorted, 0.75) - 3.25).abs() < 1e-12);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn test_single_spike_is_flagged() {
        let counts = days(&[10, 12, 12, 13, 14, 15, 100]);
        let report = detect_anomalies(&counts).unwrap();

        assert_eq!(report.bounds.q1, 12.0);
        assert_eq!(report.bounds.q3, 14.5);
        assert_eq!(report.bounds.iqr, 2.5);
        assert_eq!(report.bounds.lower, 8.25);
        assert_eq!(report.bounds.upper, 18.25);

        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0], day(7, 100));
    }

    #[test]
    fn test_low_outlier_is_flagged() {
        let counts = days(&[1, 50, 52, 54, 56, 58, 60]);
        let report = detect_anomalies(&counts).unwrap();

        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].count, 1);
    }

    #[test]
    fn test_identical_counts_yield_no_anomalies() {
        let counts = days(&[20, 20, 20, 20, 20]);
        let report = detect_anomalies(&counts).unwrap();

        assert_eq!(report.bounds.iqr, 0.0);
        assert_eq!(report.bounds.lower, 20.0);
        assert_eq!(report.bounds.upper, 20.0);
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_zero_iqr_flags_any_other_value() {
        // The middle half identical collapses the fences to [10, 10];
        // every other value is flagged.
        let counts = days(&[4, 10, 10, 10, 10, 16]);
        let report = detect_anomalies(&counts).unwrap();

        assert_eq!(report.bounds.iqr, 0.0);
        assert_eq!(report.bounds.lower, 10.0);
        assert_eq!(report.bounds.upper, 10.0);
        let flagged: Vec<i64> = report.anomalies.iter().map(|d| d.count).collect();
        assert_eq!(flagged, vec![4, 16]);
    }

    #[test]
    fn test_single_record_is_never_anomalous() {
        let counts = days(&[5]);
        let report = detect_anomalies(&counts).unwrap();

        assert_eq!(report.bounds.q1, 5.0);
        assert_eq!(report.bounds.q3, 5.0);
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = detect_anomalies(&[]).unwrap_err();
        assert!(matches!(err, AnomalyError::EmptyInput));
    }

    #[test]
    fn test_boundary_value_is_not_anomalous() {
        // Q1 = 2, Q3 = 4, fences [-1, 7]: the 7 sits exactly on the
        // upper fence and must not be flagged.
        let on_fence = days(&[2, 2, 2, 4, 4, 7]);
        let report = detect_anomalies(&on_fence).unwrap();
        assert_eq!(report.bounds.upper, 7.0);
        assert!(report.anomalies.is_empty());

        // Same shape one past the fence is flagged.
        let past_fence = days(&[2, 2, 2, 4, 4, 8]);
        let report = detect_anomalies(&past_fence).unwrap();
        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].count, 8);
    }

    #[test]
    fn test_output_sorted_by_date_regardless_of_input_order() {
        let mut counts = days(&[100, 12, 12, 13, 14, 15, 1]);
        counts.reverse();
        let report = detect_anomalies(&counts).unwrap();

        assert_eq!(report.anomalies.len(), 2);
        assert!(report.anomalies[0].date < report.anomalies[1].date);
        assert_eq!(report.anomalies[0].count, 100);
        assert_eq!(report.anomalies[1].count, 1);
    }

    #[test]
    fn test_bounds_are_ordered() {
        for counts in [
            days(&[10, 12, 12, 13, 14, 15, 100]),
            days(&[20, 20, 20, 20, 20]),
            days(&[5]),
        ] {
            let bounds = QuantileBounds::from_counts(&counts).unwrap();
            assert!(bounds.lower <= bounds.q1);
            assert!(bounds.q1 <= bounds.q3);
            assert!(bounds.q3 <= bounds.upper);
        }
    }

    #[test]
    fn test_detection_is_idempotent() {
        let counts = days(&[10, 12, 12, 13, 14, 15, 100]);
        let first = detect_anomalies(&counts).unwrap();
        let second = detect_anomalies(&counts).unwrap();

        assert_eq!(first.bounds, second.bounds);
        assert_eq!(first.anomalies, second.anomalies);
    }
}
