//! Domain models for per-day order counts and IQR fences

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of sales orders recorded on one calendar day.
///
/// Days with zero orders are absent from the aggregated query result,
/// not represented as count = 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Tukey fences derived once per run from the full set of counts.
///
/// The acceptable range covers about 2.7 standard deviations in each
/// direction assuming a Gaussian distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantileBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Detector output: the fences that were applied and the days whose
/// count falls strictly outside them, ordered ascending by date.
#[derive(Debug, Clone, Serialize)]
pub struct AnomalyReport {
    pub bounds: QuantileBounds,
    pub anomalies: Vec<DailyCount>,
}
