//! Sales-day anomaly detection over a PostgreSQL transaction log.
//!
//! Fetches the per-day order counts from the AdventureWorks sales schema,
//! computes IQR fences over them, and exports the days falling outside
//! the fences to a CSV file.

pub mod config;
pub mod database;
pub mod detector;
pub mod error;
pub mod export;
pub mod models;

// Re-export commonly used types
pub use config::AppConfig;
pub use database::{OrderCountSource, SalesDb};
pub use detector::detect_anomalies;
pub use error::{AnomalyError, Result};
pub use models::{AnomalyReport, DailyCount, QuantileBounds};

use tracing::info;

/// Fixed name of the output artifact, overwritten on every run.
pub const OUTPUT_FILE: &str = "dates_unusual_sales.csv";

/// Run the analysis against any order-count source.
pub async fn run(source: &dyn OrderCountSource) -> Result<AnomalyReport> {
    let counts = source.daily_order_counts().await?;
    info!("fetched {} per-day order counts", counts.len());

    let report = detector::detect_anomalies(&counts)?;
    info!(
        "fences [{:.2}, {:.2}], {} anomalous day(s)",
        report.bounds.lower,
        report.bounds.upper,
        report.anomalies.len()
    );

    Ok(report)
}
