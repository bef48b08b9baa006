//! PostgreSQL access to the sales transaction log

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use tracing::debug;

use crate::config::PostgresConfig;
use crate::error::{AnomalyError, Result};
use crate::models::DailyCount;

/// Count of transactions by date, ignoring the time component. Aggregated
/// in SQL to limit the amount of data fetched.
const DAILY_COUNT_QUERY: &str = r#"
    SELECT orderdate::date AS day, COUNT(*) AS orders
    FROM sales.salesorderheader
    GROUP BY orderdate::date
"#;

/// Port exposing the one query capability the detector pipeline needs.
#[async_trait]
pub trait OrderCountSource: Send + Sync {
    /// Order count for each distinct date present in the transaction log.
    async fn daily_order_counts(&self) -> Result<Vec<DailyCount>>;
}

/// PostgreSQL-backed source for the AdventureWorks sales schema.
pub struct SalesDb {
    pool: PgPool,
}

impl SalesDb {
    /// Build a connection pool from the `[postgres]` configuration.
    ///
    /// An unreachable server or rejected credentials surface here as
    /// [`AnomalyError::Connection`]; nothing has been queried yet.
    pub async fn connect(config: &PostgresConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.connection_url())
            .await
            .map_err(AnomalyError::Connection)?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl OrderCountSource for SalesDb {
    async fn daily_order_counts(&self) -> Result<Vec<DailyCount>> {
        let rows = sqlx::query(DAILY_COUNT_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(AnomalyError::Query)?;
        debug!("daily count query returned {} rows", rows.len());

        Ok(rows
            .into_iter()
            .map(|row| DailyCount {
                date: row.get("day"),
                count: row.get("orders"),
            })
            .collect())
    }
}
