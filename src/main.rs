//! Days with unusual sales volumes
//!
//! Finds days in the AdventureWorks data set where the number of sales
//! is unusually high or unusually low by interquartile range analysis,
//! and writes the flagged days to `dates_unusual_sales.csv`.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sales_anomalies::config::DEFAULT_CONFIG_FILE;
use sales_anomalies::{export, run, AppConfig, Result, SalesDb, OUTPUT_FILE};

#[derive(Parser)]
#[command(name = "sales-anomalies")]
#[command(about = "Find days with statistically unusual sales order counts")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run_pipeline(&cli.config).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run_pipeline(config_path: &str) -> Result<()> {
    let config = AppConfig::from_file(config_path)?;
    info!(
        "postgres target: {}:{}/{}",
        config.postgres.host, config.postgres.port, config.postgres.database
    );

    let db = SalesDb::connect(&config.postgres).await?;
    info!("database connection established");

    let report = run(&db).await?;

    export::write_csv(OUTPUT_FILE, &report.anomalies)?;
    info!(
        "wrote {} anomalous day(s) to {}",
        report.anomalies.len(),
        OUTPUT_FILE
    );

    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_anomalies=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
