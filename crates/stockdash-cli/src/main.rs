//! Command-line front end for the stockdash market dashboard

mod render;

use anyhow::{Context, bail};
use clap::Parser;
use std::path::PathBuf;
use stockdash_core::analytics::{self, SeriesSummary};
use stockdash_core::{DashboardConfig, DataOrchestrator};
use tracing::{debug, info, warn};

use crate::render::Report;

#[derive(Parser, Debug)]
#[command(name = "stockdash")]
#[command(about = "Market dashboard: company roster, price history and predictions", long_about = None)]
struct Args {
    /// Market data service base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Number of companies to load
    #[arg(long)]
    limit: Option<u32>,

    /// Days of price history to load for the selected company
    #[arg(long)]
    days: Option<u32>,

    /// Ask the service to bypass its roster cache
    #[arg(short, long)]
    refresh: bool,

    /// Only list companies whose symbol or name contains this text
    #[arg(short, long)]
    search: Option<String>,

    /// Only list companies in this sector
    #[arg(long)]
    sector: Option<String>,

    /// Select a company from the roster and show its analysis
    #[arg(long)]
    symbol: Option<String>,

    /// Print the dashboard snapshot as JSON instead of tables
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> anyhow::Result<DashboardConfig> {
        let mut builder = DashboardConfig::builder();
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            builder = builder.timeout_ms(timeout_ms);
        }
        if let Some(limit) = self.limit {
            builder = builder.companies_limit(limit);
        }
        if let Some(days) = self.days {
            builder = builder.history_days(days);
        }
        builder
            .with_env()
            .build()
            .context("invalid dashboard configuration")
    }
}

/// Load `.env` (which may set `RUST_LOG`), start tracing, then report the load
fn init_environment() -> Option<PathBuf> {
    let dotenv = stockdash_utils::load_dotenv();
    stockdash_utils::init_tracing();
    if let Some(path) = &dotenv {
        debug!("Loaded environment from {}", path.display());
    }
    dotenv
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_environment();

    let args = Args::parse();
    let config = args.config()?;

    info!("Connecting to {}", config.base_url);
    let dashboard = DataOrchestrator::connect(config).await?;

    if args.refresh {
        dashboard.refresh_data().await;
    }

    if let Some(symbol) = &args.symbol {
        if !dashboard.select_symbol(symbol).await {
            warn!("{} is not in the loaded roster", symbol);
            bail!("unknown symbol: {symbol}");
        }
    }

    let state = dashboard.snapshot();
    let search = args.search.as_deref().unwrap_or("");
    let companies = analytics::filter_companies(&state.companies, search, args.sector.as_deref());

    if args.json {
        let report = Report::new(&state, companies);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(error) = &state.error {
        eprintln!("{error}");
    }

    println!("{}", render::roster_table(&companies, state.selected_symbol()));
    println!(
        "{} of {} companies, sectors: {}",
        companies.len(),
        state.companies.len(),
        analytics::unique_sectors(&state.companies).join(", ")
    );

    if let Some(company) = &state.selected_company {
        println!();
        println!("{} ({})", company.name, company.symbol);
        if state.stock_data.is_empty() {
            println!("No price history available");
        } else {
            let summary = SeriesSummary::from_series(&state.stock_data);
            println!("{}", render::analysis_table(&summary));
            println!("{}", render::history_table(&state));
        }

        let prediction = analytics::PredictionSummary::from_prediction(state.prediction.as_ref());
        println!("{}", render::prediction_table(prediction.as_ref()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_is_ready_after_environment_load() {
        init_environment();
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn test_flags_take_precedence() {
        let args = Args::parse_from(["stockdash", "--base-url", "http://10.0.0.5:9000/api", "--limit", "5"]);
        let config = args.config().unwrap();
        assert_eq!(config.base_url, "http://10.0.0.5:9000/api");
        assert_eq!(config.companies_limit, 5);
    }
}
