mod output;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use fxsummary_lib::frankfurter_api::Client;
use fxsummary_lib::{
    Breakdown, FallbackStore, RateCache, RateFetcher, RateProvider, SummaryRequest,
};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "fxsummary")]
#[command(about = "Summarize EUR/USD exchange-rate movement over a date range")]
struct Cli {
    /// First day of the range (YYYY-MM-DD)
    start_date: NaiveDate,
    /// Last day of the range (YYYY-MM-DD)
    end_date: NaiveDate,
    /// Breakdown granularity: day or none
    #[arg(long, default_value = "day")]
    breakdown: Breakdown,
    /// Output format: table or json
    #[arg(long, default_value = "table")]
    output: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fxsummary=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let provider = RateProvider::new(
        RateFetcher::new(Client::new()?),
        RateCache::default(),
        FallbackStore::bundled(),
    );

    let request = SummaryRequest {
        start_date: cli.start_date,
        end_date: cli.end_date,
        breakdown: cli.breakdown,
    };
    let summary = provider.get_summary(&request).await?;

    output::print_summary(&summary, &cli.output)?;

    Ok(())
}
