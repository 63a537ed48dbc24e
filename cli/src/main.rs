//! RateHub CLI
//!
//! Loads a rate feed and answers one exchange rate query.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use ratehub_common::Currency;
use ratehub_fx::{ConversionQuery, JsonFileFeed, RateResolver, ResolverConfig};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod report;

use report::QueryReport;

/// RateHub CLI
#[derive(Parser, Debug)]
#[command(name = "ratehub")]
#[command(about = "Historic exchange rates through a hub currency")]
struct Args {
    /// Feed document (JSON) to load
    #[arg(short, long)]
    feed: PathBuf,

    /// Base currency
    #[arg(long)]
    from: String,

    /// Term currency
    #[arg(long)]
    to: String,

    /// Candidate dates, first published one wins (default: latest)
    #[arg(short, long = "date")]
    dates: Vec<NaiveDate>,

    /// Amount of the base currency to convert
    #[arg(short, long)]
    amount: Option<Decimal>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so query output stays parseable
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(
            args.log_json
                .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with(
            (!args.log_json)
                .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
        .init();

    let config = ResolverConfig::from_env();
    info!(
        provider = %config.provider_name,
        hub = %config.hub_currency,
        "{}",
        config.description
    );

    let feed = Arc::new(JsonFileFeed::new(args.feed.clone()));
    let resolver = RateResolver::start(config, feed)?;

    let query = ConversionQuery::new(Currency::new(&args.from), Currency::new(&args.to))
        .on_any_of(args.dates.iter().copied());
    let amount = args.amount;

    let report = tokio::task::spawn_blocking({
        let resolver = Arc::clone(&resolver);
        move || QueryReport::resolve(&resolver, &query, amount)
    })
    .await
    .context("query task failed")??;

    if let Some(status) = resolver.status() {
        info!("{}", status);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.render());
    }

    Ok(())
}
