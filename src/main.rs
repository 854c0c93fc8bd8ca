use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod handlers;
mod identity;
mod router;
mod schemas;

mod openapi_tests;
mod tests;

use cli::Cli;

/// Main entry point for the TuneBoard application.
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG wins; --verbose only sets the fallback filter
    let default_filter = if cli.verbose {
        "trace"
    } else {
        "tuneboard=debug,tower_http=debug,axum::rejection=trace"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    cli.run().await?;

    Ok(())
}
