//! Waymark - interactive landmark map controller.
//!
//! A tool for exploring landmarks around a location: viewport-driven marker
//! sync, free-text location search, routing, and a chat command grammar.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use waymark::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "waymark=info"
    } else {
        "waymark=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    cli::run().await
}
