//! Starfield - decorative starfield generation and page serving.
//!
//! Generates a field of randomly placed twinkling points and populates a
//! designated container element in an HTML page with them, either from
//! the CLI or per request from the bundled web server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use starfield::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "starfield=info"
    } else {
        "starfield=warn"
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
