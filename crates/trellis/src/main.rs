//! Trellis CLI binary.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use trellis::cli::Cli;

/// Main entry point for the trellis CLI.
///
/// Uses tokio's current_thread runtime: the build is strictly sequential
/// with one in-flight request at a time, so a multi-threaded scheduler
/// buys nothing.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=trellis=debug,trellis_jira=trace cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trellis=info,trellis_jira=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse_args();
    cli.execute().await?;

    Ok(())
}
