//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `build`: build the dependency graph for an item and print it
//!
//! # Global Flags
//!
//! - `--json`: output in JSON format (shorthand for `--format json`)
//!
//! # Example
//!
//! ```bash
//! trellis build PROJ-123
//! trellis build PROJ-123 --format dot
//! trellis --json build EPIC-1
//! ```

use crate::config::TrellisConfig;
use crate::discover::build_graph;
use crate::navigate;
use crate::output::{self, OutputMode};
use crate::render;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use trellis_jira::{HttpItemClient, ItemClient};

/// Trellis - dependency graphs for tracked work items
///
/// Builds the graph of items linked to a root item and prints it as text,
/// JSON, or Graphviz DOT.
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the dependency graph for an item
    ///
    /// Classifies the root (container vs. plain item), discovers related
    /// items through the tracker API, and prints the compiled graph.
    Build(BuildArgs),
}

/// Arguments for the `build` command
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Root item key, e.g. PROJ-123
    #[arg(value_parser = validate_key)]
    pub key: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Path to the configuration file (default: ./trellis.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Tracker base URL, overriding the configuration file
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Output format for the `build` command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable node and link listing
    Text,

    /// The compiled graph as JSON
    Json,

    /// Graphviz DOT source
    Dot,

    /// A chart-service URL rendering the DOT source
    Url,
}

/// Validate an item key at parse time.
///
/// Uses the same matching rule as click-to-navigate: letters, a separator,
/// digits.
fn validate_key(s: &str) -> Result<String, String> {
    navigate::item_key(s)
        .map(str::to_string)
        .ok_or_else(|| format!("invalid item key '{s}'; expected letters-digits, e.g. PROJ-123"))
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Some(Commands::Build(args)) => execute_build(args, self.json).await,
            None => {
                println!("Trellis dependency graph builder");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}

async fn execute_build(args: &BuildArgs, json_flag: bool) -> Result<()> {
    let mut config = TrellisConfig::load_or_default(args.config.as_deref()).await?;
    if let Some(base_url) = &args.base_url {
        config.base_url = Some(base_url.clone());
    }

    let client = HttpItemClient::new(config.require_base_url()?)?;
    let graph = build_graph(&client, &config, &args.key).await?;

    let format = if json_flag { FormatArg::Json } else { args.format };
    match format {
        FormatArg::Text => output::print_graph(&graph, OutputMode::Text)?,
        FormatArg::Json => output::print_graph(&graph, OutputMode::Json)?,
        FormatArg::Dot => print!("{}", render::dot(&graph, browse_base(&client, &config).await.as_deref())),
        FormatArg::Url => {
            let dot = render::dot(&graph, browse_base(&client, &config).await.as_deref());
            println!("{}", render::chart_url(&dot));
        }
    }

    Ok(())
}

/// Base URL for browse links in rendered output.
///
/// The tracker's advertised public URL wins over the configured API base;
/// a failed info call falls back rather than failing the render.
async fn browse_base(client: &dyn ItemClient, config: &TrellisConfig) -> Option<String> {
    match client.server_info().await {
        Ok(info) => Some(info.base_url),
        Err(err) => {
            tracing::warn!(error = %err, "server info unavailable; using configured base URL");
            config.base_url.clone()
        }
    }
}
