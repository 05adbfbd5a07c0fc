//! Travers CLI - Bounded graph traversal over JSON property graphs

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::related;
use config::Config;
use output::OutputFormat;
use travers_storage::{CountingGraph, MemoryGraph};

#[derive(Parser)]
#[command(name = "travers")]
#[command(author, version, about = "Bounded, evaluator-driven graph traversal")]
pub struct Cli {
    /// Graph file (JSON with `nodes` and `relationships`)
    #[arg(short, long, env = "TRAVERS_GRAPH", global = true)]
    pub graph: Option<PathBuf>,

    /// Output format: table, json
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find people who acted in a movie with the named actor
    CoActors(related::CoActorsArgs),
    /// Find nodes related to a start node within a depth range
    Related(related::RelatedArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

/// Application context with the loaded graph
pub struct AppContext {
    pub graph: CountingGraph<MemoryGraph>,
    pub config: Config,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli, config: Config) -> anyhow::Result<Self> {
        let path = cli
            .graph
            .clone()
            .or_else(|| config.graph.clone())
            .context("No graph file given. Pass --graph or run `travers config set graph <FILE>`")?;
        tracing::debug!("Loading graph from {:?}", path);

        let graph = MemoryGraph::load_json(&path)
            .with_context(|| format!("Failed to load graph from {}", path.display()))?;
        tracing::debug!(
            "Graph has {} nodes and {} relationships",
            graph.node_count()?,
            graph.relationship_count()?
        );

        let format = cli
            .format
            .as_deref()
            .or(config.format.as_deref())
            .map(OutputFormat::from)
            .unwrap_or(OutputFormat::Table);

        Ok(Self {
            graph: CountingGraph::new(graph),
            config,
            format,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting travers CLI");

    if let Commands::Config(args) = &cli.command {
        return commands::config::run(args);
    }

    let ctx = AppContext::new(&cli, Config::load())?;

    match &cli.command {
        Commands::CoActors(args) => related::run_co_actors(args, &ctx).await?,
        Commands::Related(args) => related::run_related(args, &ctx).await?,
        Commands::Config(_) => {}
    }

    Ok(())
}
