mod cli;
mod config;
mod db;
mod knowledge;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mnemo", version, about = "Personal assistant knowledge store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Store a fact
    Add {
        /// The fact text
        text: String,
        /// Free-form provenance (e.g. "chat")
        #[arg(long)]
        source: Option<String>,
        /// Confidence in [0.0, 1.0]; defaults to 1.0
        #[arg(long)]
        confidence: Option<f64>,
    },
    /// List all facts, most recently touched first
    List {
        /// Include embedding dimensions in the listing
        #[arg(long)]
        embeddings: bool,
    },
    /// Show one fact in full
    Show { id: i64 },
    /// Semantic search with a raw query vector (JSON array of floats)
    Search {
        /// Query embedding, e.g. '[0.1, 0.2, 0.3]'
        query: String,
        /// Maximum number of results (defaults to the configured limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Delete a fact by id
    Delete { id: i64 },
    /// Show store statistics
    Stats,
    /// Export all facts as JSON to stdout
    Export,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::MnemoConfig::load()?;

    // Log to stderr so stdout stays clean for export output.
    let filter = EnvFilter::try_new(&config.general.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Add {
            text,
            source,
            confidence,
        } => cli::add(&config, &text, source.as_deref(), confidence).await?,
        Command::List { embeddings } => cli::list(&config, embeddings).await?,
        Command::Show { id } => cli::show(&config, id).await?,
        Command::Search { query, limit } => {
            let limit = limit.unwrap_or(config.knowledge.search_limit);
            cli::search(&config, &query, limit).await?
        }
        Command::Delete { id } => cli::delete(&config, id).await?,
        Command::Stats => cli::stats(&config).await?,
        Command::Export => cli::export(&config).await?,
    }

    Ok(())
}
