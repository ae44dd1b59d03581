use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use groundwork_core::constants::{DEFAULT_LIMIT, DEFAULT_MIN_SCORE, DEFAULT_PREV_NEXT_CHUNKS};

#[derive(Debug, Parser)]
#[command(name = "groundwork", version, about = "Hybrid retrieval over a two-store knowledge base")]
pub struct Cli {
    /// TOML configuration file. Environment variables override it.
    #[arg(long, global = true, env = "GROUNDWORK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Raise log verbosity (-v debug, -vv trace). GROUNDWORK_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Retrieve context chunks for a query and print the JSON response.
    Search(SearchArgs),
    /// Run a JSON request body from a file or stdin.
    Request(RequestArgs),
    /// Print the resolved configuration as TOML.
    Config,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Knowledge base id.
    #[arg(long)]
    pub kb: String,

    /// Query text.
    #[arg(long)]
    pub text: String,

    /// Restrict results to these documents. Repeatable.
    #[arg(long = "doc-id")]
    pub doc_ids: Vec<String>,

    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Neighbor chunks on each side of a result.
    #[arg(long, default_value_t = DEFAULT_PREV_NEXT_CHUNKS)]
    pub window: usize,

    #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
    pub min_score: f64,

    /// dense, sparse or ensemble.
    #[arg(long, default_value = "ensemble")]
    pub retriever: String,
}

#[derive(Debug, Args)]
pub struct RequestArgs {
    /// Request body; read from stdin when absent.
    #[arg(long)]
    pub file: Option<PathBuf>,
}
