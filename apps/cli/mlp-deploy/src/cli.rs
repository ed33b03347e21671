use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mlp-deploy")]
#[command(about = "Register or update a model with the MLP metadata service")]
#[command(version)]
pub struct Cli {
    /// Action to perform
    #[arg(value_enum)]
    pub action: Action,

    /// Path to a model configuration JSON file (built-in record when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// API base URL (falls back to MODEL_API_URL, then the compiled-in default)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Model id for update operations (derived from the config when omitted)
    #[arg(long)]
    pub model_id: Option<String>,

    /// Log the request that would be sent without calling the API
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    Register,
    Update,
}
