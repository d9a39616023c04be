use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Directory holding competitions.json and users/<id>.json
    #[arg(long, env = "BPR_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory to store computed ratings and rankings
    #[arg(long, env = "BPR_OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Evaluate ratings at this RFC 3339 instant instead of the current time
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a user's Bayesian Placement Rating
    Score {
        user_id: String,
    },
    /// Rank a user against their friends
    Rank {
        user_id: String,
    },
}
