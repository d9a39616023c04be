use crate::config::cli::Args;
use crate::error::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::{info, Level};

pub mod cli;

pub struct Config {
    pub args: Args,
    pub now: DateTime<Utc>,
}

impl Config {
    pub fn new() -> Self {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Self {
        let now = args.now.unwrap_or_else(Utc::now);
        Self { args, now }
    }

    /// Tracing level from `--log-level`, `info` when unrecognised.
    pub fn log_level(&self) -> Level {
        self.args.log_level.parse().unwrap_or(Level::INFO)
    }

    pub fn ensure_directories(&self) -> Result<()> {
        if !self.args.output_dir.exists() {
            std::fs::create_dir_all(&self.args.output_dir)?;
        }

        info!("Output dir {:?} exists", self.args.output_dir);
        Ok(())
    }
}
