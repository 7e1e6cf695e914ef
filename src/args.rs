//! Command-line arguments.
//!
//! Flags override the matching fields of the config file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::{Config, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Args {
    /// Configuration file path (defaults to ./rss-merge.toml if present)
    #[arg(short, long, env = "RSS_MERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output feed path (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seen-set index path (overrides config file)
    #[arg(short, long)]
    pub index: Option<PathBuf>,

    /// Maximum number of items kept in the output (overrides config file)
    #[arg(short = 'n', long)]
    pub max_items: Option<usize>,
}

impl Args {
    /// Load the config file and apply command-line overrides.
    pub fn into_config(self) -> Result<Config> {
        let (path, explicit) = match self.config {
            Some(path) => (path, true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };
        let mut config = Config::load_or_default(&path, explicit)?;

        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(index) = self.index {
            config.index_path = index;
        }
        if let Some(max_items) = self.max_items {
            config.max_items = max_items;
        }
        config.validate()?;
        Ok(config)
    }
}
