//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{command, Args, Parser, Subcommand};
use indicatif::ProgressBar;

use crate::config::{FetchConfig, DEFAULT_BASE_URL, DEFAULT_FILES};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download station files and re-save them gzip-compressed
    Fetch(FetchArgs),
}

#[derive(Args)]
pub struct FetchArgs {
    /// Base URL of the daily-summaries archive
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory the compressed files are written to (must exist)
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Station files to fetch, e.g. `USW00094847.csv`
    pub files: Vec<String>,
}

impl FetchArgs {
    pub fn config(&self) -> FetchConfig {
        let files = if self.files.is_empty() {
            DEFAULT_FILES.iter().map(|f| f.to_string()).collect()
        } else {
            self.files.clone()
        };

        FetchConfig {
            base_url: self.base_url.clone(),
            target_dir: self.dir.clone(),
            files,
        }
    }
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

// -- Tests -------------------------------------------------------------------
