//! Run configuration, validated once at startup.

use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};

pub const DEFAULT_BASE_URL: &str = "https://www.ncei.noaa.gov/data/daily-summaries/access";

pub const DEFAULT_FILES: [&str; 2] = ["USW00094847.csv", "USW00012839.csv"];

/// Everything a fetch run needs: where to read from, where to write to,
/// and which station files to process.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub target_dir: PathBuf,
    pub files: Vec<String>,
}

impl FetchConfig {
    /// Checks the configuration before any network activity starts.
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            bail!("No files to fetch");
        }

        for file in &self.files {
            if !is_path_segment(file) {
                bail!("Invalid file name `{}`: must be a bare file name", file);
            }
        }

        if !self.target_dir.is_dir() {
            bail!(
                "Target directory `{}` does not exist or is not a directory",
                self.target_dir.display()
            );
        }
        ensure_writable(&self.target_dir)?;

        Ok(())
    }

    /// Source URL for a file: `<base_url>/<file>`.
    pub fn url_for(&self, file: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), file)
    }

    /// Destination path for a file: `<target_dir>/<file>.gz`.
    pub fn output_path_for(&self, file: &str) -> PathBuf {
        self.target_dir.join(format!("{}.gz", file))
    }
}

fn is_path_segment(file: &str) -> bool {
    !file.is_empty() && file != "." && file != ".." && !file.contains(['/', '\\'])
}

// Probe with a scratch file; `is_dir` says nothing about permissions.
fn ensure_writable(dir: &Path) -> Result<()> {
    let probe = dir.join(".precip-write-check");
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&probe)
        .with_context(|| format!("Target directory `{}` is not writable", dir.display()))?;
    std::fs::remove_file(&probe).ok();

    Ok(())
}

// -- Tests -------------------------------------------------------------------
