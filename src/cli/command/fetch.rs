//! Fetches each station file and re-saves it gzip-compressed.

use std::path::PathBuf;

use anyhow::{anyhow, Error, Result};

use crate::{cli::create_spinner, config::FetchConfig, download::download_csv, table::Table};

/// The result of processing one file. Failures are recorded rather than
/// raised so one bad file cannot stop the rest of the run.
pub enum FetchOutcome {
    Saved {
        file: String,
        path: PathBuf,
        rows: usize,
        cols: usize,
    },
    Failed {
        file: String,
        error: Error,
    },
}

pub async fn fetch(config: &FetchConfig) -> Result<()> {
    config.validate()?;

    let mut outcomes = Vec::new();
    for file in &config.files {
        let bar = create_spinner(format!("Fetching {}...", file));
        let outcome = match fetch_one(config, file).await {
            Ok((path, rows, cols)) => {
                bar.finish_with_message(format!("Saved `{}`", path.display()));
                FetchOutcome::Saved {
                    file: file.clone(),
                    path,
                    rows,
                    cols,
                }
            }
            Err(error) => {
                bar.finish_with_message(format!("Failed {}", file));
                FetchOutcome::Failed {
                    file: file.clone(),
                    error,
                }
            }
        };
        outcomes.push(outcome);
    }

    report(&outcomes)
}

/// Downloads one file, parses it, and writes the compressed copy.
async fn fetch_one(config: &FetchConfig, file: &str) -> Result<(PathBuf, usize, usize)> {
    let url = config.url_for(file);
    let body = download_csv(&url).await?;
    let table = Table::from_csv(&body)?;

    let output_path = config.output_path_for(file);
    table.write_gzip(&output_path)?;

    Ok((output_path, table.n_rows(), table.n_cols()))
}

/// Prints a per-file status line and a summary; errors if anything failed.
fn report(outcomes: &[FetchOutcome]) -> Result<()> {
    let mut failed = 0;

    for outcome in outcomes {
        match outcome {
            FetchOutcome::Saved {
                file,
                path,
                rows,
                cols,
            } => {
                println!("{}: {} rows, {} cols -> `{}`", file, rows, cols, path.display());
            }
            FetchOutcome::Failed { file, error } => {
                failed += 1;
                eprintln!("{}: {:#}", file, error);
            }
        }
    }

    if failed > 0 {
        return Err(anyhow!("{} of {} files failed", failed, outcomes.len()));
    }

    println!("{} files saved", outcomes.len());
    Ok(())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use tempfile::TempDir;

    use super::*;
    use crate::config::DEFAULT_FILES;

    fn config_fixture(base_url: &str, target_dir: PathBuf) -> FetchConfig {
        FetchConfig {
            base_url: base_url.to_string(),
            target_dir,
            files: DEFAULT_FILES.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn should_error_before_fetching_when_dir_missing() {
        let dir = TempDir::new().unwrap();
        // Unroutable base URL: if validation did not run first, the fetch
        // itself would fail with a download error instead.
        let config = config_fixture("http://127.0.0.1:1", dir.path().join("nope"));

        let result = fetch(&config).await;

        assert!(result.unwrap_err().to_string().contains("Target directory"));
    }

    #[tokio::test]
    async fn should_record_per_file_failures_and_continue() {
        let dir = TempDir::new().unwrap();
        let config = config_fixture("http://127.0.0.1:1", dir.path().to_path_buf());

        let result = fetch(&config).await;

        assert_eq!(result.unwrap_err().to_string(), "2 of 2 files failed");
        for file in DEFAULT_FILES {
            assert!(!config.output_path_for(file).exists());
        }
    }

    #[test]
    fn should_report_success_when_all_saved() {
        let outcomes = vec![
            FetchOutcome::Saved {
                file: "a.csv".to_string(),
                path: PathBuf::from("/tmp/out/a.csv.gz"),
                rows: 10,
                cols: 3,
            },
            FetchOutcome::Saved {
                file: "b.csv".to_string(),
                path: PathBuf::from("/tmp/out/b.csv.gz"),
                rows: 20,
                cols: 3,
            },
        ];

        assert!(report(&outcomes).is_ok());
    }

    #[test]
    fn should_report_failure_when_any_file_failed() {
        let outcomes = vec![
            FetchOutcome::Saved {
                file: "a.csv".to_string(),
                path: PathBuf::from("/tmp/out/a.csv.gz"),
                rows: 10,
                cols: 3,
            },
            FetchOutcome::Failed {
                file: "b.csv".to_string(),
                error: anyhow!("Failed to download file: 404 Not Found"),
            },
        ];

        let result = report(&outcomes);

        assert_eq!(result.unwrap_err().to_string(), "1 of 2 files failed");
    }
}
