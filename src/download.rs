//! Downloads a CSV file from the archive.

use std::time::Duration;

use anyhow::{Error, Result};
use futures::StreamExt;

// An upstream fetch with no timeout can hang the whole run.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Downloads the resource at the specified URL and returns its body as text.
pub async fn download_csv(url: &str) -> Result<String> {
    let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::msg(format!("Failed to download file: {}", e)))?;

    if !response.status().is_success() {
        return Err(Error::msg(format!(
            "Failed to download file: {}",
            response.status()
        )));
    }

    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| Error::msg(format!("Error reading chunk: {}", e)))?;
        body.extend_from_slice(&chunk);
    }

    String::from_utf8(body).map_err(|e| Error::msg(format!("Response is not valid UTF-8: {}", e)))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_fail_on_unreachable_host() {
        // Port 1 is never listening; the connection is refused immediately.
        let result = download_csv("http://127.0.0.1:1/USW00094847.csv").await;

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .starts_with("Failed to download file"));
    }
}
