//! Download handling for the sanctions list.

use anyhow::{bail, Result};
use reqwest::header;
use std::io::Read;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::client::{create_http_client, fetch_once};
use super::types::{MAX_RETRIES, RETRY_DELAY};
use super::util::{cleanup_xml, decode_text, is_valid_url, try_decompressions};
use crate::TARGET_WEB_REQUEST;

/// Fetch the sanctions document from `url`, returning its cleaned-up text.
///
/// A non-success status or transport error is retried up to `MAX_RETRIES`
/// times; exhausting the retries is fatal for the run.
pub async fn fetch_document(url: &str) -> Result<String> {
    if !is_valid_url(url) {
        bail!("Invalid source URL: {}", url);
    }

    let client = create_http_client()?;
    let mut attempts = 0;

    loop {
        if attempts >= MAX_RETRIES {
            bail!("Max retries reached for {}", url);
        }
        attempts += 1;

        debug!(target: TARGET_WEB_REQUEST, "Loading sanctions list from {} (attempt {}/{})", url, attempts, MAX_RETRIES);

        match fetch_once(&client, url).await {
            Ok(response) if response.status().is_success() => {
                let content_type = response
                    .headers()
                    .get(header::CONTENT_TYPE)
                    .and_then(|ct| ct.to_str().ok())
                    .map(|s| s.to_lowercase());

                // Extract the content encoding before consuming the response
                let content_encoding = response
                    .headers()
                    .get(header::CONTENT_ENCODING)
                    .and_then(|value| value.to_str().ok())
                    .map(|s| s.to_lowercase());

                // Get the raw bytes next (this consumes the response)
                let bytes = match response.bytes().await {
                    Ok(b) => b,
                    Err(err) => {
                        error!(target: TARGET_WEB_REQUEST, "Failed to read response bytes from {}: {}", url, err);
                        sleep(RETRY_DELAY).await;
                        continue;
                    }
                };

                // Try different decompression methods
                let decompressed = if content_encoding.as_deref() == Some("br") {
                    let mut decoded = Vec::new();
                    let mut reader = brotli::Decompressor::new(&bytes[..], 4096);
                    if reader.read_to_end(&mut decoded).is_ok() && !decoded.is_empty() {
                        debug!(target: TARGET_WEB_REQUEST, "Successfully decompressed brotli content from {}", url);
                        decoded
                    } else {
                        debug!(target: TARGET_WEB_REQUEST, "Brotli decompression failed for {}, trying other methods", url);
                        try_decompressions(&bytes, url)
                    }
                } else {
                    try_decompressions(&bytes, url)
                };

                let text = decode_text(&decompressed, content_type.as_deref());

                if !text.contains('<') {
                    warn!(target: TARGET_WEB_REQUEST, "Response from {} does not look like XML", url);
                }

                info!(target: TARGET_WEB_REQUEST, "Fetched {} bytes from {}", decompressed.len(), url);
                return Ok(cleanup_xml(&text));
            }
            Ok(response) => {
                warn!(target: TARGET_WEB_REQUEST, "Non-success status {} from {}", response.status(), url);
                sleep(RETRY_DELAY).await;
            }
            Err(err) => {
                error!(target: TARGET_WEB_REQUEST, "Request to {} failed: {}", url, err);
                sleep(RETRY_DELAY).await;
            }
        }
    }
}
