//! HTTP client creation and request handling for the sanctions source.

use anyhow::Result;
use reqwest::header;
use tokio::time::timeout;
use tracing::debug;

use super::types::REQUEST_TIMEOUT;
use crate::TARGET_WEB_REQUEST;

/// Create the HTTP client used for list downloads
pub fn create_http_client() -> Result<reqwest::Client> {
    debug!(target: TARGET_WEB_REQUEST, "Creating HTTP client");

    reqwest::Client::builder()
        .gzip(true)
        .redirect(reqwest::redirect::Policy::default())
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))
}

/// Issue a single GET request with a bounded timeout
pub async fn fetch_once(client: &reqwest::Client, url: &str) -> Result<reqwest::Response> {
    debug!(target: TARGET_WEB_REQUEST, "Attempting request to {}", url);

    let result = timeout(
        REQUEST_TIMEOUT,
        client
            .get(url)
            .header(header::USER_AGENT, "sdnwatch/0.3")
            .header(
                header::ACCEPT,
                "application/xml, text/xml, */*;q=0.9",
            )
            .header(header::ACCEPT_ENCODING, "gzip, deflate, br")
            .send(),
    )
    .await;

    match result {
        Ok(Ok(resp)) => Ok(resp),
        Ok(Err(err)) => Err(anyhow::anyhow!("Request to {} failed: {}", url, err)),
        Err(_) => Err(anyhow::anyhow!(
            "Request to {} timed out after {} seconds",
            url,
            REQUEST_TIMEOUT.as_secs()
        )),
    }
}
