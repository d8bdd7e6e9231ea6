//! Page fetching with bounded retries and empty-on-failure semantics

#[cfg(test)]
use mockall::automock;

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::{FETCH_MAX_RETRIES, FETCH_TIMEOUT_SECS, FETCH_USER_AGENT};

/// Trait for fetching documentation pages
///
/// Every failure mode collapses to an empty string so the algorithmic
/// core never has to distinguish a network fault from a missing page.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a URL, returning the body or an empty string on failure
    async fn fetch(&self, url: &str) -> String;
}

/// HTTP fetcher with per-request timeout and linear backoff between retries
pub struct HttpFetcher {
    client: reqwest::Client,
    max_retries: u32,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(FETCH_USER_AGENT)
                .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            max_retries: FETCH_MAX_RETRIES,
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> String {
        for attempt in 0..self.max_retries {
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if !status.is_success() {
                        // A definitive HTTP answer; retrying won't change it
                        debug!("{} returned status {}", url, status);
                        return String::new();
                    }
                    match response.text().await {
                        Ok(body) => return body,
                        Err(e) => warn!("Failed to read body from {}: {}", url, e),
                    }
                }
                Err(e) => warn!("Request to {} failed: {}", url, e),
            }

            if attempt + 1 < self.max_retries {
                sleep(Duration::from_secs((attempt + 1) as u64)).await;
            }
        }

        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn fetch_returns_body_on_success() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/index.html")
            .with_status(200)
            .with_body("<html>cudaMalloc</html>")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new();
        let body = fetcher.fetch(&format!("{}/index.html", server.url())).await;

        mock.assert_async().await;
        assert_eq!(body, "<html>cudaMalloc</html>");
    }

    #[tokio::test]
    async fn fetch_returns_empty_on_http_error() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/missing.html")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new();
        let body = fetcher
            .fetch(&format!("{}/missing.html", server.url()))
            .await;

        mock.assert_async().await;
        assert_eq!(body, "");
    }

    #[tokio::test]
    async fn fetch_does_not_retry_definitive_http_errors() {
        let mut server = Server::new_async().await;

        // expect(1): a 404 must short-circuit instead of burning retries
        let mock = server
            .mock("GET", "/gone.html")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new();
        fetcher.fetch(&format!("{}/gone.html", server.url())).await;

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_returns_empty_when_server_is_unreachable() {
        let fetcher = HttpFetcher::new();
        // Port 1 is never listening
        let body = fetcher.fetch("http://127.0.0.1:1/index.html").await;
        assert_eq!(body, "");
    }
}
