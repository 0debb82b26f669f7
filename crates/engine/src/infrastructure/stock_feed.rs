//! HTTP client for the live stock feed.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::infrastructure::ports::{StockFeedError, StockFeedPort};

/// Placeholder substituted with the product number in the configured URL.
pub const PRODUCT_PLACEHOLDER: &str = "{productId}";

/// Default timeout for feed requests, in seconds.
pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 5;

/// Client for the remote live-stock endpoint.
///
/// The endpoint is a plain HTTP GET against a configured URL template; the
/// response body is a bare integer, possibly wrapped in whitespace.
#[derive(Clone)]
pub struct HttpStockFeed {
    client: Client,
    url_template: String,
}

impl HttpStockFeed {
    pub fn new(url_template: &str) -> Self {
        Self::with_timeout(url_template, Duration::from_secs(DEFAULT_FEED_TIMEOUT_SECS))
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(url_template: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url_template: url_template.trim().to_string(),
        }
    }

    /// The request URL for a product, with the placeholder substituted.
    fn request_url(&self, product_number: &str) -> String {
        self.url_template
            .replace(PRODUCT_PLACEHOLDER, product_number)
    }
}

/// Parse a feed response body into a stock count.
///
/// The body is trimmed first; the feed is allowed to answer zero or negative
/// counts. Anything that is not an integer is a malformed body, kept verbatim
/// for the failure log.
fn parse_stock_body(url: &str, body: &str) -> Result<i64, StockFeedError> {
    body.trim()
        .parse::<i64>()
        .map_err(|_| StockFeedError::MalformedBody {
            url: url.to_string(),
            body: body.to_string(),
        })
}

#[async_trait]
impl StockFeedPort for HttpStockFeed {
    async fn fetch_live_stock(&self, product_number: &str) -> Result<i64, StockFeedError> {
        let url = self.request_url(product_number);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StockFeedError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StockFeedError::Transport {
                url,
                message: format!("unexpected status {status}"),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| StockFeedError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        parse_stock_body(&url, &body)
    }
}
