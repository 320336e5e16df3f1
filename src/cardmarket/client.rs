//! HTTP client for Cardmarket requests using wreq for TLS fingerprint
//! emulation.

use crate::config::Config;
use crate::cookies::{self, CookieSet};
use crate::error::ScrapeError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Marketplace site root, also the referer for every request.
pub const SITE_ROOT: &str = "https://www.cardmarket.com";

/// Search endpoint template, scoped to Pokémon singles on the French
/// storefront. The encoded query is appended.
const SEARCH_PATH: &str = "/fr/Pokemon/Products/Search?category=-1&searchString=";

/// Desktop Chrome on Windows; Cardmarket varies behavior (including
/// outright blocking) on the header profile.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/122.0.0.0 Safari/537.36";

/// A search response before any status interpretation. The resolver
/// needs the post-redirect URL first: a redirect straight to a product
/// page outranks the status code.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    /// Final URL after redirect following.
    pub final_url: String,
    pub status: u16,
    pub body: String,
}

/// Trait for Cardmarket page fetching - enables mocking for tests.
#[async_trait]
pub trait MarketFetch: Send + Sync {
    /// Issues a product search and returns the uninterpreted response.
    async fn search(&self, query: &str) -> Result<SearchResponse, ScrapeError>;

    /// Fetches a product page: 403 maps to [`ScrapeError::Blocked`],
    /// any other non-success status to [`ScrapeError::Status`].
    async fn page(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Cardmarket HTTP client with browser impersonation.
pub struct CardmarketClient {
    client: Client,
    emulate: bool,
    cookie_header: Option<String>,
    base_url: Option<String>,
}

impl CardmarketClient {
    /// Creates a client carrying the caller's cookies. Never fails:
    /// when the fully configured client cannot be built, a plain one
    /// without emulation takes its place.
    pub fn new(config: &Config, cookies: &CookieSet) -> Self {
        Self::with_base_url(config, cookies, None)
    }

    /// Creates a client with a custom site root (for testing).
    pub fn with_base_url(config: &Config, cookies: &CookieSet, base_url: Option<String>) -> Self {
        let (client, emulate) = build_client(Duration::from_secs(config.timeout_secs));
        Self {
            client,
            emulate,
            cookie_header: cookies::to_header(cookies),
            base_url,
        }
    }

    /// Returns the site root (custom for testing, or production).
    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(SITE_ROOT)
    }

    /// Prepares a GET request with the fixed browser header profile.
    fn request(&self, url: &str) -> wreq::RequestBuilder {
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        if self.emulate {
            request = request.emulation(Emulation::Chrome131);
        }
        request = request
            .header("User-Agent", USER_AGENT)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8")
            .header("Accept-Language", "fr-FR,fr;q=0.9,en;q=0.8")
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .header("Upgrade-Insecure-Requests", "1")
            .header("Referer", "https://www.cardmarket.com/");
        if let Some(cookie) = &self.cookie_header {
            request = request.header("Cookie", cookie);
        }
        request
    }
}

/// Capability-probing factory: the enhanced client carries the cookie
/// store, compression, and timeouts needed to look like a browser; if
/// its construction fails the baseline client still lets the pipeline
/// limp along. Degraded capability is acceptable, total failure is not.
fn build_client(timeout: Duration) -> (Client, bool) {
    let enhanced = Client::builder()
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .build();

    match enhanced {
        Ok(client) => (client, true),
        Err(e) => {
            warn!("Browser-emulating client unavailable, using plain client: {}", e);
            (Client::new(), false)
        }
    }
}

#[async_trait]
impl MarketFetch for CardmarketClient {
    async fn search(&self, query: &str) -> Result<SearchResponse, ScrapeError> {
        let url = format!("{}{}{}", self.base_url(), SEARCH_PATH, urlencoding::encode(query));

        info!("Searching: {}", query);
        let response = self.request(&url).send().await?;

        let status = response.status().as_u16();
        let final_url = response.uri().to_string();
        debug!("Response status {} at {}", status, final_url);

        let body = response.text().await?;
        Ok(SearchResponse { final_url, status, body })
    }

    async fn page(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.request(url).send().await?;

        let status = response.status();
        if status == 403 {
            return Err(ScrapeError::Blocked { status: 403 });
        }
        if !status.is_success() {
            return Err(ScrapeError::Status { status: status.as_u16() });
        }

        Ok(response.text().await?)
    }
}
