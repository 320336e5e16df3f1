//! The resolution + extraction pipeline.

use crate::cardmarket::client::{CardmarketClient, MarketFetch};
use crate::cardmarket::models::PriceReport;
use crate::cardmarket::{extract, resolver, urls};
use crate::config::Config;
use crate::cookies;
use crate::error::ScrapeError;
use std::path::Path;
use tracing::{debug, info};

/// Executes a price lookup: resolve the product page, derive the two
/// filtered URLs, fetch each page (or read its local override), run the
/// matching extractor.
pub struct PricesCommand {
    config: Config,
}

impl PricesCommand {
    /// Creates a new prices command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the full pipeline for one query. Everything constructed
    /// here is discarded on return; invocations share no state.
    pub async fn execute(&self, query: &str) -> Result<PriceReport, ScrapeError> {
        let cookies = cookies::collect(
            self.config.cookie.as_deref(),
            self.config.cookie_file.as_deref(),
        );
        let client = CardmarketClient::new(&self.config, &cookies);
        self.execute_with_client(&client, query).await
    }

    /// Runs the pipeline with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl MarketFetch,
        query: &str,
    ) -> Result<PriceReport, ScrapeError> {
        if query.trim().is_empty() {
            return Err(ScrapeError::EmptyQuery);
        }

        info!("Looking up prices for: {}", query);
        let product_url = resolver::resolve(client, query).await?;
        debug!("Product page: {}", product_url);

        let lowest_url = urls::apply_filters(&product_url, urls::LOWEST_FILTERS)?;
        let html = self.page_html(client, &lowest_url, self.config.html_file.as_deref()).await?;
        let lowest = extract::extract_lowest(&html);

        // The median is computed over a narrower offer population, so
        // its page is a separate fetch with its own filter set.
        let median_url = urls::apply_filters(&product_url, urls::MEDIAN_FILTERS)?;
        let html = self
            .page_html(client, &median_url, self.config.html_file_median.as_deref())
            .await?;
        let median = extract::extract_median(&html);

        info!(
            "Lowest: {} | Median: {}",
            lowest.as_deref().unwrap_or("absent"),
            median.as_deref().unwrap_or("absent")
        );

        Ok(PriceReport { lowest, median, url: lowest_url })
    }

    /// Fetches a filtered page, or reads the local override used to
    /// decouple extraction testing from network access.
    async fn page_html(
        &self,
        client: &impl MarketFetch,
        url: &str,
        override_path: Option<&Path>,
    ) -> Result<String, ScrapeError> {
        match override_path {
            Some(path) => {
                debug!("Using local HTML override: {}", path.display());
                let bytes = std::fs::read(path)?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            None => client.page(url).await,
        }
    }
}
