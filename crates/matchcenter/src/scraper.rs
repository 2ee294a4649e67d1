use crate::parser::{MatchCenterPage, ParseError, parse_match_center, parse_match_center_lenient};
use crate::types::{MatchDate, MatchRecord};

use reqwest::Client;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
}

#[derive(Debug, Clone)]
pub struct WebScraper {
    client: Client,
    base_url: String,
}

impl WebScraper {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            base_url: crate::BASE_URL.to_string(),
        })
    }

    /// Points the scraper at another site root, e.g. a mirror or a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn match_center_url(&self, date: &MatchDate) -> String {
        format!("{}/match-Center/?date={}", self.base_url, date)
    }

    pub async fn fetch_page(&self, date: &MatchDate) -> Result<String, ScraperError> {
        let url = self.match_center_url(date);
        log::info!("Fetching match center for {}: {}", date, url);
        let html = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        log::debug!("Received {} bytes", html.len());
        Ok(html)
    }

    pub async fn fetch_matches(&self, date: &MatchDate) -> Result<Vec<MatchRecord>, ScraperError> {
        let html = self.fetch_page(date).await?;
        Ok(parse_match_center(&html)?)
    }

    pub async fn fetch_matches_lenient(
        &self,
        date: &MatchDate,
    ) -> Result<MatchCenterPage, ScraperError> {
        let html = self.fetch_page(date).await?;
        Ok(parse_match_center_lenient(&html))
    }
}
