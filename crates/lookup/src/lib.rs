//! External cookie-information lookup.
//!
//! Queries a public cookie database's search page with the cookie
//! name and pulls a short description out of the result markup. The
//! content-region selector is an integration point with a third-party
//! page layout, not a stable contract; everything behind
//! [`CookieLookup::lookup`] is best-effort and any failure degrades to
//! "no snippet" for that one cookie.

use std::collections::HashMap;
use std::time::Duration;

use scraper::{Html, Selector};
use tracing::{info, warn};

use cookiescan_core::{CookieRecord, ScanError};

const DEFAULT_ENDPOINT: &str = "https://cookiedatabase.org/";

/// Fragile by nature: tied to the current Elementor layout of the
/// search results page.
const CONTENT_REGION_SELECTOR: &str = "body > div.elementor.elementor-83257.elementor-location-archive > section.elementor-section.elementor-top-section.elementor-element.elementor-element-cff7622.elementor-section-content-top.elementor-section-boxed.elementor-section-height-default.elementor-section-height-default > div > div.elementor-column.elementor-col-50.elementor-top-column.elementor-element.elementor-element-1040f2c";

const MAX_SNIPPET_CHARS: usize = 500;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct CookieLookup {
    client: reqwest::Client,
    endpoint: String,
}

impl CookieLookup {
    pub fn new() -> Result<Self, ScanError> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Result<Self, ScanError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; cookiescan/0.1)")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ScanError::Lookup(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Look up one cookie name. Returns `None` on any failure: request
    /// error, non-success status, or the content region missing from
    /// the returned document. One attempt, no retries.
    pub async fn lookup(&self, name: &str) -> Option<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("s", name), ("lang", "en")])
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?;
        let body = response.text().await.ok()?;
        extract_snippet(&body)
    }

    /// Run lookups for up to `budget` cookies, in jar order. Every
    /// attempt consumes budget whether or not it yields text; failed
    /// attempts are recorded as an empty snippet.
    pub async fn lookup_all(
        &self,
        cookies: &[CookieRecord],
        budget: usize,
    ) -> HashMap<String, String> {
        let mut results = HashMap::new();
        if cookies.is_empty() || budget == 0 {
            return results;
        }

        info!("performing lookups for up to {} cookies", budget);
        for cookie in cookies.iter().take(budget) {
            match self.lookup(&cookie.name).await {
                Some(snippet) => {
                    info!(cookie = %cookie.name, "lookup found a description");
                    results.insert(cookie.name.clone(), snippet);
                }
                None => {
                    warn!(cookie = %cookie.name, "lookup yielded no usable text");
                    results.insert(cookie.name.clone(), String::new());
                }
            }
        }
        results
    }
}

/// Pull the text of the known content region out of a results page,
/// collapse whitespace, and cap the length.
fn extract_snippet(html: &str) -> Option<String> {
    let selector = Selector::parse(CONTENT_REGION_SELECTOR).ok()?;
    let document = Html::parse_document(html);
    let region = document.select(&selector).next()?;
    let text = region
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(MAX_SNIPPET_CHARS).collect())
}
