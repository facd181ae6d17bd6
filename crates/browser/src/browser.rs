use std::ffi::OsString;
use std::sync::Arc;
use std::time::{Duration, Instant};

use headless_chrome::protocol::cdp::types::Method;
use headless_chrome::protocol::cdp::Network;
use headless_chrome::{Browser, Tab};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use cookiescan_core::{CookieRecord, SameSite, ScanError};

/// A fixed cookie injected into the jar before the first navigation.
#[derive(Debug, Clone)]
pub struct SeedCookie {
    pub name: String,
    pub value: String,
    pub url: String,
}

pub struct ScanBrowser {
    browser: Browser,
}

impl ScanBrowser {
    /// Launch Chrome, headless unless debug mode asks for a visible window.
    pub fn launch(debug: bool) -> Result<Self, ScanError> {
        let mut extra_args: Vec<OsString> = Vec::new();

        // Required for running in Docker containers
        extra_args.push(OsString::from("--no-sandbox"));
        extra_args.push(OsString::from("--disable-dev-shm-usage"));
        extra_args.push(OsString::from("--disable-gpu"));

        let mut builder = headless_chrome::LaunchOptionsBuilder::default();
        builder
            .headless(!debug)
            .window_size(Some((1920, 1080)))
            .args(extra_args.iter().map(|a| a.as_ref()).collect());

        // Use CHROME_PATH env var if set (for Docker/custom installs)
        if let Ok(chrome_path) = std::env::var("CHROME_PATH") {
            builder.path(Some(std::path::PathBuf::from(chrome_path)));
        }

        let launch_options = builder
            .build()
            .map_err(|e| ScanError::Browser(e.to_string()))?;

        let browser = Browser::new(launch_options).map_err(|e| ScanError::Browser(e.to_string()))?;

        Ok(Self { browser })
    }

    pub fn new_tab(&self) -> Result<Arc<Tab>, ScanError> {
        self.browser
            .new_tab()
            .map_err(|e| ScanError::Browser(e.to_string()))
    }

    /// Inject fixed cookies via CDP. Must run before the first
    /// navigation so session-gated content is reachable from the start.
    pub fn seed_cookies(&self, tab: &Tab, cookies: &[SeedCookie]) -> Result<(), ScanError> {
        for cookie in cookies {
            tab.call_method(Network::SetCookie {
                name: cookie.name.clone(),
                value: cookie.value.clone(),
                url: Some(cookie.url.clone()),
                domain: None,
                path: None,
                secure: None,
                http_only: None,
                same_site: None,
                expires: None,
                priority: None,
                same_party: None,
                source_scheme: None,
                source_port: None,
                partition_key: None,
            })
            .map_err(|e| ScanError::Browser(e.to_string()))?;
            debug!(cookie = %cookie.name, "seeded session cookie");
        }
        Ok(())
    }

    /// Navigate a tab and wait for the load event, bounded by `timeout`.
    pub fn navigate(&self, tab: &Tab, url: &str, timeout: Duration) -> Result<(), ScanError> {
        tab.set_default_timeout(timeout);
        tab.navigate_to(url).map_err(|e| ScanError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        tab.wait_until_navigated().map_err(|e| ScanError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    /// Best-effort wait for the page to settle after the load event.
    ///
    /// There is no network-idle signal over CDP here, so poll the
    /// document ready state and then leave a short grace period for
    /// late subresources. Callers treat the timeout as non-fatal.
    pub async fn settle(&self, tab: &Tab, max_wait: Duration) -> Result<(), ScanError> {
        let started = Instant::now();
        loop {
            if started.elapsed() > max_wait {
                return Err(ScanError::Timeout(max_wait.as_secs()));
            }
            let ready = tab
                .evaluate("document.readyState", false)
                .ok()
                .and_then(|r| r.value)
                .and_then(|v| v.as_str().map(|s| s == "complete"))
                .unwrap_or(false);
            if ready {
                break;
            }
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        tokio::time::sleep(Duration::from_millis(1500)).await;
        Ok(())
    }

    /// Collect every anchor href from the live DOM, already resolved
    /// to absolute form by the browser.
    pub fn collect_links(&self, tab: &Tab) -> Result<Vec<String>, ScanError> {
        let result = tab
            .evaluate(
                r#"JSON.stringify(Array.from(document.querySelectorAll("a[href]"), (anchor) => anchor.href))"#,
                false,
            )
            .map_err(|e| ScanError::Browser(e.to_string()))?;

        let Some(serde_json::Value::String(raw)) = result.value else {
            return Ok(Vec::new());
        };
        let links: Vec<String> = serde_json::from_str(&raw).unwrap_or_default();
        Ok(links)
    }

    /// Snapshot the full cookie jar across all domains touched during
    /// the crawl. Session cookies carry no expiry.
    pub fn snapshot_cookies(&self, tab: &Tab) -> Result<Vec<CookieRecord>, ScanError> {
        let result = tab
            .call_method(GetAllCookies {})
            .map_err(|e| ScanError::Browser(e.to_string()))?;

        Ok(result.cookies.into_iter().map(cookie_record).collect())
    }

    /// Close a tab, swallowing failures; a tab that refuses to close
    /// does not affect the rest of the crawl.
    pub fn close_tab(&self, tab: &Tab) {
        if let Err(e) = tab.close(true) {
            warn!(error = %e, "failed to close tab");
        }
    }
}

/// `Storage.getCookies`: the whole browser context's jar, unlike
/// `Network.getCookies` which is scoped to the tab's current URL.
///
/// Hand-written command type because the generated
/// `Storage::GetCookies` return object mistypes `cookies` as a single
/// `Network::Cookie`; the protocol returns an array.
#[derive(Debug, Serialize)]
struct GetAllCookies {}

#[derive(Debug, Deserialize)]
struct GetAllCookiesReturnObject {
    cookies: Vec<Network::Cookie>,
}

impl Method for GetAllCookies {
    const NAME: &'static str = "Storage.getCookies";
    type ReturnObject = GetAllCookiesReturnObject;
}

fn cookie_record(cookie: Network::Cookie) -> CookieRecord {
    let expires = if cookie.session || cookie.expires <= 0.0 {
        None
    } else {
        Some(cookie.expires as i64)
    };
    CookieRecord {
        name: cookie.name,
        value: cookie.value,
        domain: cookie.domain,
        path: cookie.path,
        expires,
        http_only: cookie.http_only,
        secure: cookie.secure,
        same_site: cookie.same_site.map(|s| match s {
            Network::CookieSameSite::Strict => SameSite::Strict,
            Network::CookieSameSite::Lax => SameSite::Lax,
            Network::CookieSameSite::None => SameSite::None,
        }),
    }
}
