//! The crawl pipeline: seed navigation, link traversal, cookie
//! snapshot, lookups, and report assembly.
//!
//! Only browser launch and the seed navigation are fatal. Everything
//! else (per-link navigation, consent clicks, settle waits, lookups)
//! is best-effort: logged and skipped, never aborting the run.

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};
use url::Url;

use cookiescan_browser::{
    accept_cookie_banner, attach_origin_tracker, ScanBrowser, SeedCookie, LINK_NAV_TIMEOUT,
    LINK_SETTLE_TIMEOUT, SEED_NAV_TIMEOUT, SEED_SETTLE_TIMEOUT,
};
use cookiescan_core::links::normalize_links;
use cookiescan_core::{ScanConfig, ScanError, ScanSession};
use cookiescan_lookup::CookieLookup;
use cookiescan_report::{build_rows, render_report, report_filename, write_report};

/// Degraded-error policy in one place: log the failure and continue.
fn best_effort<T>(label: &str, result: Result<T, ScanError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "{label} failed, continuing");
            None
        }
    }
}

pub async fn run_scan(config: ScanConfig) -> Result<()> {
    let start_url = Url::parse(&config.start_url)
        .map_err(|_| ScanError::InvalidUrl(config.start_url.clone()))?;
    let mut session = ScanSession::new(start_url.clone());

    // Init: launch, seed the jar, attach the tracker. All fatal.
    let browser = ScanBrowser::launch(config.debug)?;
    let seed_page = browser.new_tab()?;
    attach_origin_tracker(&seed_page, session.origins.clone())?;
    browser.seed_cookies(
        &seed_page,
        &[SeedCookie {
            name: config.session_cookie_name.clone(),
            value: config.session_cookie_value.clone(),
            url: start_url.to_string(),
        }],
    )?;

    // SeedLoaded: the one navigation whose failure aborts the run.
    info!("navigating to start URL: {}", start_url);
    browser.navigate(&seed_page, start_url.as_str(), SEED_NAV_TIMEOUT)?;
    best_effort("seed settle wait", browser.settle(&seed_page, SEED_SETTLE_TIMEOUT).await);
    best_effort("consent handling", accept_cookie_banner(&seed_page));

    // LinksDiscovered
    let hrefs =
        best_effort("link discovery", browser.collect_links(&seed_page)).unwrap_or_default();
    let links: Vec<String> = normalize_links(&hrefs)
        .into_iter()
        .take(config.max_links)
        .collect();
    info!("discovered {} crawlable links", links.len());

    // Traversing: strictly sequential, one tab at a time.
    for link in &links {
        if !session.mark_visited(link) {
            continue;
        }
        visit_link(&browser, &session, link).await;
    }

    // CookiesSnapshotted
    info!("visited {} links, extracting cookies", session.visited_count());
    let records = browser.snapshot_cookies(&seed_page)?;
    browser.close_tab(&seed_page);
    drop(browser);
    info!("extracted {} cookies, performing lookups", records.len());

    let lookups = match CookieLookup::new() {
        Ok(lookup) => lookup.lookup_all(&records, config.max_lookups).await,
        Err(e) => {
            warn!(error = %e, "lookup client unavailable, skipping lookups");
            Default::default()
        }
    };

    let now = Utc::now();
    let rows = build_rows(&records, &session.origins, &lookups, &session.base_domain, now);
    let report = render_report(start_url.as_str(), session.visited_count(), &rows, now);
    let filename = report_filename(&config.output_prefix, now);
    let path = write_report(Path::new(&filename), &report)?;
    info!("report written to {}", path.display());

    Ok(())
}

/// Visit one discovered link in a fresh tab. Every failure mode here
/// is non-fatal; the tab is closed regardless of outcome.
async fn visit_link(browser: &ScanBrowser, session: &ScanSession, link: &str) {
    let Some(tab) = best_effort("tab open", browser.new_tab()) else {
        return;
    };
    best_effort("tracker attach", attach_origin_tracker(&tab, session.origins.clone()));

    info!("visiting link: {}", link);
    if best_effort("link navigation", browser.navigate(&tab, link, LINK_NAV_TIMEOUT)).is_some() {
        best_effort("link settle wait", browser.settle(&tab, LINK_SETTLE_TIMEOUT).await);
        best_effort("consent handling", accept_cookie_banner(&tab));
    }
    browser.close_tab(&tab);
}
