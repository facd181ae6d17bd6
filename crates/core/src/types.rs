use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::links::base_domain;
use crate::origin::OriginMap;

/// One cookie from the jar snapshot taken after crawling completes.
/// Immutable once captured; every record produces exactly one report row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    /// Expiry as unix seconds; `None` for session cookies.
    pub expires: Option<i64>,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: Option<SameSite>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Per-run scan state. Created fresh at run start, threaded by
/// reference into the crawler and report builder, dropped at run end.
pub struct ScanSession {
    pub start_url: Url,
    /// Registrable base domain of the start host, used for
    /// first/third-party attribution.
    pub base_domain: String,
    /// Shared with every tab's response handler.
    pub origins: Arc<OriginMap>,
    visited: HashSet<String>,
}

impl ScanSession {
    pub fn new(start_url: Url) -> Self {
        let base_domain = base_domain(start_url.host_str().unwrap_or_default());
        Self {
            start_url,
            base_domain,
            origins: Arc::new(OriginMap::new()),
            visited: HashSet::new(),
        }
    }

    /// Record a link as visited. Returns false if it was already seen.
    pub fn mark_visited(&mut self, link: &str) -> bool {
        self.visited.insert(link.to_string())
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
