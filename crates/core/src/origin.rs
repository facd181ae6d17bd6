use dashmap::DashMap;

/// Cookie name -> URL of the first response observed setting it.
///
/// Shared across all tabs open during one crawl session. Response
/// handlers run on the browser transport thread, so writes are
/// set-if-absent only: first writer wins, later writes are no-ops.
/// Reads happen after the tabs have closed.
#[derive(Debug, Default)]
pub struct OriginMap {
    inner: DashMap<String, String>,
}

impl OriginMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the first response URL seen for a cookie name.
    /// Returns true if this call inserted the entry.
    pub fn record(&self, name: &str, response_url: &str) -> bool {
        let mut inserted = false;
        self.inner.entry(name.to_string()).or_insert_with(|| {
            inserted = true;
            response_url.to_string()
        });
        inserted
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.inner.get(name).map(|v| v.value().clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
