/// Runtime configuration for a single scan.
///
/// Populated from CLI flags (each with an environment variable
/// fallback) and threaded by value into the scan pipeline. Defaults
/// match the documented behavior: 30 links, 20 lookups, headless.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub start_url: String,
    /// Report filename prefix; the scan timestamp is appended.
    pub output_prefix: String,
    /// Fixed cookie seeded into the jar before the first navigation
    /// so session-gated pages stay reachable.
    pub session_cookie_name: String,
    pub session_cookie_value: String,
    /// Cap on discovered links visited after the seed page.
    pub max_links: usize,
    /// Cap on external lookups, consumed per attempt regardless of outcome.
    pub max_lookups: usize,
    /// Show the browser window; never changes scan logic.
    pub debug: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            start_url: "https://www.google.com/".to_string(),
            output_prefix: "cookie-report".to_string(),
            session_cookie_name: "session_cookie".to_string(),
            session_cookie_value: "example_session_value".to_string(),
            max_links: 30,
            max_lookups: 20,
            debug: false,
        }
    }
}
