pub mod browser;
pub mod consent;
pub mod tracker;

pub use browser::{ScanBrowser, SeedCookie};
pub use consent::accept_cookie_banner;
pub use tracker::attach_origin_tracker;

use std::time::Duration;

/// Seed-page navigation; failure here is fatal to the run.
pub const SEED_NAV_TIMEOUT: Duration = Duration::from_secs(60);
/// Per-link navigation; failure is logged and the crawl continues.
pub const LINK_NAV_TIMEOUT: Duration = Duration::from_secs(45);
/// Best-effort settle wait after the seed navigation.
pub const SEED_SETTLE_TIMEOUT: Duration = Duration::from_secs(15);
/// Best-effort settle wait after each link navigation.
pub const LINK_SETTLE_TIMEOUT: Duration = Duration::from_secs(10);
