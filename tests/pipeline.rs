//! End-to-end pipeline test without a browser: fixed discovered
//! links, a fixed jar snapshot, and a canned lookup result are fed
//! through normalization, attribution, classification, and report
//! rendering.

use std::collections::HashMap;

use chrono::Utc;

use cookiescan_core::links::normalize_links;
use cookiescan_core::setcookie::{directive_name, split_set_cookie_header};
use cookiescan_core::{CookieRecord, OriginMap};
use cookiescan_report::{build_rows, render_report};

fn jar_cookie(name: &str, domain: &str) -> CookieRecord {
    CookieRecord {
        name: name.to_string(),
        value: "value".to_string(),
        domain: domain.to_string(),
        path: "/".to_string(),
        expires: None,
        http_only: true,
        secure: true,
        same_site: None,
    }
}

#[test]
fn scan_pipeline_produces_expected_report() {
    // Seed page exposes 3 links, 2 unique after fragment stripping.
    let hrefs = vec![
        "https://example.com/pricing#plans",
        "https://example.com/pricing",
        "https://example.com/about",
    ];
    let links = normalize_links(&hrefs);
    assert_eq!(links.len(), 2);

    // Responses observed while crawling set both cookies; the second
    // response for `a` must not steal the attribution.
    let origins = OriginMap::new();
    for (header, url) in [
        ("a_ga=1; Path=/; Expires=Wed, 21-Oct-2026 07:28:00 GMT", "https://example.com/"),
        ("a_ga=1; Path=/", "https://example.com/pricing"),
        ("b=2; Domain=.ads.example.net", "https://ads.example.net/pixel"),
    ] {
        for directive in split_set_cookie_header(header) {
            let name = directive_name(&directive).unwrap();
            origins.record(&name, url);
        }
    }

    // `a` carries a Performance-pattern name; `b` resolves only via
    // the lookup text.
    let records = vec![
        jar_cookie("a_ga", ".example.com"),
        jar_cookie("b", ".ads.example.net"),
    ];
    let mut lookups = HashMap::new();
    lookups.insert("b".to_string(), "used for advertising".to_string());

    let now = Utc::now();
    let rows = build_rows(&records, &origins, &lookups, "example.com", now);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].type_label, "Performance");
    assert_eq!(rows[0].initiator, "https://example.com/");
    assert_eq!(rows[1].type_label, "Marketing");
    assert_eq!(rows[1].initiator, "https://ads.example.net/pixel");

    let report = render_report("https://example.com/", links.len(), &rows, now);
    assert!(report.contains("- Cookies found: 2"));
    assert!(report.contains("- Links visited: 2"));
}
