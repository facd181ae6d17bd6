//! Report assembly: joins cookie records, origin attributions, and
//! classifications into a Markdown table, and writes the report file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

use cookiescan_core::{classify, CookieRecord, OriginMap, ScanError};

/// Rendered sentinel for cookies never observed in a Set-Cookie
/// response during the session.
const UNKNOWN_INITIATOR: &str = "unknown";

/// One formatted row of the audit table, derived from a CookieRecord
/// plus its origin attribution and classification.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub name: String,
    pub domain: String,
    pub path: String,
    pub period: String,
    pub duration: String,
    pub initiator: String,
    pub type_label: &'static str,
    pub party: &'static str,
    pub http_only: &'static str,
    pub secure: &'static str,
    pub same_site: &'static str,
}

/// Expiry rendered as an ISO-8601 timestamp, or "Session" when the
/// cookie has no (or a non-positive) expiry.
pub fn format_period(expires: Option<i64>) -> String {
    match expires {
        Some(secs) if secs > 0 => match Utc.timestamp_opt(secs, 0).single() {
            Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            None => "Session".to_string(),
        },
        _ => "Session".to_string(),
    }
}

/// Remaining lifetime as "Xd Yh Zm" with non-zero units only, total
/// seconds when under a minute, "Expired" when the expiry has passed,
/// "Session" when there is no expiry.
pub fn format_duration(expires: Option<i64>, now: DateTime<Utc>) -> String {
    let Some(secs) = expires.filter(|&e| e > 0) else {
        return "Session".to_string();
    };
    let remaining = secs - now.timestamp();
    if remaining <= 0 {
        return "Expired".to_string();
    }
    let days = remaining / 86_400;
    let hours = (remaining % 86_400) / 3_600;
    let minutes = (remaining % 3_600) / 60;
    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if parts.is_empty() {
        return format!("{}s", remaining);
    }
    parts.join(" ")
}

/// "First" when the cookie domain is the crawl's base domain or a
/// subdomain of it, "Third" otherwise. Cookie domains may carry a
/// leading dot.
pub fn party(cookie_domain: &str, base_domain: &str) -> &'static str {
    let domain = cookie_domain.trim_start_matches('.');
    if domain == base_domain || domain.ends_with(&format!(".{base_domain}")) {
        "First"
    } else {
        "Third"
    }
}

/// Derive one row per cookie record, in jar-snapshot order.
pub fn build_rows(
    records: &[CookieRecord],
    origins: &OriginMap,
    lookups: &HashMap<String, String>,
    base_domain: &str,
    now: DateTime<Utc>,
) -> Vec<ReportRow> {
    records
        .iter()
        .map(|cookie| {
            let initiator = origins
                .get(&cookie.name)
                .unwrap_or_else(|| UNKNOWN_INITIATOR.to_string());
            let snippet = lookups.get(&cookie.name).map(String::as_str).unwrap_or("");
            let classification = classify(&cookie.name, snippet);
            ReportRow {
                name: cookie.name.clone(),
                domain: cookie.domain.clone(),
                path: cookie.path.clone(),
                period: format_period(cookie.expires),
                duration: format_duration(cookie.expires, now),
                initiator,
                type_label: classification.as_str(),
                party: party(&cookie.domain, base_domain),
                http_only: if cookie.http_only { "Yes" } else { "No" },
                secure: if cookie.secure { "Yes" } else { "No" },
                same_site: cookie.same_site.map(|s| s.as_str()).unwrap_or(""),
            }
        })
        .collect()
}

/// Render the full Markdown document: header block plus the fixed
/// 12-column table.
pub fn render_report(
    start_url: &str,
    links_visited: usize,
    rows: &[ReportRow],
    now: DateTime<Utc>,
) -> String {
    let mut lines = vec![
        "# Cookie Report".to_string(),
        format!("- Start URL: {start_url}"),
        format!(
            "- Scan date: {}",
            now.to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
        format!("- Links visited: {links_visited}"),
        format!("- Cookies found: {}", rows.len()),
        String::new(),
        "| URL | Cookie Name | Domain | Path | Period | Duration | Initiator | Type | Party | HttpOnly | Secure | SameSite |".to_string(),
        "| --- | --- | --- | --- | --- | --- | --- | --- | --- | --- | --- | --- |".to_string(),
    ];

    for row in rows {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} | {} | {} | {} |",
            row.initiator,
            row.name,
            row.domain,
            row.path,
            row.period,
            row.duration,
            row.initiator,
            row.type_label,
            row.party,
            row.http_only,
            row.secure,
            row.same_site,
        ));
    }

    lines.join("\n")
}

/// Report filename: prefix plus the scan timestamp with `:` and `.`
/// replaced so it is filesystem-safe everywhere.
pub fn report_filename(prefix: &str, now: DateTime<Utc>) -> String {
    let stamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{prefix}{stamp}.md")
}

/// Write the report once, UTF-8. Never appends.
pub fn write_report(path: &Path, report: &str) -> Result<PathBuf, ScanError> {
    std::fs::write(path, report)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use cookiescan_core::SameSite;

    fn cookie(name: &str, domain: &str, expires: Option<i64>) -> CookieRecord {
        CookieRecord {
            name: name.to_string(),
            value: "v".to_string(),
            domain: domain.to_string(),
            path: "/".to_string(),
            expires,
            http_only: false,
            secure: true,
            same_site: Some(SameSite::Lax),
        }
    }

    #[test]
    fn test_format_period() {
        assert_eq!(format_period(None), "Session");
        assert_eq!(format_period(Some(0)), "Session");
        assert_eq!(format_period(Some(-1)), "Session");
        assert_eq!(format_period(Some(1_798_000_000)), "2026-12-23T04:26:40.000Z");
    }

    #[test]
    fn test_format_duration_day_scale() {
        let now = Utc::now();
        let expires = Some((now + Duration::seconds(90_000)).timestamp());
        let rendered = format_duration(expires, now);
        assert!(rendered.starts_with("1d"), "got {rendered}");
    }

    #[test]
    fn test_format_duration_sentinels() {
        let now = Utc::now();
        assert_eq!(format_duration(None, now), "Session");
        assert_eq!(format_duration(Some(0), now), "Session");
        assert_eq!(format_duration(Some(now.timestamp() - 10), now), "Expired");
    }

    #[test]
    fn test_format_duration_under_a_minute() {
        let now = Utc::now();
        let expires = Some(now.timestamp() + 42);
        assert_eq!(format_duration(expires, now), "42s");
    }

    #[test]
    fn test_party_attribution() {
        assert_eq!(party(".sub.example.com", "example.com"), "First");
        assert_eq!(party("example.com", "example.com"), "First");
        assert_eq!(party(".tracker.net", "example.com"), "Third");
        assert_eq!(party("badexample.com", "example.com"), "Third");
    }

    #[test]
    fn test_build_rows_one_per_record_in_order() {
        let now = Utc::now();
        let records = vec![
            cookie("_ga_123", ".example.com", None),
            cookie("mystery", ".tracker.net", None),
        ];
        let origins = OriginMap::new();
        origins.record("_ga_123", "https://example.com/analytics.js");
        let rows = build_rows(&records, &origins, &HashMap::new(), "example.com", now);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "_ga_123");
        assert_eq!(rows[0].initiator, "https://example.com/analytics.js");
        assert_eq!(rows[0].type_label, "Performance");
        assert_eq!(rows[0].party, "First");
        assert_eq!(rows[1].initiator, "unknown");
        assert_eq!(rows[1].type_label, "Unknown");
        assert_eq!(rows[1].party, "Third");
    }

    #[test]
    fn test_render_report_header_and_table() {
        let now = Utc::now();
        let records = vec![cookie("session_id", "example.com", None)];
        let rows = build_rows(&records, &OriginMap::new(), &HashMap::new(), "example.com", now);
        let report = render_report("https://example.com/", 3, &rows, now);

        assert!(report.starts_with("# Cookie Report"));
        assert!(report.contains("- Links visited: 3"));
        assert!(report.contains("- Cookies found: 1"));
        assert!(report.contains("| unknown | session_id | example.com | / | Session | Session | unknown | Essential | First | No | Yes | Lax |"));
    }

    #[test]
    fn test_report_filename_is_sanitized() {
        let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 34, 56).unwrap();
        let name = report_filename("cookie-report", now);
        assert!(name.starts_with("cookie-report2026-08-29T12-34-56"));
        assert!(name.ends_with(".md"));
        assert!(!name.contains(':'));
        assert_eq!(name.matches('.').count(), 1);
    }
}
