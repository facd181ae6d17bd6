use std::collections::HashSet;

fn is_http_url(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://")
}

/// Reduce raw anchor hrefs to a canonical crawlable set: absolute
/// http/https only, fragment stripped, deduplicated by stripped form,
/// first-seen order preserved. Malformed entries are dropped silently.
pub fn normalize_links<S: AsRef<str>>(links: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();
    for link in links {
        let link = link.as_ref();
        if link.is_empty() || !is_http_url(link) {
            continue;
        }
        let clean = link.split('#').next().unwrap_or_default();
        if seen.insert(clean.to_string()) {
            normalized.push(clean.to_string());
        }
    }
    normalized
}

/// Registrable base domain: the last two labels of the hostname, or
/// the whole hostname when it has two labels or fewer.
pub fn base_domain(hostname: &str) -> String {
    let parts: Vec<&str> = hostname.split('.').filter(|p| !p.is_empty()).collect();
    if parts.len() <= 2 {
        return hostname.to_string();
    }
    parts[parts.len() - 2..].join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_only_http() {
        let links = vec![
            "https://example.com/a",
            "mailto:someone@example.com",
            "javascript:void(0)",
            "ftp://example.com/file",
            "http://example.com/b",
            "",
        ];
        assert_eq!(
            normalize_links(&links),
            vec!["https://example.com/a", "http://example.com/b"]
        );
    }

    #[test]
    fn test_normalize_strips_fragments_and_dedups() {
        let links = vec![
            "https://example.com/page#top",
            "https://example.com/page#bottom",
            "https://example.com/page",
            "https://example.com/other",
        ];
        assert_eq!(
            normalize_links(&links),
            vec!["https://example.com/page", "https://example.com/other"]
        );
    }

    #[test]
    fn test_normalize_preserves_first_seen_order() {
        let links = vec!["https://b.com/", "https://a.com/", "https://b.com/"];
        assert_eq!(normalize_links(&links), vec!["https://b.com/", "https://a.com/"]);
    }

    #[test]
    fn test_base_domain() {
        assert_eq!(base_domain("www.example.com"), "example.com");
        assert_eq!(base_domain("a.b.example.co"), "example.co");
        assert_eq!(base_domain("example.com"), "example.com");
        assert_eq!(base_domain("localhost"), "localhost");
    }
}
