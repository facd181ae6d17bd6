use once_cell::sync::Lazy;
use regex::Regex;

/// Purpose category assigned to a cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Essential,
    Performance,
    Marketing,
    Unknown,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Essential => "Essential",
            Classification::Performance => "Performance",
            Classification::Marketing => "Marketing",
            Classification::Unknown => "Unknown",
        }
    }
}

// Ordered: first match wins, so pattern order changes outcomes.
// Performance is checked before Marketing before Essential.
static TYPE_PATTERNS: Lazy<Vec<(Classification, Regex)>> = Lazy::new(|| {
    vec![
        (
            Classification::Performance,
            Regex::new(r"(?i)_ga|_gid|_gat|analytics|segment|amplitude|mixpanel").unwrap(),
        ),
        (
            Classification::Marketing,
            Regex::new(r"(?i)ad|ads|doubleclick|fbp|fbc|marketing|pixel|gtm|gclid").unwrap(),
        ),
        (
            Classification::Essential,
            Regex::new(r"(?i)session|csrf|xsrf|auth|token|login|consent|prefs?").unwrap(),
        ),
    ]
});

/// Classify a cookie by name pattern, falling back to keywords in the
/// lookup snippet. Deterministic for fixed inputs.
pub fn classify(name: &str, lookup_snippet: &str) -> Classification {
    for (classification, pattern) in TYPE_PATTERNS.iter() {
        if pattern.is_match(name) {
            return *classification;
        }
    }
    if !lookup_snippet.is_empty() {
        let text = lookup_snippet.to_lowercase();
        if text.contains("analytics") || text.contains("performance") {
            return Classification::Performance;
        }
        if text.contains("advertising") || text.contains("marketing") {
            return Classification::Marketing;
        }
        if text.contains("session") || text.contains("security") {
            return Classification::Essential;
        }
    }
    Classification::Unknown
}
