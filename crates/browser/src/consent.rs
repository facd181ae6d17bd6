use headless_chrome::Tab;
use tracing::{debug, info};

use cookiescan_core::ScanError;

// Ordered: the first phrase with a visible match is clicked and the
// rest are skipped.
const CONSENT_PHRASES: &[&str] = &[
    "accept all cookies",
    "accept all",
    "i accept",
    "i agree",
];

fn consent_script() -> Result<String, ScanError> {
    let phrases = serde_json::to_string(CONSENT_PHRASES)
        .map_err(|e| ScanError::Browser(e.to_string()))?;
    // Visibility via getClientRects: offsetParent is null for
    // position:fixed banners even when they are on screen.
    Ok(format!(
        r#"
        (() => {{
            const phrases = {phrases};
            const candidates = Array.from(document.querySelectorAll(
                "button, a, [role='button'], input[type='button'], input[type='submit']"
            ));
            for (const phrase of phrases) {{
                for (const el of candidates) {{
                    const label = (el.innerText || el.value || "").trim().toLowerCase();
                    if (!label.includes(phrase)) continue;
                    if (el.getClientRects().length === 0) continue;
                    el.click();
                    return phrase;
                }}
            }}
            return null;
        }})()
        "#
    ))
}

/// Best-effort dismissal of a cookie-consent banner so the jar
/// reflects the "accepted" state. Finds the first visible button or
/// link whose text contains one of the affirmation phrases and clicks
/// it. Not finding one is not an error.
pub fn accept_cookie_banner(tab: &Tab) -> Result<bool, ScanError> {
    let script = consent_script()?;
    let result = tab
        .evaluate(&script, false)
        .map_err(|e| ScanError::Browser(e.to_string()))?;

    match result.value {
        Some(serde_json::Value::String(phrase)) => {
            info!(%phrase, "clicked consent banner");
            Ok(true)
        }
        _ => {
            debug!("no consent banner matched");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consent_script_embeds_phrases_in_order() {
        let script = consent_script().unwrap();
        let mut search_from = 0;
        for phrase in CONSENT_PHRASES {
            let pos = script[search_from..]
                .find(phrase)
                .unwrap_or_else(|| panic!("{phrase} missing or out of priority order"));
            search_from += pos + phrase.len();
        }
    }

    #[test]
    fn test_consent_script_visibility_check_handles_fixed_elements() {
        let script = consent_script().unwrap();
        assert!(script.contains("getClientRects().length === 0"));
        assert!(!script.contains("offsetParent"));
    }
}
