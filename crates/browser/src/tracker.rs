use std::sync::Arc;

use headless_chrome::Tab;
use tracing::debug;

use cookiescan_core::setcookie::{directive_name, split_set_cookie_header};
use cookiescan_core::{OriginMap, ScanError};

/// Subscribe a tab's network responses to the shared origin map.
///
/// The handler runs on the browser transport thread for the lifetime
/// of the tab. It only performs set-if-absent writes, so concurrent
/// first-set races between tabs resolve to whichever response is
/// processed first.
pub fn attach_origin_tracker(tab: &Arc<Tab>, origins: Arc<OriginMap>) -> Result<(), ScanError> {
    tab.register_response_handling(
        "cookie-origin-tracker",
        Box::new(move |event_params, _fetch_body| {
            let response_url = &event_params.response.url;
            let headers = match serde_json::to_value(&event_params.response.headers) {
                Ok(v) => v,
                Err(_) => return,
            };
            let Some(header_value) = set_cookie_value(&headers) else {
                return;
            };
            for directive in split_set_cookie_header(header_value) {
                if let Some(name) = directive_name(&directive) {
                    if origins.record(&name, response_url) {
                        debug!(cookie = %name, url = %response_url, "first set-cookie response");
                    }
                }
            }
        }),
    )
    // register_response_handling returns any handler previously bound
    // under the same name; each tab gets exactly one, so drop it.
    .map(|_| ())
    .map_err(|e| ScanError::Browser(e.to_string()))
}

/// Case-insensitive lookup of the set-cookie header in a CDP header
/// object.
fn set_cookie_value(headers: &serde_json::Value) -> Option<&str> {
    headers
        .as_object()?
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("set-cookie"))
        .and_then(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_cookie_value_case_insensitive() {
        let headers = json!({"Content-Type": "text/html", "Set-Cookie": "sid=1; Path=/"});
        assert_eq!(set_cookie_value(&headers), Some("sid=1; Path=/"));

        let headers = json!({"set-cookie": "sid=2"});
        assert_eq!(set_cookie_value(&headers), Some("sid=2"));
    }

    #[test]
    fn test_set_cookie_value_absent() {
        let headers = json!({"content-length": "12"});
        assert_eq!(set_cookie_value(&headers), None);
        assert_eq!(set_cookie_value(&json!(null)), None);
    }
}
