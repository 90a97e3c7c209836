//! Reverse-proxy sub-path support.
//!
//! When a fronting proxy mounts the app under a URL prefix, it is expected
//! to send the prefix in `X-Script-Name` (the same convention the usual
//! nginx `proxy_set_header` snippet uses). Redirect locations and page
//! links carry the prefix so the browser never escapes the mount.

use actix_web::HttpRequest;

const SCRIPT_NAME_HEADER: &str = "X-Script-Name";

/// The mount prefix announced by the proxy, without a trailing slash.
/// Empty when the app is served at the root.
pub fn script_name(req: &HttpRequest) -> String {
    req.headers()
        .get(SCRIPT_NAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|prefix| prefix.trim_end_matches('/').to_owned())
        .unwrap_or_default()
}
