//! One-shot notice cookie.
//!
//! Redirect responses stash a user-visible message here; the next page
//! render consumes it and sends a removal cookie. Display-only, so the
//! value is hex-encoded but not signed.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::Cookie;
use actix_web::HttpRequest;

const FLASH_COOKIE: &str = "wicket_flash";

/// Builds a cookie carrying a notice for the next rendered page.
pub fn flash_cookie(message: &str) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, hex::encode(message.as_bytes()))
        .path("/")
        .http_only(true)
        .finish()
}

/// Builds the removal cookie that consumes a pending notice.
pub fn clear_flash_cookie() -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, String::new())
        .path("/")
        .max_age(CookieDuration::ZERO)
        .finish()
}

/// Reads the pending notice, if any. Undecodable values are dropped.
pub fn pending_flash(req: &HttpRequest) -> Option<String> {
    let cookie = req.cookie(FLASH_COOKIE)?;
    let bytes = hex::decode(cookie.value()).ok()?;
    String::from_utf8(bytes).ok()
}
