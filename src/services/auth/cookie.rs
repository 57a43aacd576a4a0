/*
 * Responsibility
 * - Parse the raw `Cookie` header into a name -> value map
 * - Locate the authentication token cookie
 *
 * An absent header or a header with nothing usable is a normal anonymous
 * request, so this module never fails. Malformed pairs are skipped.
 */
use std::collections::HashMap;

use cookie::Cookie;

/// Name of the cookie carrying the platform-issued JWT.
pub const TOKEN_COOKIE: &str = "token";

pub type CookieMap = HashMap<String, String>;

/// Parse a `Cookie` header value. Later duplicates overwrite earlier ones.
pub fn extract_cookies(header: Option<&str>) -> CookieMap {
    let Some(header) = header else {
        return CookieMap::new();
    };

    Cookie::split_parse(header)
        .filter_map(Result::ok)
        .map(|c| (c.name().to_string(), c.value_trimmed().to_string()))
        .collect()
}

/// Token value from the parsed cookies. An empty value counts as absent.
pub fn locate_token(cookies: &CookieMap) -> Option<&str> {
    cookies
        .get(TOKEN_COOKIE)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}
