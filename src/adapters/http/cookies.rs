//! Session cookies.
//!
//! Login and refresh set `accessToken` and `refreshToken` as HttpOnly
//! cookies; logout expires both. The auth middleware reads `accessToken`
//! when no Bearer header is present.

use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue};

use crate::ports::TokenPair;

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Value of the cookie `name` from the request's `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Cookie attributes shared by the session cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
}

impl CookiePolicy {
    fn cookie(&self, name: &str, value: &str, max_age: u64) -> Option<HeaderValue> {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            name, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).ok()
    }

    /// Appends `Set-Cookie` headers carrying both tokens.
    pub fn set_session(&self, headers: &mut HeaderMap, tokens: &TokenPair) {
        let cookies = [
            self.cookie(ACCESS_COOKIE, &tokens.access_token, self.access_ttl_secs),
            self.cookie(REFRESH_COOKIE, &tokens.refresh_token, self.refresh_ttl_secs),
        ];
        for cookie in cookies.into_iter().flatten() {
            headers.append(SET_COOKIE, cookie);
        }
    }

    /// Appends `Set-Cookie` headers expiring both tokens.
    pub fn clear_session(&self, headers: &mut HeaderMap) {
        for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
            if let Some(cookie) = self.cookie(name, "", 0) {
                headers.append(SET_COOKIE, cookie);
            }
        }
    }
}
