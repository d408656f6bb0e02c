//! Cookie-held sessions. The server keeps no session table: every request is
//! judged purely from the `auth` cookie it carries.
//!
//! The `auth` cookie is an unsigned static marker. Anyone able to set
//! `auth=true` on their own browser is treated as logged in, and the API
//! routes do not check it at all.

use hyper::{header, HeaderMap};

pub const AUTH_COOKIE: &str = "auth";
pub const EMAIL_COOKIE: &str = "user_email";

/// Value of the `auth` cookie for a logged in browser
pub const AUTH_MARKER: &str = "true";

/// Seven days
pub const SESSION_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 7;

struct CookieSpec<'a> {
    name: &'a str,
    value: &'a str,
    max_age: u64,
    http_only: bool,
    secure: bool,
}

impl CookieSpec<'_> {
    fn to_header_value(&self) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            self.name, self.value, self.max_age
        );

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }

        if self.secure {
            cookie.push_str("; Secure");
        }

        cookie
    }
}

/// `Set-Cookie` values issued on a successful login: the script-invisible auth
/// marker and the display-only email.
pub fn login_cookies(email: &str, secure: bool) -> [String; 2] {
    let email = urlencoding::encode(email);

    [
        CookieSpec {
            name: AUTH_COOKIE,
            value: AUTH_MARKER,
            max_age: SESSION_MAX_AGE_SECS,
            http_only: true,
            secure,
        }
        .to_header_value(),
        CookieSpec {
            name: EMAIL_COOKIE,
            value: &email,
            max_age: SESSION_MAX_AGE_SECS,
            http_only: false,
            secure,
        }
        .to_header_value(),
    ]
}

/// `Set-Cookie` values that expire both session cookies.
pub fn logout_cookies(secure: bool) -> [String; 2] {
    [
        CookieSpec {
            name: AUTH_COOKIE,
            value: "",
            max_age: 0,
            http_only: true,
            secure,
        }
        .to_header_value(),
        CookieSpec {
            name: EMAIL_COOKIE,
            value: "",
            max_age: 0,
            http_only: false,
            secure,
        }
        .to_header_value(),
    ]
}

/// First value of the named cookie across all `Cookie` headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

pub fn is_authenticated(headers: &HeaderMap) -> bool {
    cookie_value(headers, AUTH_COOKIE) == Some(AUTH_MARKER)
}
