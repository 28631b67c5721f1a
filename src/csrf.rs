//! Anti-forgery token lookup in the page's cookie string.

use std::fmt;

use crate::error::{FormError, Result};

/// Token required on every state-changing request.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the token out of logs.
impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CsrfToken(..)")
    }
}

/// Find cookie `name` in a `Cookie`-header style string (`a=1; b=2`).
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Read the token from the cookie named `cookie_name`.
pub fn token_from_cookies(cookies: &str, cookie_name: &str) -> Result<CsrfToken> {
    read_cookie(cookies, cookie_name)
        .map(CsrfToken)
        .ok_or_else(|| FormError::MissingCsrfToken(cookie_name.to_string()))
}
