//! Opaque session credential attached to catalog requests.

use reqwest::{RequestBuilder, header};

pub const CATALOG_SESSION_COOKIE_ENV: &str = "CATALOG_SESSION_COOKIE";
pub const CATALOG_BEARER_TOKEN_ENV: &str = "CATALOG_BEARER_TOKEN";

/// Issued by the auth collaborator and forwarded untouched. Its contents are
/// never parsed or logged.
#[derive(Clone, PartialEq, Eq)]
pub enum SessionCredential {
    /// Raw `Cookie` header value, e.g. `session=...`.
    Cookie(String),
    Bearer(String),
}

impl SessionCredential {
    /// Credential handed to native builds through the environment. Browser
    /// builds rely on the cookies the browser attaches instead.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// A cookie takes precedence over a bearer token; blank values count as
    /// absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        present(CATALOG_SESSION_COOKIE_ENV)
            .map(SessionCredential::Cookie)
            .or_else(|| present(CATALOG_BEARER_TOKEN_ENV).map(SessionCredential::Bearer))
    }

    pub(crate) fn attach(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            SessionCredential::Cookie(cookie) => request.header(header::COOKIE, cookie),
            SessionCredential::Bearer(token) => request.bearer_auth(token),
        }
    }
}

impl std::fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionCredential::Cookie(_) => write!(f, "SessionCredential::Cookie(<redacted>)"),
            SessionCredential::Bearer(_) => write!(f, "SessionCredential::Bearer(<redacted>)"),
        }
    }
}
