//! Catalog endpoint configuration.
//!
//! `CATALOG_API_URL` is read at runtime on native targets. Browser builds
//! have no process environment, so the value baked in at compile time is used
//! there instead.

use std::time::Duration;

use common::{fetch_error::FetchError, search_const::PAGE_SIZE};
use url::Url;

pub const CATALOG_API_URL_ENV: &str = "CATALOG_API_URL";
pub const CATALOG_PAGE_SIZE_ENV: &str = "CATALOG_PAGE_SIZE";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: Url,
    pub page_size: u64,
    pub timeout: Duration,
}

impl CatalogConfig {
    pub fn new(base_url: Url) -> Self {
        Self { base_url: with_trailing_slash(base_url), page_size: PAGE_SIZE, timeout: DEFAULT_TIMEOUT }
    }

    pub fn from_env() -> Result<Self, FetchError> {
        Self::from_lookup(|key| match key {
            CATALOG_API_URL_ENV => std::env::var(key).ok().or_else(|| option_env!("CATALOG_API_URL").map(str::to_string)),
            _ => std::env::var(key).ok(),
        })
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FetchError> {
        let raw = lookup(CATALOG_API_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| FetchError::Configuration(format!("{CATALOG_API_URL_ENV} is not set")))?;
        let base_url = Url::parse(raw.trim())
            .map_err(|e| FetchError::Configuration(format!("{CATALOG_API_URL_ENV} is not a valid URL: {e}")))?;

        let mut config = Self::new(base_url);
        if let Some(page_size) = lookup(CATALOG_PAGE_SIZE_ENV) {
            match page_size.trim().parse::<u64>() {
                Ok(size) if size > 0 => config.page_size = size,
                _ => tracing::warn!(value = %page_size, "ignoring invalid {CATALOG_PAGE_SIZE_ENV}"),
            }
        }
        Ok(config)
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|e| FetchError::Configuration(format!("cannot build catalog URL for {path}: {e}")))
    }
}

// `Url::join` replaces the last segment unless the base ends with a slash.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| vars.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    }

    #[test]
    fn missing_url_is_a_configuration_error() {
        let error = CatalogConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(error.is_fatal());
        let blank = CatalogConfig::from_lookup(lookup(&[(CATALOG_API_URL_ENV, "  ")])).unwrap_err();
        assert!(blank.is_fatal());
    }

    #[test]
    fn invalid_url_is_a_configuration_error() {
        let error = CatalogConfig::from_lookup(lookup(&[(CATALOG_API_URL_ENV, "not a url")])).unwrap_err();
        assert!(matches!(error, FetchError::Configuration(message) if message.contains("not a valid URL")));
    }

    #[test]
    fn endpoints_are_joined_below_the_base_path() {
        let config = CatalogConfig::from_lookup(lookup(&[(CATALOG_API_URL_ENV, "https://lots.example/backend")]))
            .expect("config");
        assert_eq!(config.endpoint("api/lots/list").expect("url").as_str(), "https://lots.example/backend/api/lots/list");
        assert_eq!(config.page_size, PAGE_SIZE);
    }

    #[test]
    fn page_size_override() {
        let vars = [(CATALOG_API_URL_ENV, "http://localhost:5000"), (CATALOG_PAGE_SIZE_ENV, "50")];
        assert_eq!(CatalogConfig::from_lookup(lookup(&vars)).expect("config").page_size, 50);
        let vars = [(CATALOG_API_URL_ENV, "http://localhost:5000"), (CATALOG_PAGE_SIZE_ENV, "0")];
        assert_eq!(CatalogConfig::from_lookup(lookup(&vars)).expect("config").page_size, PAGE_SIZE);
    }
}
