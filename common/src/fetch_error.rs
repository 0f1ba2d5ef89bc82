//! Failures of a catalog fetch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum FetchError {
    /// The catalog endpoint is not configured. Nothing can be fetched until
    /// the deployment is fixed.
    #[error("Сервис каталога не настроен: {0}")]
    Configuration(String),
    /// The request failed or the service answered with a non-2xx status.
    /// `message` is shown to the user verbatim.
    #[error("{message}")]
    TransientNetwork { status: Option<u16>, message: String },
}

impl FetchError {
    pub fn transient(message: impl Into<String>) -> Self {
        FetchError::TransientNetwork { status: None, message: message.into() }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, FetchError::Configuration(_))
    }
}
