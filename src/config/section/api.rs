//! `[api]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [api]
//! base_url = "https://example.com/api/dh"   # Content API root (required)
//! timeout_secs = 30                          # Per-request timeout (optional)
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::fetch::{BaseUrlError, parse_base_url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Content API settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the content API; entity paths are appended to it.
    pub base_url: Option<String>,

    /// Request timeout in seconds. No timeout when unset.
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub const BASE_URL: FieldPath = FieldPath::new("api.base_url");
    pub const TIMEOUT_SECS: FieldPath = FieldPath::new("api.timeout_secs");

    /// The validated base URL.
    pub fn base_url(&self) -> Result<Url, BaseUrlError> {
        parse_base_url(self.base_url.as_deref().unwrap_or_default())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// `required`: the command talks to the API.
    pub fn validate(&self, required: bool, diag: &mut ConfigDiagnostics) {
        match (&self.base_url, required) {
            (None, true) => diag.error_with_hint(
                Self::BASE_URL,
                "is required",
                "set it in daggerdex.toml or pass --base-url",
            ),
            (None, false) => {}
            (Some(_), _) => {
                if let Err(e) = self.base_url() {
                    diag.error_with_hint(
                        Self::BASE_URL,
                        e.to_string(),
                        "use an absolute URL like https://example.com/api/dh",
                    );
                }
            }
        }

        if self.timeout_secs == Some(0) {
            diag.error(Self::TIMEOUT_SECS, "must be greater than 0");
        }
    }
}
