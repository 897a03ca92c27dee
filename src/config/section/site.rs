//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Daggerheart Reference"
//! url = "https://example.com"     # Public URL, enables sitemap.xml
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Site metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Title shown in page headers.
    pub title: String,

    /// Public URL the site is deployed at.
    pub url: Option<String>,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: "Daggerheart Reference".into(),
            url: None,
        }
    }
}

impl SiteSectionConfig {
    pub const TITLE: FieldPath = FieldPath::new("site.title");
    pub const URL: FieldPath = FieldPath::new("site.url");

    /// `url` without trailing slashes, for joining with routes.
    pub fn base(&self) -> Option<&str> {
        self.url.as_deref().map(|url| url.trim_end_matches('/'))
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.error(Self::TITLE, "must not be empty");
        }
        if let Some(url) = &self.url {
            match url::Url::parse(url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                _ => diag.error_with_hint(
                    Self::URL,
                    format!("`{url}` is not an absolute http(s) URL"),
                    "e.g. url = \"https://example.com\"",
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_site_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.title, "Daggerheart Reference");
        assert_eq!(config.site.base(), None);
    }

    #[test]
    fn test_site_url_trimmed() {
        let config = test_parse_config("[site]\nurl = \"https://example.com/dex/\"");
        assert_eq!(config.site.base(), Some("https://example.com/dex"));
    }

    #[test]
    fn test_site_validation() {
        let mut diag = ConfigDiagnostics::new();
        SiteSectionConfig {
            title: " ".into(),
            url: Some("example.com".into()),
        }
        .validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }
}
