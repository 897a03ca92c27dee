//! Common utilities shared across CLI commands.

use crate::config::SiteConfig;
use crate::fetch::{CollectionFetcher, HttpTransport};
use anyhow::{Context, Result};
use serde::Serialize;
use tokio::runtime::Runtime;

/// Multi-thread runtime for the fetch phase.
pub fn runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")
}

/// Fetcher over HTTP against the configured base URL.
pub fn http_fetcher(config: &SiteConfig) -> Result<CollectionFetcher<HttpTransport>> {
    let base = config.api.base_url().context("Invalid api.base_url")?;
    let transport =
        HttpTransport::new(config.api.timeout()).context("Failed to create HTTP client")?;
    Ok(CollectionFetcher::new(base, transport))
}

/// Serialize `value` as JSON text.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use serde_json::json;

    #[test]
    fn test_to_json() {
        let value = json!({"tier": "1", "entity": "Acid%20Burrower"});
        assert_eq!(
            to_json(&value, false).unwrap(),
            r#"{"tier":"1","entity":"Acid%20Burrower"}"#
        );
        assert!(to_json(&value, true).unwrap().contains("\n  \"tier\""));
    }

    #[test]
    fn test_http_fetcher_uses_base_url() {
        let config = test_parse_config("");
        let fetcher = http_fetcher(&config).unwrap();
        assert_eq!(fetcher.base().as_str(), "https://example.com/api/dh");
    }

    #[test]
    fn test_http_fetcher_rejects_missing_base_url() {
        assert!(http_fetcher(&SiteConfig::default()).is_err());
    }
}
