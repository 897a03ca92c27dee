//! Fetch error types.

use crate::core::InvalidTier;
use crate::entity::EntityKind;
use thiserror::Error;
use url::Url;

/// Fetch-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error(transparent)]
    InvalidTier(#[from] InvalidTier),

    #[error("`{0}` is not tier-partitioned")]
    Untiered(EntityKind),

    #[error("`{0}` is only reachable below a parent entity")]
    MissingParent(EntityKind),

    #[error("request to {url} failed: {reason}")]
    Transport { url: Url, reason: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: Url, status: u16 },

    #[error("{url} did not return a JSON list: {detail}")]
    Shape { url: Url, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display_names_endpoint() {
        let url = Url::parse("https://api.test/dh/adversaries?tier=3").unwrap();
        let err = FetchError::Status {
            url,
            status: 500,
        };
        assert_eq!(
            err.to_string(),
            "https://api.test/dh/adversaries?tier=3 returned HTTP 500"
        );

        let err = FetchError::from(InvalidTier("9".into()));
        assert!(err.to_string().contains("invalid tier"));
    }
}
