//! Endpoint descriptors: which upstream URLs make up one collection.

use super::{FetchError, TierFanout};
use crate::core::Tier;
use crate::entity::EntityKind;
use thiserror::Error;
use url::Url;

/// Problems with the configured API base URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BaseUrlError {
    #[error("API base URL is empty")]
    Empty,

    #[error("`{0}` is not a valid URL: {1}")]
    Invalid(String, url::ParseError),

    #[error("`{0}` must be an http or https URL")]
    Scheme(String),
}

/// Validate the API base URL before any request is made.
///
/// Query and fragment are dropped; endpoint paths are appended as segments.
pub fn parse_base_url(raw: &str) -> Result<Url, BaseUrlError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(BaseUrlError::Empty);
    }
    let mut url = Url::parse(raw).map_err(|e| BaseUrlError::Invalid(raw.to_string(), e))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(BaseUrlError::Scheme(raw.to_string()));
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// One collection to fetch: an entity type, optionally scoped to a tier or
/// to a parent entity (`domains/<name>/cards`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionRequest {
    kind: EntityKind,
    tier: Option<Tier>,
    parent: Option<String>,
}

/// A single upstream URL of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub tier: Option<Tier>,
    pub url: Url,
}

impl CollectionRequest {
    /// Every record of `kind`.
    pub const fn all(kind: EntityKind) -> Self {
        Self {
            kind,
            tier: None,
            parent: None,
        }
    }

    /// Records of one tier. Rejects tiers outside the fixed set and
    /// untiered types before anything touches the network.
    pub fn tier(kind: EntityKind, tier: u64) -> Result<Self, FetchError> {
        let tier = Tier::try_from(tier)?;
        if !kind.spec().tiered {
            return Err(FetchError::Untiered(kind));
        }
        Ok(Self {
            kind,
            tier: Some(tier),
            parent: None,
        })
    }

    /// Records listed below a parent entity, e.g. one domain's cards.
    pub fn child(kind: EntityKind, parent: impl Into<String>) -> Self {
        Self {
            kind,
            tier: None,
            parent: Some(parent.into()),
        }
    }

    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    pub const fn tier_scope(&self) -> Option<Tier> {
        self.tier
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Upstream URLs in ascending tier order.
    pub fn targets(&self, base: &Url) -> Result<Vec<Target>, FetchError> {
        let spec = self.kind.spec();
        let mut segments = vec![spec.endpoint];
        if let Some(suffix) = spec.suffix {
            let parent = self.parent.as_deref().ok_or(FetchError::MissingParent(self.kind))?;
            segments.push(parent);
            segments.push(suffix);
        }

        let tiers = match self.tier {
            Some(tier) => vec![tier],
            None => Tier::ALL.to_vec(),
        };

        let targets = match spec.fanout {
            TierFanout::None => vec![Target {
                tier: self.tier,
                url: endpoint_url(base, &segments),
            }],
            TierFanout::Query => tiers
                .into_iter()
                .map(|tier| {
                    let mut url = endpoint_url(base, &segments);
                    url.query_pairs_mut().append_pair("tier", &tier.to_string());
                    Target {
                        tier: Some(tier),
                        url,
                    }
                })
                .collect(),
            TierFanout::Path => tiers
                .into_iter()
                .map(|tier| {
                    let tier_segment = tier.to_string();
                    let mut with_tier = segments.clone();
                    with_tier.push(&tier_segment);
                    Target {
                        tier: Some(tier),
                        url: endpoint_url(base, &with_tier),
                    }
                })
                .collect(),
        };
        Ok(targets)
    }
}

/// Append path segments to the base, percent-encoding each one.
fn endpoint_url(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        parse_base_url("https://example.com/api/dh").unwrap()
    }

    fn urls(request: &CollectionRequest) -> Vec<String> {
        request
            .targets(&base())
            .unwrap()
            .into_iter()
            .map(|t| t.url.to_string())
            .collect()
    }

    #[test]
    fn test_parse_base_url() {
        assert_eq!(parse_base_url("  "), Err(BaseUrlError::Empty));
        assert!(matches!(parse_base_url("not a url"), Err(BaseUrlError::Invalid(..))));
        assert!(matches!(parse_base_url("ftp://host/api"), Err(BaseUrlError::Scheme(_))));
        let url = parse_base_url("https://host/api/dh/?x=1#top").unwrap();
        assert_eq!(url.as_str(), "https://host/api/dh/");
    }

    #[test]
    fn test_single_list() {
        assert_eq!(
            urls(&CollectionRequest::all(EntityKind::Classes)),
            ["https://example.com/api/dh/classes"]
        );
    }

    #[test]
    fn test_trailing_slash_base() {
        let base = parse_base_url("https://example.com/api/dh/").unwrap();
        let targets = CollectionRequest::all(EntityKind::Loot).targets(&base).unwrap();
        assert_eq!(targets[0].url.as_str(), "https://example.com/api/dh/loot");
    }

    #[test]
    fn test_query_fanout_in_tier_order() {
        assert_eq!(
            urls(&CollectionRequest::all(EntityKind::Adversaries)),
            [
                "https://example.com/api/dh/adversaries?tier=1",
                "https://example.com/api/dh/adversaries?tier=2",
                "https://example.com/api/dh/adversaries?tier=3",
                "https://example.com/api/dh/adversaries?tier=4",
            ]
        );
    }

    #[test]
    fn test_path_fanout_single_tier() {
        let request = CollectionRequest::tier(EntityKind::Weapons, 3).unwrap();
        assert_eq!(urls(&request), ["https://example.com/api/dh/weapons/3"]);
    }

    #[test]
    fn test_invalid_tier_rejected() {
        assert!(matches!(
            CollectionRequest::tier(EntityKind::Weapons, 5),
            Err(FetchError::InvalidTier(_))
        ));
        assert!(matches!(
            CollectionRequest::tier(EntityKind::Weapons, 0),
            Err(FetchError::InvalidTier(_))
        ));
        assert_eq!(
            CollectionRequest::tier(EntityKind::Classes, 1),
            Err(FetchError::Untiered(EntityKind::Classes))
        );
    }

    #[test]
    fn test_child_request_encodes_parent() {
        let request = CollectionRequest::child(EntityKind::DomainCards, "Blade & Bone");
        assert_eq!(
            urls(&request),
            ["https://example.com/api/dh/domains/Blade%20&%20Bone/cards"]
        );
        assert_eq!(
            CollectionRequest::all(EntityKind::DomainCards).targets(&base()),
            Err(FetchError::MissingParent(EntityKind::DomainCards))
        );
    }
}
