//! Per-build entity profiles: registry defaults merged with config overrides.

use super::{EntityKind, EntitySpec};
use crate::config::SiteConfig;
use crate::core::{RoutePath, SlugStyle, Tier};
use crate::fetch::FetchPolicy;
use crate::route::EmptyTabPolicy;

/// Effective settings for one entity type in this build.
#[derive(Debug, Clone, Copy)]
pub struct EntityProfile {
    pub kind: EntityKind,
    pub spec: EntitySpec,
    pub slug: SlugStyle,
    pub policy: FetchPolicy,
    pub empty_tab: EmptyTabPolicy,
}

impl EntityProfile {
    /// Registry defaults: percent-encoded slugs and the declared policies.
    pub const fn new(kind: EntityKind) -> Self {
        let spec = kind.spec();
        Self {
            kind,
            spec,
            slug: SlugStyle::Encoded,
            policy: spec.route_policy,
            empty_tab: spec.empty_tab,
        }
    }

    pub fn from_config(kind: EntityKind, config: &SiteConfig) -> Self {
        let mut profile = Self::new(kind);
        if config.build.slug.compat {
            profile.slug = profile.spec.legacy_slug;
        }
        if let Some(entry) = config.entities.get(kind.name()) {
            if let Some(policy) = entry.policy {
                profile.policy = policy;
            }
            if let Some(empty_tab) = entry.empty_tab {
                profile.empty_tab = empty_tab;
            }
        }
        profile
    }

    /// `/<type>`
    pub fn landing_route(&self) -> RoutePath {
        RoutePath::from_segments([self.spec.endpoint])
    }

    /// `/<type>/<tier>`
    pub fn tier_route(&self, tier: Tier) -> RoutePath {
        RoutePath::from_segments([self.spec.endpoint, tier.to_string().as_str()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults_encode_everything() {
        let config = test_parse_config("");
        for kind in EntityKind::ROUTED {
            assert_eq!(EntityProfile::from_config(kind, &config).slug, SlugStyle::Encoded);
        }
    }

    #[test]
    fn test_compat_uses_legacy_styles() {
        let config = test_parse_config("[build.slug]\ncompat = true");
        let ancestries = EntityProfile::from_config(EntityKind::Ancestries, &config);
        let classes = EntityProfile::from_config(EntityKind::Classes, &config);
        assert_eq!(ancestries.slug, SlugStyle::Raw);
        assert_eq!(classes.slug, SlugStyle::Encoded);
    }

    #[test]
    fn test_entity_overrides() {
        let config = test_parse_config(
            "[entities.adversaries]\npolicy = \"strict\"\nempty_tab = \"overview\"",
        );
        let profile = EntityProfile::from_config(EntityKind::Adversaries, &config);
        assert_eq!(profile.policy, FetchPolicy::Strict);
        assert_eq!(profile.empty_tab, EmptyTabPolicy::Overview);

        let untouched = EntityProfile::from_config(EntityKind::Weapons, &config);
        assert_eq!(untouched.policy, FetchPolicy::Lenient);
    }

    #[test]
    fn test_routes() {
        let profile = EntityProfile::new(EntityKind::Weapons);
        assert_eq!(profile.landing_route().as_str(), "/weapons");
        assert_eq!(profile.tier_route(Tier::ALL[1]).as_str(), "/weapons/2");
    }
}
