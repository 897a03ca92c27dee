//! Entity resolver: route parameters back to the record they name.

use super::RouteParams;
use crate::core::{Entity, SlugStyle, Tier};
use crate::entity::EntityProfile;

/// What a detail route identifies: a slug and, for tiered routes, the tier
/// segment exactly as it appeared in the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupKey<'a> {
    pub slug: &'a str,
    pub tier: Option<&'a str>,
}

impl<'a> LookupKey<'a> {
    pub const fn new(slug: &'a str) -> Self {
        Self { slug, tier: None }
    }

    pub const fn with_tier(self, tier: &'a str) -> Self {
        Self {
            tier: Some(tier),
            ..self
        }
    }
}

impl<'a> From<&'a RouteParams> for LookupKey<'a> {
    fn from(params: &'a RouteParams) -> Self {
        Self {
            slug: &params.entity,
            tier: params.tier.as_deref(),
        }
    }
}

/// Finds entities of one type by route key.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    entities: &'a [Entity],
    style: SlugStyle,
}

impl<'a> Resolver<'a> {
    pub const fn new(profile: &EntityProfile, entities: &'a [Entity]) -> Self {
        Self {
            entities,
            style: profile.slug,
        }
    }

    /// First entity, in collection order, matching the key.
    ///
    /// `None` is a normal outcome; a tier segment that is not exactly one
    /// of `1`..`4` matches nothing.
    pub fn resolve(&self, key: LookupKey<'_>) -> Option<&'a Entity> {
        let tier = match key.tier {
            Some(raw) => Some(Tier::from_segment(raw).ok()?),
            None => None,
        };
        self.entities.iter().find(|entity| {
            tier.is_none_or(|tier| entity.tier() == Some(tier))
                && self.style.matches(key.slug, entity.name())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity;
    use crate::entity::EntityKind;

    fn adversaries() -> Vec<Entity> {
        vec![
            entity("Acid Burrower", Some(1)),
            entity("Bridge Troll", Some(2)),
            entity("Bridge Troll", Some(3)),
        ]
    }

    #[test]
    fn test_resolve_encoded_and_decoded_slug() {
        let profile = EntityProfile::new(EntityKind::Adversaries);
        let entities = adversaries();
        let resolver = Resolver::new(&profile, &entities);

        let found = resolver.resolve(LookupKey::new("Acid%20Burrower").with_tier("1"));
        assert_eq!(found.map(Entity::name), Some("Acid Burrower"));

        let found = resolver.resolve(LookupKey::new("Acid Burrower").with_tier("1"));
        assert_eq!(found.map(Entity::name), Some("Acid Burrower"));
    }

    #[test]
    fn test_tier_mismatch_is_not_found() {
        let profile = EntityProfile::new(EntityKind::Adversaries);
        let entities = adversaries();
        let resolver = Resolver::new(&profile, &entities);

        assert!(resolver.resolve(LookupKey::new("Acid%20Burrower").with_tier("2")).is_none());
        assert!(resolver.resolve(LookupKey::new("Acid%20Burrower").with_tier("9")).is_none());
        assert!(resolver.resolve(LookupKey::new("Acid%20Burrower").with_tier("one")).is_none());
        for padded in ["01", "+1", " 1 "] {
            assert!(resolver.resolve(LookupKey::new("Acid%20Burrower").with_tier(padded)).is_none());
        }
        assert!(resolver.resolve(LookupKey::new("Acid%20Burrower").with_tier("1")).is_some());
        assert!(resolver.resolve(LookupKey::new("Nobody")).is_none());
    }

    #[test]
    fn test_duplicates_resolve_to_first() {
        let profile = EntityProfile::new(EntityKind::Adversaries);
        let entities = adversaries();
        let resolver = Resolver::new(&profile, &entities);

        let found = resolver.resolve(LookupKey::new("Bridge%20Troll")).unwrap();
        assert_eq!(found.tier(), Tier::try_from(2u8).ok());
        let found = resolver.resolve(LookupKey::new("Bridge%20Troll").with_tier("3")).unwrap();
        assert_eq!(found.tier(), Tier::try_from(3u8).ok());
    }

    #[test]
    fn test_raw_style() {
        let mut profile = EntityProfile::new(EntityKind::Ancestries);
        profile.slug = SlugStyle::Raw;
        let entities = vec![entity("Faerie Kin", None), entity("100%", None)];
        let resolver = Resolver::new(&profile, &entities);

        assert!(resolver.resolve(LookupKey::new("Faerie Kin")).is_some());
        assert!(resolver.resolve(LookupKey::new("Faerie%20Kin")).is_some());
        assert!(resolver.resolve(LookupKey::new("100%")).is_some());
    }

    #[test]
    fn test_params_round_trip_through_resolver() {
        let profile = EntityProfile::new(EntityKind::Adversaries);
        let entities = adversaries();
        let resolver = Resolver::new(&profile, &entities);
        for entity in &entities[..2] {
            let params = RouteParams::for_entity(&profile, entity);
            assert_eq!(resolver.resolve(LookupKey::from(&params)), Some(entity));
        }
    }
}
