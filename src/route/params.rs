//! Static route parameters: which detail pages a build pre-renders.

use crate::core::{Entity, RoutePath, Validated};
use crate::entity::EntityProfile;
use crate::fetch::Collection;
use serde::Serialize;

/// Path parameters of one detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteParams {
    /// Present for tier-partitioned types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    /// Name segment under the type's slug style.
    pub entity: String,
}

impl RouteParams {
    pub fn for_entity(profile: &EntityProfile, entity: &Entity) -> Self {
        let tier = if profile.spec.tiered {
            entity.tier().map(|tier| tier.to_string())
        } else {
            None
        };
        Self {
            tier,
            entity: profile.slug.segment(entity.name()).into_owned(),
        }
    }

    /// `/<type>[/<tier>]/<entity>`
    pub fn path(&self, profile: &EntityProfile) -> RoutePath {
        match &self.tier {
            Some(tier) => RoutePath::from_segments([profile.spec.endpoint, tier.as_str(), self.entity.as_str()]),
            None => RoutePath::from_segments([profile.spec.endpoint, self.entity.as_str()]),
        }
    }
}

/// Parameters for a type plus the number of records left out.
#[derive(Debug, Default)]
pub struct ParamOutcome {
    pub params: Vec<RouteParams>,
    pub skipped: usize,
}

/// Parameters for every valid entity of an already validated collection.
pub fn params_for(profile: &EntityProfile, validated: &Validated) -> ParamOutcome {
    ParamOutcome {
        params: validated
            .entities
            .iter()
            .map(|entity| RouteParams::for_entity(profile, entity))
            .collect(),
        skipped: validated.skipped.len(),
    }
}

/// Validate a collection and derive its route parameters.
///
/// Invalid records are logged and counted; an empty or wholly invalid
/// collection yields no parameters.
pub fn generate_params(profile: &EntityProfile, collection: &Collection) -> ParamOutcome {
    params_for(profile, &collection.validate())
}
