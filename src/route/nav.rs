//! Cross-navigation between tabs.
//!
//! A page's tabs are partitions (tiers, levels) and the entities inside the
//! selected one. Selecting a tab is an intent; applying it to the current
//! state yields where to go. The generator renders each tab's link from the
//! outcome, so no client router is involved.

use super::{Partitions, RouteParams};
use crate::core::{Entity, RoutePath, Tier};
use crate::entity::EntityProfile;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// What selecting an empty partition does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyTabPolicy {
    /// Go to the partition's overview route.
    Overview,
    /// Stay on the current entity and show a "no entries" notice.
    Notice,
}

/// Route builder for one tabbed view.
pub trait TabRoutes<K> {
    /// Slug of `entity` as it appears in tab lists.
    fn slug(&self, entity: &Entity) -> String;
    fn entity_route(&self, entity: &Entity) -> RoutePath;
    fn overview_route(&self, key: &K) -> RoutePath;
}

impl TabRoutes<Tier> for EntityProfile {
    fn slug(&self, entity: &Entity) -> String {
        self.slug.segment(entity.name()).into_owned()
    }

    fn entity_route(&self, entity: &Entity) -> RoutePath {
        RouteParams::for_entity(self, entity).path(self)
    }

    fn overview_route(&self, key: &Tier) -> RoutePath {
        if self.spec.tier_index {
            self.tier_route(*key)
        } else {
            self.landing_route()
        }
    }
}

/// Tab selection events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavIntent<K> {
    SelectPartition(K),
    SelectEntity(String),
}

/// Result of applying an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    Navigate(RoutePath),
    Stay { notice: String },
    Ignored,
}

/// Selected partition and displayed entity of a tabbed page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState<K> {
    pub selected: K,
    pub current: String,
}

impl<K: Ord + Clone + Display> NavState<K> {
    pub fn new(selected: K, current: impl Into<String>) -> Self {
        Self {
            selected,
            current: current.into(),
        }
    }

    /// Apply an intent, updating the state and returning the target.
    pub fn apply<R>(
        &mut self,
        intent: NavIntent<K>,
        partitions: &Partitions<K>,
        routes: &R,
        policy: EmptyTabPolicy,
    ) -> NavOutcome
    where
        R: TabRoutes<K>,
    {
        match intent {
            NavIntent::SelectPartition(key) => match partitions.first_in(&key) {
                Some(first) => {
                    self.current = routes.slug(first);
                    let route = routes.entity_route(first);
                    self.selected = key;
                    NavOutcome::Navigate(route)
                }
                None => {
                    let outcome = match policy {
                        EmptyTabPolicy::Overview => NavOutcome::Navigate(routes.overview_route(&key)),
                        EmptyTabPolicy::Notice => NavOutcome::Stay {
                            notice: format!("No entries in {key}."),
                        },
                    };
                    self.selected = key;
                    outcome
                }
            },
            NavIntent::SelectEntity(slug) => {
                let target = partitions
                    .get(&self.selected)
                    .iter()
                    .find(|entity| routes.slug(entity) == slug);
                match target {
                    Some(entity) => {
                        let route = routes.entity_route(entity);
                        self.current = slug;
                        NavOutcome::Navigate(route)
                    }
                    None => NavOutcome::Ignored,
                }
            }
        }
    }

    /// Outcome of an intent without changing this state.
    pub fn preview<R>(
        &self,
        intent: NavIntent<K>,
        partitions: &Partitions<K>,
        routes: &R,
        policy: EmptyTabPolicy,
    ) -> NavOutcome
    where
        R: TabRoutes<K>,
    {
        self.clone().apply(intent, partitions, routes, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity;
    use crate::entity::EntityKind;
    use crate::route::by_tier;

    fn tier(n: u8) -> Tier {
        Tier::try_from(n).unwrap()
    }

    fn setup(kind: EntityKind) -> (EntityProfile, Partitions<Tier>) {
        let entities = vec![
            entity("Bear", Some(1)),
            entity("Acid Burrower", Some(1)),
            entity("Zombie Pack", Some(2)),
        ];
        (EntityProfile::new(kind), by_tier(&entities))
    }

    #[test]
    fn test_select_partition_goes_to_first_entity() {
        let (profile, parts) = setup(EntityKind::Adversaries);
        let mut state = NavState::new(tier(2), "Zombie%20Pack");

        let outcome = state.apply(NavIntent::SelectPartition(tier(1)), &parts, &profile, profile.empty_tab);
        assert_eq!(
            outcome,
            NavOutcome::Navigate(RoutePath::from_segments(["adversaries", "1", "Acid%20Burrower"]))
        );
        assert_eq!(state, NavState::new(tier(1), "Acid%20Burrower"));
    }

    #[test]
    fn test_empty_partition_notice() {
        let (profile, parts) = setup(EntityKind::Adversaries);
        assert_eq!(profile.empty_tab, EmptyTabPolicy::Notice);
        let mut state = NavState::new(tier(1), "Bear");

        let outcome = state.apply(NavIntent::SelectPartition(tier(4)), &parts, &profile, profile.empty_tab);
        assert_eq!(
            outcome,
            NavOutcome::Stay {
                notice: "No entries in 4.".into()
            }
        );
        assert_eq!(state.current, "Bear");
        assert_eq!(state.selected, tier(4));
    }

    #[test]
    fn test_empty_partition_overview() {
        let (profile, parts) = setup(EntityKind::Weapons);
        assert_eq!(profile.empty_tab, EmptyTabPolicy::Overview);
        let state = NavState::new(tier(1), "Bear");

        let outcome = state.preview(NavIntent::SelectPartition(tier(3)), &parts, &profile, profile.empty_tab);
        assert_eq!(outcome, NavOutcome::Navigate(RoutePath::from_segments(["weapons", "3"])));

        // Without a tier index the overview is the landing page
        let outcome = state.preview(
            NavIntent::SelectPartition(tier(3)),
            &parts,
            &EntityProfile::new(EntityKind::Adversaries),
            EmptyTabPolicy::Overview,
        );
        assert_eq!(outcome, NavOutcome::Navigate(RoutePath::from_segments(["adversaries"])));
        assert_eq!(state.selected, tier(1));
    }

    #[test]
    fn test_select_entity_within_partition() {
        let (profile, parts) = setup(EntityKind::Adversaries);
        let mut state = NavState::new(tier(1), "Acid%20Burrower");

        let outcome = state.apply(NavIntent::SelectEntity("Bear".into()), &parts, &profile, profile.empty_tab);
        assert_eq!(
            outcome,
            NavOutcome::Navigate(RoutePath::from_segments(["adversaries", "1", "Bear"]))
        );
        assert_eq!(state.current, "Bear");

        let outcome = state.apply(
            NavIntent::SelectEntity("Zombie%20Pack".into()),
            &parts,
            &profile,
            profile.empty_tab,
        );
        assert_eq!(outcome, NavOutcome::Ignored);
        assert_eq!(state.current, "Bear");
    }
}
