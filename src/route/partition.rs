//! Group entities by a discrete key for tabs and tier pages.

use crate::core::{Entity, Tier};
use std::collections::BTreeMap;

/// Entities grouped by key. Keys iterate ascending; each group is in
/// display order, so the layout never depends on upstream order.
#[derive(Debug, Clone)]
pub struct Partitions<K> {
    groups: BTreeMap<K, Vec<Entity>>,
}

impl<K: Ord> Partitions<K> {
    /// Group by `key`; entities without a key are left out.
    pub fn by<F>(entities: &[Entity], key: F) -> Self
    where
        F: Fn(&Entity) -> Option<K>,
    {
        let mut groups: BTreeMap<K, Vec<Entity>> = BTreeMap::new();
        for entity in entities {
            if let Some(k) = key(entity) {
                groups.entry(k).or_default().push(entity.clone());
            }
        }
        for group in groups.values_mut() {
            group.sort_by(Entity::display_cmp);
        }
        Self { groups }
    }

    /// Partitions in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[Entity])> {
        self.groups.iter().map(|(k, group)| (k, group.as_slice()))
    }

    /// Entities under `key`; empty when the key was never observed.
    pub fn get(&self, key: &K) -> &[Entity] {
        self.groups.get(key).map_or(&[][..], Vec::as_slice)
    }

    /// First tab of a partition.
    pub fn first_in(&self, key: &K) -> Option<&Entity> {
        self.get(key).first()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Tier partitions of a tiered type.
pub fn by_tier(entities: &[Entity]) -> Partitions<Tier> {
    Partitions::by(entities, Entity::tier)
}
