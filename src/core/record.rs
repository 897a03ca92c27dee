//! Entity records: raw upstream items and their validated form.

use super::Tier;
use serde::Serialize;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// One item of an upstream list, kept exactly as received.
///
/// A bare string item (the domain list is an array of names) is normalized
/// into `{"name": <string>}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntityRecord(Value);

/// Why a record can't be exposed to routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    NotAnObject,
    MissingName,
    MissingTier,
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotAnObject => "not an object",
            Self::MissingName => "missing name",
            Self::MissingTier => "missing tier",
        })
    }
}

impl EntityRecord {
    pub fn from_item(item: Value) -> Self {
        match item {
            Value::String(name) => {
                let mut map = Map::new();
                map.insert("name".into(), Value::String(name));
                Self(Value::Object(map))
            }
            other => Self(other),
        }
    }

    pub const fn raw(&self) -> &Value {
        &self.0
    }

    /// The record's `name` when it is a non-blank string.
    pub fn name(&self) -> Option<&str> {
        self.0
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
    }

    pub fn tier(&self) -> Option<Tier> {
        self.0.get("tier").and_then(Tier::from_json)
    }

    /// Check identity fields; `tiered` types additionally need a tier.
    pub fn validate(&self, tiered: bool) -> Result<Entity, Malformed> {
        let Value::Object(fields) = &self.0 else {
            return Err(Malformed::NotAnObject);
        };
        let name = self.name().ok_or(Malformed::MissingName)?;
        let tier = self.tier();
        if tiered && tier.is_none() {
            return Err(Malformed::MissingTier);
        }
        Ok(Entity {
            name: name.to_string(),
            folded: name.to_lowercase(),
            tier,
            body: serde_json::to_string(fields).unwrap_or_default().into(),
            fields: Arc::new(fields.clone()),
        })
    }
}

impl From<Value> for EntityRecord {
    fn from(value: Value) -> Self {
        Self::from_item(value)
    }
}

/// A record that passed validation: guaranteed non-empty name, and a tier
/// whenever its type is tiered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    name: String,
    #[serde(skip)]
    folded: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<Tier>,
    /// Serialized fields; last tie-breaker of `display_cmp`.
    #[serde(skip)]
    body: Arc<str>,
    #[serde(skip)]
    fields: Arc<Map<String, Value>>,
}

impl Entity {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn tier(&self) -> Option<Tier> {
        self.tier
    }

    /// All upstream fields, in upstream order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String field, ignoring blanks.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.field(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Total display order: case-insensitive name, then exact name, then the
    /// record body so equal names still sort deterministically.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        self.folded
            .cmp(&other.folded)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.body.cmp(&other.body))
    }
}

/// Result of validating a list of records.
#[derive(Debug, Default)]
pub struct Validated {
    pub entities: Vec<Entity>,
    pub skipped: Vec<Skipped>,
    /// Warnings logged for `skipped`, one per record.
    pub warnings: usize,
}

/// A record dropped by validation.
#[derive(Debug, Clone)]
pub struct Skipped {
    /// Position in the source collection.
    pub index: usize,
    pub reason: Malformed,
    pub record: EntityRecord,
}

/// Validate every record, keeping collection order.
pub fn validate_records(records: &[EntityRecord], tiered: bool) -> Validated {
    let mut out = Validated::default();
    for (index, record) in records.iter().enumerate() {
        match record.validate(tiered) {
            Ok(entity) => out.entities.push(entity),
            Err(reason) => out.skipped.push(Skipped {
                index,
                reason,
                record: record.clone(),
            }),
        }
    }
    out
}

#[cfg(test)]
pub(crate) fn entity(name: &str, tier: Option<u8>) -> Entity {
    let mut value = serde_json::json!({ "name": name });
    if let Some(tier) = tier {
        value["tier"] = tier.into();
    }
    EntityRecord::from_item(value)
        .validate(tier.is_some())
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_item_becomes_named_record() {
        let record = EntityRecord::from_item(json!("Arcana"));
        assert_eq!(record.raw(), &json!({ "name": "Arcana" }));
        assert_eq!(record.name(), Some("Arcana"));
    }

    #[test]
    fn test_validate_requires_name() {
        for raw in [json!({ "tier": 1 }), json!({ "name": "" }), json!({ "name": "  " }), json!({ "name": 3 })] {
            let record = EntityRecord::from_item(raw);
            assert_eq!(record.validate(false), Err(Malformed::MissingName));
        }
        let record = EntityRecord::from_item(json!(null));
        assert_eq!(record.validate(false), Err(Malformed::NotAnObject));
    }

    #[test]
    fn test_validate_requires_tier_for_tiered() {
        let record = EntityRecord::from_item(json!({ "name": "Bear" }));
        assert_eq!(record.validate(true), Err(Malformed::MissingTier));
        assert!(record.validate(false).is_ok());

        let out_of_range = EntityRecord::from_item(json!({ "name": "Bear", "tier": 6 }));
        assert_eq!(out_of_range.validate(true), Err(Malformed::MissingTier));

        let stringly = EntityRecord::from_item(json!({ "name": "Bear", "tier": "2" }));
        assert_eq!(stringly.validate(true).unwrap().tier().map(Tier::get), Some(2));
    }

    #[test]
    fn test_entity_keeps_fields_in_order() {
        let record = EntityRecord::from_item(json!({ "name": "Bear", "tier": 1, "hp": 5, "atk": "+2" }));
        let entity = record.validate(true).unwrap();
        let keys: Vec<_> = entity.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "tier", "hp", "atk"]);
        assert_eq!(entity.text("atk"), Some("+2"));
    }

    #[test]
    fn test_validate_records_counts_skipped() {
        let records: Vec<_> = [
            json!({ "name": "Acid Burrower", "tier": 1 }),
            json!({ "tier": 1 }),
            json!({ "name": "Bridge Troll" }),
            json!({ "name": "Cave Ogre", "tier": 2 }),
        ]
        .into_iter()
        .map(EntityRecord::from_item)
        .collect();

        let validated = validate_records(&records, true);
        assert_eq!(validated.entities.len(), 2);
        assert_eq!(validated.skipped.len(), 2);
        assert_eq!(validated.skipped[0].index, 1);
        assert_eq!(validated.skipped[0].reason, Malformed::MissingName);
        assert_eq!(validated.skipped[1].reason, Malformed::MissingTier);
    }

    #[test]
    fn test_display_cmp_case_insensitive() {
        let a = entity("apple", None);
        let b = entity("Banana", None);
        assert_eq!(a.display_cmp(&b), Ordering::Less);
        assert_eq!(b.display_cmp(&a), Ordering::Greater);
        assert_eq!(a.display_cmp(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_display_cmp_same_name_falls_back_to_body() {
        let first = EntityRecord::from_item(json!({ "name": "Imp", "hp": 3 }))
            .validate(false)
            .unwrap();
        let second = EntityRecord::from_item(json!({ "name": "Imp", "hp": 5 }))
            .validate(false)
            .unwrap();
        assert_eq!(first.display_cmp(&second), Ordering::Less);
        assert_eq!(second.display_cmp(&first), Ordering::Greater);
        // case folding decides before the exact name
        let upper = entity("IMP", None);
        let lower = entity("imp", None);
        assert_eq!(upper.display_cmp(&lower), Ordering::Less);
        assert_eq!(entity("Imp", None).display_cmp(&entity("imps", None)), Ordering::Less);
    }
}
