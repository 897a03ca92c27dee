//! `[entities.<type>]` sections: per-type overrides of registry defaults.
//!
//! # Example
//!
//! ```toml
//! [entities.adversaries]
//! policy = "strict"         # strict | lenient
//! empty_tab = "overview"    # overview | notice
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::entity::EntityKind;
use crate::fetch::FetchPolicy;
use crate::route::EmptyTabPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overrides for one entity type. Unset fields keep the registry default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityOverride {
    /// Failure policy for fetching the type's route collection.
    pub policy: Option<FetchPolicy>,

    /// What selecting an empty tier tab does.
    pub empty_tab: Option<EmptyTabPolicy>,
}

const ENTITIES: FieldPath = FieldPath::new("entities");

/// Keys must name a known entity type.
pub fn validate_entities(entries: &BTreeMap<String, EntityOverride>, diag: &mut ConfigDiagnostics) {
    for name in entries.keys() {
        if EntityKind::from_name(name).is_none() {
            diag.error_with_hint(
                ENTITIES,
                format!("unknown entity type `{name}`"),
                "use a name like `adversaries`, `weapons` or `domain-cards`",
            );
        }
    }
}
