//! Entity types and their per-build profiles.

mod kind;
mod profile;

pub use kind::{EntityKind, EntitySpec};
pub use profile::EntityProfile;
