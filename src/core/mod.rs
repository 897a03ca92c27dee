//! Core types - pure abstractions shared across the codebase.

mod record;
mod route;
pub mod slug;
mod state;
mod tier;

pub use record::{Entity, EntityRecord, Validated, validate_records};
pub use route::RoutePath;
pub use slug::SlugStyle;
pub use state::{is_shutdown, register_server, setup_shutdown_handler};
pub use tier::{InvalidTier, Tier};

#[cfg(test)]
pub(crate) use record::entity;
