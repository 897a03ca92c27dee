//! Utility modules.

pub mod html;
pub mod mime;
pub mod plural;
