//! Configuration section definitions.
//!
//! Each module corresponds to a section in `daggerdex.toml`:
//!
//! | Module     | TOML Section   | Purpose                                 |
//! |------------|----------------|-----------------------------------------|
//! | `api`      | `[api]`        | Content API location and timeout        |
//! | `build`    | `[build]`      | Output directory, sitemap, slug compat  |
//! | `entities` | `[entities.*]` | Per-type policy overrides               |
//! | `serve`    | `[serve]`      | Local preview server                    |
//! | `site`     | `[site]`       | Site title and public URL               |

mod api;
mod build;
mod entities;
mod serve;
mod site;

pub use api::ApiConfig;
pub use build::BuildSectionConfig;
pub use entities::{EntityOverride, validate_entities};
pub use serve::ServeConfig;
pub use site::SiteSectionConfig;
