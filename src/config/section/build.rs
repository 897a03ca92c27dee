//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "public"                          # Output directory (relative to site root)
//! sitemap = true                             # Write sitemap.xml when [site].url is set
//! default_campaign_frame = "The Witherwild"  # Target of the /campaign-frames landing
//!
//! [build.slug]
//! compat = false                             # Raw slugs for the legacy routes
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Build output directory.
    pub output: PathBuf,

    /// Clean output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,

    /// Generate `sitemap.xml` (needs `site.url`).
    pub sitemap: bool,

    /// Campaign frame the `/campaign-frames` landing redirects to.
    pub default_campaign_frame: String,

    /// URL slug settings.
    pub slug: SlugConfig,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "public".into(),
            clean: false,
            sitemap: true,
            default_campaign_frame: "The Witherwild".into(),
            slug: SlugConfig::default(),
        }
    }
}

/// `[build.slug]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugConfig {
    /// Use raw (unencoded) names for ancestries, armors, environments and
    /// consumables, matching their legacy URLs.
    pub compat: bool,
}

impl BuildSectionConfig {
    pub const OUTPUT: FieldPath = FieldPath::new("build.output");
    pub const DEFAULT_CAMPAIGN_FRAME: FieldPath = FieldPath::new("build.default_campaign_frame");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.output.as_os_str().is_empty() {
            diag.error(Self::OUTPUT, "must not be empty");
        }
        if self.default_campaign_frame.trim().is_empty() {
            diag.error(Self::DEFAULT_CAMPAIGN_FRAME, "must not be empty");
        }
    }
}
