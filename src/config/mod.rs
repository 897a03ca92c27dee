//! Site configuration management for `daggerdex.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── api        # [api]
//! │   ├── build      # [build] and [build.slug]
//! │   ├── entities   # [entities.<type>]
//! │   ├── serve      # [serve]
//! │   └── site       # [site]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section              | Purpose                                    |
//! |----------------------|--------------------------------------------|
//! | `[api]`              | Content API base URL and timeout           |
//! | `[site]`             | Title and public URL                       |
//! | `[build]`            | Output, sitemap, slug compatibility        |
//! | `[serve]`            | Preview server (interface, port)           |
//! | `[entities.<type>]`  | Per-type fetch policy and empty-tab policy |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    ApiConfig, BuildSectionConfig, EntityOverride, ServeConfig, SiteSectionConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::cli::{Cli, Commands};
use crate::warn;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing daggerdex.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file, empty when running without one
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    #[serde(default)]
    pub serve: ServeConfig,

    /// Per-type overrides keyed by type name (`adversaries`, `domain-cards`, ...)
    #[serde(default)]
    pub entities: BTreeMap<String, EntityOverride>,
}

impl SiteConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file; without one, defaults
    /// plus CLI flags are used and the project root is cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config, &cwd) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.clone());
                config.config_path = path;
                config
            }
            None => Self {
                root: cwd,
                ..Self::default()
            },
        };

        config.apply_cli(cli);
        config.normalize_paths();
        config.validate(cli)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        for field in fields {
            warn!("config"; "unknown field `{}` in {}, ignoring", field, display_path);
        }
    }

    /// Output directory (absolute after loading).
    pub fn output_dir(&self) -> &Path {
        &self.build.output
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply global flags and command-specific options.
    fn apply_cli(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        if let Some(url) = &cli.base_url {
            self.api.base_url = Some(url.clone());
        }
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Commands::Build { build_args } => {
                self.build.clean = build_args.clean;
                if let Some(url) = &build_args.site_url {
                    self.site.url = Some(url.clone());
                }
                Self::update_option(&mut self.build.sitemap, build_args.sitemap.as_ref());
            }
            Commands::Serve { interface, port } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::Routes { .. } | Commands::Show { .. } => {}
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve the output directory against the project root.
    fn normalize_paths(&mut self) {
        if self.build.output.is_relative() {
            self.build.output = self.root.join(&self.build.output);
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration for the current command.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self, cli: &Cli) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.api.validate(cli.needs_api(), &mut diag);
        self.site.validate(&mut diag);
        self.build.validate(&mut diag);
        section::validate_entities(&self.entities, &mut diag);

        if self.build.sitemap && self.site.url.is_none() && cli.is_build() {
            diag.warn(
                SiteSectionConfig::URL,
                "not set, sitemap.xml will not be generated",
            );
        }

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with a minimal `[api]` section.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[api]\nbase_url = \"https://example.com/api/dh\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
