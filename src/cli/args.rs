//! Command-line interface definitions.

use crate::entity::EntityKind;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Daggerheart reference site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content API base URL, e.g. https://example.com/api/dh
    #[arg(short = 'B', long = "base-url", global = true, value_hint = clap::ValueHint::Url)]
    pub base_url: Option<String>,

    /// Config file name, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = "daggerdex.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fetch every collection and build the site
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Serve the built output directory
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the route parameters of every page as JSON
    #[command(visible_alias = "r")]
    Routes {
        #[command(flatten)]
        args: RoutesArgs,
    },

    /// Resolve one entity from its route and print it as JSON
    Show {
        #[command(flatten)]
        args: ShowArgs,
    },
}

/// Build command arguments
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(short, long)]
    pub clean: bool,

    /// Enable sitemap generation
    #[arg(short = 'S', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Override the public site URL (used for sitemap.xml)
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,
}

/// Routes command arguments
#[derive(clap::Args, Debug, Clone)]
pub struct RoutesArgs {
    /// Only this entity type (e.g. adversaries, weapons)
    #[arg(short, long, value_parser = parse_kind)]
    pub kind: Option<EntityKind>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

/// Show command arguments
#[derive(clap::Args, Debug, Clone)]
pub struct ShowArgs {
    /// Entity type (e.g. adversaries, weapons)
    #[arg(value_parser = parse_kind)]
    pub kind: EntityKind,

    /// Entity slug as it appears in the route, encoded or not
    pub slug: String,

    /// Tier segment for tiered types
    #[arg(short, long)]
    pub tier: Option<String>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

fn parse_kind(name: &str) -> Result<EntityKind, String> {
    EntityKind::from_name(name)
        .filter(|kind| EntityKind::ROUTED.contains(kind))
        .ok_or_else(|| {
            let known: Vec<&str> = EntityKind::ROUTED.iter().map(|kind| kind.name()).collect();
            format!("unknown entity type `{name}` (expected one of: {})", known.join(", "))
        })
}

impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }

    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }

    /// Commands that talk to the content API.
    pub const fn needs_api(&self) -> bool {
        !self.is_serve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("daggerdex").chain(args.iter().copied()))
    }

    #[test]
    fn test_show_arguments() {
        let cli = cli(&["show", "adversaries", "Acid%20Burrower", "--tier", "1"]).unwrap();
        assert!(cli.needs_api());
        let Commands::Show { args } = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.kind, EntityKind::Adversaries);
        assert_eq!(args.slug, "Acid%20Burrower");
        assert_eq!(args.tier.as_deref(), Some("1"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = cli(&["routes", "--kind", "spells"]).unwrap_err();
        assert!(err.to_string().contains("unknown entity type"));
        // only reachable below a domain
        assert!(cli(&["show", "domain-cards", "Rune%20Ward"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = cli(&["build", "--base-url", "https://api.test", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.is_build());
        assert_eq!(cli.base_url.as_deref(), Some("https://api.test"));
    }

    #[test]
    fn test_serve_does_not_need_api() {
        assert!(!cli(&["serve"]).unwrap().needs_api());
    }
}
