//! Static site generation.
//!
//! | Module    | Purpose                                             |
//! |-----------|-----------------------------------------------------|
//! | `pages`   | Fetch one entity type and assemble its pages        |
//! | `html`    | Minimal markup: documents, tabs, lists, fields      |
//! | `write`   | Parallel output writing and `404.html`              |
//! | `sitemap` | `sitemap.xml` from written document routes          |
//!
//! Every routed type is fetched concurrently. A strict fetch failure
//! aborts the whole build; lenient failures only show up as degraded
//! counts in the report.

mod html;
mod pages;
pub mod sitemap;
mod write;

pub use write::{WriteReport, write_site};

use crate::config::SiteConfig;
use crate::core::RoutePath;
use crate::entity::{EntityKind, EntityProfile};
use crate::fetch::{CollectionFetcher, Transport};
use crate::{debug, log};
use anyhow::{Context, Result};
use futures::future::join_all;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Document,
    /// Forwards to another route, kept out of the sitemap.
    Redirect,
}

/// A rendered page at its route.
#[derive(Debug, Clone)]
pub struct Page {
    pub route: RoutePath,
    pub kind: PageKind,
    pub html: String,
}

impl Page {
    pub const fn document(route: RoutePath, html: String) -> Self {
        Self {
            route,
            kind: PageKind::Document,
            html,
        }
    }

    pub const fn redirect(route: RoutePath, html: String) -> Self {
        Self {
            route,
            kind: PageKind::Redirect,
            html,
        }
    }
}

/// Build-wide counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SiteReport {
    pub entities: usize,
    pub skipped: usize,
    pub degraded: usize,
}

/// Every page of the site, ready to be written.
#[derive(Debug, Default)]
pub struct Site {
    pub pages: Vec<Page>,
    pub not_found: String,
    pub report: SiteReport,
}

/// Fetch every routed type and render the whole site.
pub async fn generate<T: Transport>(
    fetcher: &CollectionFetcher<T>,
    config: &SiteConfig,
) -> Result<Site> {
    let profiles: Vec<EntityProfile> = EntityKind::ROUTED
        .into_iter()
        .map(|kind| EntityProfile::from_config(kind, config))
        .collect();
    let results = join_all(
        profiles
            .iter()
            .map(|profile| pages::render_kind(fetcher, config, *profile)),
    )
    .await;

    let mut site = Site::default();
    let mut counts = Vec::with_capacity(profiles.len());
    for (profile, result) in profiles.iter().zip(results) {
        let rendered =
            result.with_context(|| format!("Failed to fetch {}", profile.kind.name()))?;
        debug!("fetch"; "{}: {} entries, {} pages", profile.kind.name(), rendered.entities, rendered.pages.len());

        site.report.entities += rendered.entities;
        site.report.skipped += rendered.skipped;
        site.report.degraded += rendered.degraded;
        counts.push((profile.kind, rendered.entities));
        site.pages.extend(rendered.pages);
    }
    log!("fetch"; "{} entities across {} types", site.report.entities, counts.len());
    debug!("fetch"; "{} complete collections cached", fetcher.cache().len());

    site.pages.push(pages::home(config, &counts));
    site.not_found = pages::not_found(config);
    Ok(site)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::fetch::testing::{FakeTransport, fetcher};
    use serde_json::json;

    /// Every routed endpoint answering with a small list.
    fn full_upstream() -> FakeTransport {
        let mut transport = FakeTransport::default();
        for kind in ["ancestries", "campaign-frames", "classes", "communities", "consumables", "loot"] {
            transport = transport.json(kind, 0, json!([{"name": format!("{kind} one")}]));
        }
        for tier in 1..=4 {
            transport = transport
                .json(&format!("adversaries?tier={tier}"), 0, json!([{"name": "Imp", "tier": tier}]))
                .json(&format!("weapons/{tier}"), 0, json!([]))
                .json(&format!("armors/{tier}"), 0, json!([]));
        }
        transport
            .json("environments", 0, json!([{"name": "Haunted City", "tier": 2}]))
            .json("domains", 0, json!(["Arcana"]))
            .json("domains/Arcana/cards", 0, json!([{"name": "Rune Ward", "level": 1}]))
    }

    #[tokio::test]
    async fn test_generate_whole_site() {
        let fetcher = fetcher(full_upstream());
        let config = test_parse_config("");

        let site = generate(&fetcher, &config).await.unwrap();
        assert_eq!(site.report.degraded, 0);
        assert_eq!(site.report.skipped, 0);
        // 6 flat + 4 imps + 1 environment + 1 domain
        assert_eq!(site.report.entities, 12);

        let routes: Vec<&str> = site.pages.iter().map(|p| p.route.as_str()).collect();
        for expected in ["/", "/adversaries/4/Imp", "/environments/2/Haunted%20City", "/weapons/3"] {
            assert!(routes.contains(&expected), "missing {expected}");
        }
        assert!(site.not_found.contains("Not Found"));
    }

    #[tokio::test]
    async fn test_generate_fails_on_strict_type() {
        let transport = full_upstream().status("loot", 500);
        let fetcher = fetcher(transport);
        let config = test_parse_config("");

        let err = generate(&fetcher, &config).await.unwrap_err();
        assert!(format!("{err:#}").contains("loot"));
    }

    #[tokio::test]
    async fn test_generate_degrades_lenient_type() {
        let transport = full_upstream().unreachable("weapons/2");
        let fetcher = fetcher(transport);
        let config = test_parse_config("");

        let site = generate(&fetcher, &config).await.unwrap();
        assert_eq!(site.report.degraded, 1);
    }
}
