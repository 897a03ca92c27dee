//! Entity-type registry.
//!
//! Every content type the site publishes is described once here: where its
//! list lives upstream, how tiers are fetched, how names become slugs and
//! which failure policy its route enumeration uses.

use crate::core::SlugStyle;
use crate::fetch::{FetchPolicy, TierFanout};
use crate::route::EmptyTabPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content types published by the site.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Adversaries,
    Ancestries,
    Armors,
    CampaignFrames,
    Classes,
    Communities,
    Consumables,
    /// Cards of one domain, listed on that domain's page (no own routes).
    DomainCards,
    Domains,
    Environments,
    Loot,
    Weapons,
}

/// Static description of an entity type.
#[derive(Debug, Clone, Copy)]
pub struct EntitySpec {
    /// Upstream list path below the API base (also the route prefix).
    pub endpoint: &'static str,
    /// Path appended after the parent segment (`domains/<name>/cards`).
    pub suffix: Option<&'static str>,
    /// Heading for landing pages.
    pub label: &'static str,
    pub fanout: TierFanout,
    /// Records carry a tier and routes include it.
    pub tiered: bool,
    /// Publishes `/<type>/<tier>` overview pages.
    pub tier_index: bool,
    /// Slug style of the legacy routes, used when `build.slug.compat` is on.
    pub legacy_slug: SlugStyle,
    pub route_policy: FetchPolicy,
    pub empty_tab: EmptyTabPolicy,
    /// Field shown next to names in lists.
    pub summary: Option<&'static str>,
}

impl EntityKind {
    /// Types that own routes, in site navigation order.
    pub const ROUTED: [Self; 11] = [
        Self::Classes,
        Self::Ancestries,
        Self::Communities,
        Self::Domains,
        Self::Adversaries,
        Self::Environments,
        Self::Weapons,
        Self::Armors,
        Self::Consumables,
        Self::Loot,
        Self::CampaignFrames,
    ];

    pub const fn spec(self) -> EntitySpec {
        use FetchPolicy::{Lenient, Strict};
        use SlugStyle::{Encoded, Raw};

        const BASE: EntitySpec = EntitySpec {
            endpoint: "",
            suffix: None,
            label: "",
            fanout: TierFanout::None,
            tiered: false,
            tier_index: false,
            legacy_slug: Encoded,
            route_policy: Strict,
            empty_tab: EmptyTabPolicy::Notice,
            summary: Some("description"),
        };

        match self {
            Self::Adversaries => EntitySpec {
                endpoint: "adversaries",
                label: "Adversaries",
                fanout: TierFanout::Query,
                tiered: true,
                route_policy: Lenient,
                ..BASE
            },
            Self::Ancestries => EntitySpec {
                endpoint: "ancestries",
                label: "Ancestries",
                legacy_slug: Raw,
                ..BASE
            },
            Self::Armors => EntitySpec {
                endpoint: "armors",
                label: "Armor",
                fanout: TierFanout::Path,
                tiered: true,
                tier_index: true,
                legacy_slug: Raw,
                route_policy: Lenient,
                empty_tab: EmptyTabPolicy::Overview,
                summary: Some("feature"),
                ..BASE
            },
            Self::CampaignFrames => EntitySpec {
                endpoint: "campaign-frames",
                label: "Campaign Frames",
                summary: Some("pitch"),
                ..BASE
            },
            Self::Classes => EntitySpec {
                endpoint: "classes",
                label: "Classes",
                ..BASE
            },
            Self::Communities => EntitySpec {
                endpoint: "communities",
                label: "Communities",
                ..BASE
            },
            Self::Consumables => EntitySpec {
                endpoint: "consumables",
                label: "Consumables",
                legacy_slug: Raw,
                ..BASE
            },
            Self::DomainCards => EntitySpec {
                endpoint: "domains",
                suffix: Some("cards"),
                label: "Domain Cards",
                route_policy: Lenient,
                summary: Some("type"),
                ..BASE
            },
            Self::Domains => EntitySpec {
                endpoint: "domains",
                label: "Domains",
                empty_tab: EmptyTabPolicy::Overview,
                summary: None,
                ..BASE
            },
            Self::Environments => EntitySpec {
                endpoint: "environments",
                label: "Environments",
                tiered: true,
                legacy_slug: Raw,
                ..BASE
            },
            Self::Loot => EntitySpec {
                endpoint: "loot",
                label: "Loot",
                ..BASE
            },
            Self::Weapons => EntitySpec {
                endpoint: "weapons",
                label: "Weapons",
                fanout: TierFanout::Path,
                tiered: true,
                tier_index: true,
                route_policy: Lenient,
                empty_tab: EmptyTabPolicy::Overview,
                summary: Some("trait"),
                ..BASE
            },
        }
    }

    /// Kebab-case name used in config and CLI.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DomainCards => "domain-cards",
            other => other.spec().endpoint,
        }
    }

    /// Inverse of [`EntityKind::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ROUTED
            .into_iter()
            .chain([Self::DomainCards])
            .find(|kind| kind.name() == name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
