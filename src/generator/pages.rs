//! Page assembly for one entity type.
//!
//! Every type gets a landing page and one detail page per route parameter
//! set. Tiered types add tier tabs (and tier index pages when they own
//! them), domains list their cards grouped by level.

use super::html::{self, Tab, TabTarget};
use super::Page;
use crate::config::SiteConfig;
use crate::core::{Entity, RoutePath, SlugStyle, Tier, Validated};
use crate::entity::{EntityKind, EntityProfile};
use crate::fetch::{Collection, CollectionFetcher, CollectionRequest, FetchError, Transport};
use crate::route::{
    LookupKey, NavIntent, NavState, Partitions, Resolver, RouteParams, TabRoutes, by_tier,
    params_for,
};
use crate::utils::html::escape;
use crate::{debug, warn};
use futures::future::join_all;
use rustc_hash::FxHashSet;
use serde_json::Value;
use std::sync::Arc;

/// Pages and counters produced for one entity type.
#[derive(Debug, Default)]
pub struct KindPages {
    pub pages: Vec<Page>,
    /// Valid entities that got a route.
    pub entities: usize,
    /// Records dropped by validation (domain cards included).
    pub skipped: usize,
    /// Sub-fetches that failed under a lenient policy.
    pub degraded: usize,
}

/// Fetch one type's collection and build all of its pages.
pub async fn render_kind<T: Transport>(
    fetcher: &CollectionFetcher<T>,
    config: &SiteConfig,
    profile: EntityProfile,
) -> Result<KindPages, FetchError> {
    let collection = fetcher
        .fetch(&CollectionRequest::all(profile.kind), profile.policy)
        .await?;
    let validated = collection.validate();
    let params = params_for(&profile, &validated).params;
    debug!(profile.kind.name(); "{} routes from {} records", params.len(), collection.len());

    let mut out = KindPages {
        entities: validated.entities.len(),
        skipped: validated.skipped.len(),
        degraded: collection.degraded().len(),
        pages: Vec::new(),
    };
    let view = View::new(config, &profile);

    if profile.spec.tiered {
        view.tiered(&collection, &validated, &params, &mut out.pages);
    } else if profile.kind == EntityKind::Domains {
        let cards = fetch_domain_cards(fetcher, config, &validated.entities).await?;
        let cards: Vec<DomainCards> = cards
            .iter()
            .map(|collection| {
                let validated = collection.validate();
                out.skipped += validated.skipped.len();
                out.degraded += collection.degraded().len();
                DomainCards {
                    degraded: !collection.is_complete(),
                    levels: Partitions::by(&validated.entities, |card| Some(card_level(card))),
                }
            })
            .collect();
        view.domains(&validated, &params, &cards, &mut out.pages);
    } else {
        view.flat(&validated, &params, &mut out.pages);
    }
    Ok(out)
}

/// Card collections of every domain, in domain order.
async fn fetch_domain_cards<T: Transport>(
    fetcher: &CollectionFetcher<T>,
    config: &SiteConfig,
    domains: &[Entity],
) -> Result<Vec<Arc<Collection>>, FetchError> {
    let profile = EntityProfile::from_config(EntityKind::DomainCards, config);
    let requests: Vec<_> = domains
        .iter()
        .map(|domain| CollectionRequest::child(EntityKind::DomainCards, domain.name()))
        .collect();
    join_all(requests.iter().map(|request| fetcher.fetch(request, profile.policy)))
        .await
        .into_iter()
        .collect()
}

/// `level` as a number or numeric string; cards without one sort first.
fn card_level(card: &Entity) -> Option<u64> {
    match card.field("level")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

struct DomainCards {
    degraded: bool,
    levels: Partitions<Option<u64>>,
}

struct View<'a> {
    config: &'a SiteConfig,
    profile: &'a EntityProfile,
}

impl<'a> View<'a> {
    const fn new(config: &'a SiteConfig, profile: &'a EntityProfile) -> Self {
        Self { config, profile }
    }

    fn name(&self) -> &'static str {
        self.profile.kind.name()
    }

    fn document(&self, route: RoutePath, title: &str, body: &str) -> Page {
        Page::document(route, html::document(&self.config.site.title, title, body))
    }

    /// Detail routes paired with their entities, first record winning a route.
    fn detail_routes<'v>(
        &self,
        validated: &'v Validated,
        params: &[RouteParams],
    ) -> Vec<(&'v Entity, RoutePath)> {
        let mut seen = FxHashSet::default();
        let mut routes = Vec::with_capacity(params.len());
        for (entity, params) in validated.entities.iter().zip(params) {
            if self.profile.slug == SlugStyle::Raw && entity.name().contains('/') {
                warn!(self.name(); "skipping `{}`: raw slug would span segments", entity.name());
                continue;
            }
            let route = params.path(self.profile);
            if !seen.insert(route.clone()) {
                warn!(self.name(); "duplicate route {}, keeping the first record", route);
                continue;
            }
            routes.push((entity, route));
        }
        routes
    }

    fn header(entity: &Entity) -> String {
        format!("<h1>{}</h1>\n", escape(entity.name()))
    }

    // ------------------------------------------------------------------------
    // Tiered types
    // ------------------------------------------------------------------------

    fn tiered(
        &self,
        collection: &Collection,
        validated: &Validated,
        params: &[RouteParams],
        pages: &mut Vec<Page>,
    ) {
        let partitions = by_tier(&validated.entities);
        let policy = self.profile.empty_tab;

        for (entity, route) in self.detail_routes(validated, params) {
            let Some(tier) = entity.tier() else {
                continue;
            };
            let slug = self.profile.slug(entity);
            let state = NavState::new(tier, slug.clone());

            let tier_tabs: Vec<Tab> = Tier::ALL
                .into_iter()
                .map(|t| Tab {
                    label: format!("Tier {t}"),
                    target: state
                        .preview(NavIntent::SelectPartition(t), &partitions, self.profile, policy)
                        .into(),
                    active: t == tier,
                })
                .collect();
            let entity_tabs: Vec<Tab> = partitions
                .get(&tier)
                .iter()
                .map(|sibling| {
                    let sibling_slug = self.profile.slug(sibling);
                    Tab {
                        label: sibling.name().to_string(),
                        active: sibling_slug == slug,
                        target: state
                            .preview(
                                NavIntent::SelectEntity(sibling_slug),
                                &partitions,
                                self.profile,
                                policy,
                            )
                            .into(),
                    }
                })
                .collect();

            let mut body = Self::header(entity);
            body.push_str(&format!("<p class=\"tier\">Tier {tier}</p>\n"));
            body.push_str(&html::tabs("tiers", &tier_tabs));
            body.push_str(&html::tabs("entities", &entity_tabs));
            body.push_str(&html::fields(entity));
            pages.push(self.document(route, entity.name(), &body));
        }

        let unavailable: FxHashSet<Option<Tier>> =
            collection.degraded().iter().map(|w| w.tier).collect();
        let mut body = format!("<h1>{}</h1>\n", escape(self.profile.spec.label));
        if unavailable.contains(&None) {
            body.push_str("<p class=\"notice\">Data unavailable.</p>\n");
        }
        for tier in Tier::ALL {
            body.push_str("<section>\n");
            if self.profile.spec.tier_index {
                body.push_str(&format!(
                    "<h2><a href=\"{}\">Tier {tier}</a></h2>\n",
                    html::href(&self.profile.tier_route(tier))
                ));
            } else {
                body.push_str(&format!("<h2>Tier {tier}</h2>\n"));
            }
            if unavailable.contains(&Some(tier)) {
                body.push_str(&format!("<p class=\"notice\">Tier {tier} data unavailable.</p>\n"));
            }
            body.push_str(&html::entity_list(self.profile, partitions.get(&tier)));
            body.push_str("</section>\n");
        }
        pages.push(self.document(self.profile.landing_route(), self.profile.spec.label, &body));

        if self.profile.spec.tier_index {
            for tier in Tier::ALL {
                let tabs: Vec<Tab> = Tier::ALL
                    .into_iter()
                    .map(|t| Tab {
                        label: format!("Tier {t}"),
                        target: TabTarget::Link(self.profile.tier_route(t)),
                        active: t == tier,
                    })
                    .collect();
                let title = format!("{}: Tier {tier}", self.profile.spec.label);
                let mut body = format!("<h1>{}</h1>\n", escape(&title));
                body.push_str(&html::tabs("tiers", &tabs));
                if unavailable.contains(&Some(tier)) {
                    body.push_str("<p class=\"notice\">Data unavailable.</p>\n");
                }
                body.push_str(&html::entity_list(self.profile, partitions.get(&tier)));
                pages.push(self.document(self.profile.tier_route(tier), &title, &body));
            }
        }
    }

    // ------------------------------------------------------------------------
    // Single-list types
    // ------------------------------------------------------------------------

    /// Routed entities in display order.
    fn sorted(routes: &[(&Entity, RoutePath)]) -> Vec<Entity> {
        let mut sorted: Vec<Entity> = routes.iter().map(|(entity, _)| (*entity).clone()).collect();
        sorted.sort_by(Entity::display_cmp);
        sorted
    }

    fn sibling_tabs(&self, siblings: &[Entity], current: &Entity) -> Vec<Tab> {
        siblings
            .iter()
            .map(|sibling| Tab {
                label: sibling.name().to_string(),
                target: TabTarget::Link(self.profile.entity_route(sibling)),
                active: sibling == current,
            })
            .collect()
    }

    fn flat(&self, validated: &Validated, params: &[RouteParams], pages: &mut Vec<Page>) {
        let routes = self.detail_routes(validated, params);
        let siblings = Self::sorted(&routes);

        for (entity, route) in routes {
            let mut body = Self::header(entity);
            body.push_str(&html::tabs("entities", &self.sibling_tabs(&siblings, entity)));
            body.push_str(&html::fields(entity));
            pages.push(self.document(route, entity.name(), &body));
        }

        pages.push(self.landing(&validated.entities, &siblings));
    }

    fn landing(&self, entities: &[Entity], sorted: &[Entity]) -> Page {
        let route = self.profile.landing_route();
        if self.profile.kind == EntityKind::CampaignFrames {
            let frame = &self.config.build.default_campaign_frame;
            let slug = self.profile.slug.segment(frame);
            match Resolver::new(self.profile, entities).resolve(LookupKey::new(&slug)) {
                Some(entity) => {
                    let target = self.profile.entity_route(entity);
                    let html = html::redirect(&self.config.site.title, &target);
                    return Page::redirect(route, html);
                }
                None => warn!(self.name(); "default campaign frame `{}` not found", frame),
            }
        }
        let mut body = format!("<h1>{}</h1>\n", escape(self.profile.spec.label));
        body.push_str(&html::entity_list(self.profile, sorted));
        self.document(route, self.profile.spec.label, &body)
    }

    // ------------------------------------------------------------------------
    // Domains
    // ------------------------------------------------------------------------

    fn domains(
        &self,
        validated: &Validated,
        params: &[RouteParams],
        cards: &[DomainCards],
        pages: &mut Vec<Page>,
    ) {
        let routes = self.detail_routes(validated, params);
        let siblings = Self::sorted(&routes);

        for (entity, route) in routes {
            let mut body = Self::header(entity);
            body.push_str(&html::tabs("entities", &self.sibling_tabs(&siblings, entity)));
            body.push_str(&html::fields(entity));

            let index = validated
                .entities
                .iter()
                .position(|e| std::ptr::eq(e, entity));
            match index.and_then(|i| cards.get(i)) {
                Some(domain) => body.push_str(&Self::cards(domain)),
                None => body.push_str("<p class=\"notice\">No cards.</p>\n"),
            }
            pages.push(self.document(route, entity.name(), &body));
        }

        pages.push(self.landing(&validated.entities, &siblings));
    }

    fn cards(domain: &DomainCards) -> String {
        let mut html = String::from("<section class=\"cards\">\n<h2>Cards</h2>\n");
        if domain.degraded {
            html.push_str("<p class=\"notice\">Cards unavailable.</p>\n");
        } else if domain.levels.is_empty() {
            html.push_str("<p class=\"notice\">No cards.</p>\n");
        }
        for (level, cards) in domain.levels.iter() {
            match level {
                Some(level) => {
                    html.push_str(&format!("<h3>Level {level}</h3>\n"));
                }
                None => html.push_str("<h3>Unleveled</h3>\n"),
            }
            for card in cards {
                html.push_str(&format!("<article>\n<h4>{}</h4>\n", escape(card.name())));
                html.push_str(&html::fields(card));
                html.push_str("</article>\n");
            }
        }
        html.push_str("</section>\n");
        html
    }
}

/// Home page linking every landing page with its entry count.
pub fn home(config: &SiteConfig, counts: &[(EntityKind, usize)]) -> Page {
    let mut body = format!("<h1>{}</h1>\n<ul class=\"kinds\">\n", escape(&config.site.title));
    for (kind, count) in counts {
        let profile = EntityProfile::new(*kind);
        body.push_str(&format!(
            "<li><a href=\"{}\">{}</a> <span class=\"count\">{count}</span></li>\n",
            html::href(&profile.landing_route()),
            escape(kind.spec().label)
        ));
    }
    body.push_str("</ul>\n");
    Page::document(
        RoutePath::root(),
        html::document(&config.site.title, "Home", &body),
    )
}

pub fn not_found(config: &SiteConfig) -> String {
    html::document(
        &config.site.title,
        "Not Found",
        "<h1>Not Found</h1>\n<p>No page at this address.</p>\n",
    )
}
