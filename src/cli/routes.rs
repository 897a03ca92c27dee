//! `daggerdex routes`: the route parameters a build would pre-render.

use crate::cli::RoutesArgs;
use crate::cli::common;
use crate::config::SiteConfig;
use crate::entity::{EntityKind, EntityProfile};
use crate::fetch::{CollectionFetcher, CollectionRequest, Transport};
use crate::log;
use crate::route::generate_params;
use anyhow::{Context, Result};
use futures::future::join_all;
use serde_json::{Map, Value};

/// Print route parameters grouped by type.
pub fn run_routes(args: &RoutesArgs, config: &SiteConfig) -> Result<()> {
    let fetcher = common::http_fetcher(config)?;
    let routes = common::runtime()?.block_on(collect_routes(&fetcher, config, args.kind))?;
    println!("{}", common::to_json(&routes, args.pretty)?);
    Ok(())
}

/// `{ "<type>": [{ "tier"?, "entity" }, ...], ... }` in registry order.
pub async fn collect_routes<T: Transport>(
    fetcher: &CollectionFetcher<T>,
    config: &SiteConfig,
    only: Option<EntityKind>,
) -> Result<Map<String, Value>> {
    let kinds: Vec<EntityKind> = match only {
        Some(kind) => vec![kind],
        None => EntityKind::ROUTED.to_vec(),
    };
    let profiles: Vec<EntityProfile> =
        kinds.iter().map(|&kind| EntityProfile::from_config(kind, config)).collect();

    let collections = join_all(profiles.iter().map(|profile| {
        let request = CollectionRequest::all(profile.kind);
        async move { fetcher.fetch(&request, profile.policy).await }
    }))
    .await;

    let mut routes = Map::new();
    let mut total = 0;
    for (profile, collection) in profiles.iter().zip(collections) {
        let collection =
            collection.with_context(|| format!("Failed to fetch {}", profile.kind.name()))?;
        let outcome = generate_params(profile, &collection);
        total += outcome.params.len();
        routes.insert(
            profile.kind.name().to_string(),
            serde_json::to_value(&outcome.params)?,
        );
    }
    log!("routes"; "{} routes across {} types", total, routes.len());
    Ok(routes)
}
