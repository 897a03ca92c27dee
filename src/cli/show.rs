//! `daggerdex show`: resolve one entity the way a detail page does.

use crate::cli::ShowArgs;
use crate::cli::common;
use crate::config::SiteConfig;
use crate::core::Tier;
use crate::entity::EntityProfile;
use crate::fetch::{CollectionFetcher, CollectionRequest, FetchError, Transport};
use crate::route::{LookupKey, Resolver};
use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Print the matching record, or fail when nothing matches.
pub fn run_show(args: &ShowArgs, config: &SiteConfig) -> Result<()> {
    let fetcher = common::http_fetcher(config)?;
    let found = common::runtime()?.block_on(lookup(&fetcher, config, args))?;
    match found {
        Some(record) => {
            println!("{}", common::to_json(&record, args.pretty)?);
            Ok(())
        }
        None => match &args.tier {
            Some(tier) => bail!("no {} matches `{}` in tier {}", args.kind, args.slug, tier),
            None => bail!("no {} matches `{}`", args.kind, args.slug),
        },
    }
}

/// The first record matching the slug (and tier, when given).
///
/// A tier only fetches that tier. It must be one of `1`..`4` and the type
/// must be tiered; both are checked before any request is sent.
pub async fn lookup<T: Transport>(
    fetcher: &CollectionFetcher<T>,
    config: &SiteConfig,
    args: &ShowArgs,
) -> Result<Option<Value>> {
    let profile = EntityProfile::from_config(args.kind, config);
    let collection = match args.tier.as_deref() {
        Some(segment) => {
            let tier = Tier::from_segment(segment).map_err(FetchError::from)?;
            fetcher
                .fetch_tier(args.kind, u64::from(tier.get()), profile.policy)
                .await
                .with_context(|| format!("Failed to fetch {} tier {}", args.kind, tier))?
        }
        None => fetcher
            .fetch(&CollectionRequest::all(args.kind), profile.policy)
            .await
            .with_context(|| format!("Failed to fetch {}", args.kind))?,
    };
    let validated = collection.validate();

    let mut key = LookupKey::new(&args.slug);
    if let Some(tier) = &args.tier {
        key = key.with_tier(tier);
    }
    let found = Resolver::new(&profile, &validated.entities).resolve(key);
    Ok(found.map(|entity| Value::Object(entity.fields().clone())))
}
