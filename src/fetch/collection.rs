//! Collection fetcher: fan-out over tier endpoints, fan-in in tier order.

use super::{CollectionCache, CollectionRequest, FetchError, FetchPolicy, Target, TierFanout, Transport};
use crate::core::{EntityRecord, Tier, Validated, validate_records};
use crate::entity::EntityKind;
use crate::{debug, warn};
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// A sub-fetch that failed under the lenient policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchWarning {
    /// Tier of the failed endpoint (`None` for single-list types).
    pub tier: Option<Tier>,
    pub error: FetchError,
}

/// Records of one entity type as returned upstream, in tier order.
///
/// Immutable once built; `degraded` lists the sub-fetches that were
/// dropped under the lenient policy.
#[derive(Debug, Clone)]
pub struct Collection {
    request: CollectionRequest,
    records: Vec<EntityRecord>,
    degraded: Vec<FetchWarning>,
}

impl Collection {
    pub const fn new(
        request: CollectionRequest,
        records: Vec<EntityRecord>,
        degraded: Vec<FetchWarning>,
    ) -> Self {
        Self {
            request,
            records,
            degraded,
        }
    }

    pub const fn request(&self) -> &CollectionRequest {
        &self.request
    }

    pub const fn kind(&self) -> EntityKind {
        self.request.kind()
    }

    #[cfg(test)]
    pub fn records(&self) -> &[EntityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn degraded(&self) -> &[FetchWarning] {
        &self.degraded
    }

    /// Every sub-fetch succeeded.
    pub fn is_complete(&self) -> bool {
        self.degraded.is_empty()
    }

    /// Validate identity fields, logging one warning per dropped record.
    pub fn validate(&self) -> Validated {
        let kind = self.kind();
        let mut validated = validate_records(&self.records, kind.spec().tiered);
        for skipped in &validated.skipped {
            warn!(kind.name(); "skipping record #{} ({}): {}", skipped.index, skipped.reason, skipped.record.raw());
            validated.warnings += 1;
        }
        validated
    }
}

/// Fetches collections from the content API through a `Transport`.
pub struct CollectionFetcher<T> {
    base: Url,
    transport: T,
    cache: CollectionCache,
}

impl<T: Transport> CollectionFetcher<T> {
    /// `base` must already be validated (see `parse_base_url`).
    pub fn new(base: Url, transport: T) -> Self {
        Self {
            base,
            transport,
            cache: CollectionCache::new(),
        }
    }

    pub const fn base(&self) -> &Url {
        &self.base
    }

    pub const fn cache(&self) -> &CollectionCache {
        &self.cache
    }

    #[cfg(test)]
    pub(crate) const fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch one tier of a tiered type. The tier is checked before any
    /// request is issued.
    pub async fn fetch_tier(
        &self,
        kind: EntityKind,
        tier: u64,
        policy: FetchPolicy,
    ) -> Result<Arc<Collection>, FetchError> {
        let request = CollectionRequest::tier(kind, tier)?;
        self.fetch(&request, policy).await
    }

    /// Fetch a collection.
    ///
    /// All sub-fetches run concurrently; results are concatenated in
    /// ascending tier order regardless of completion order.
    pub async fn fetch(
        &self,
        request: &CollectionRequest,
        policy: FetchPolicy,
    ) -> Result<Arc<Collection>, FetchError> {
        if let Some(hit) = self.cache.get(request) {
            debug!("fetch"; "{}: cached ({} records)", request.kind(), hit.len());
            return Ok(hit);
        }

        let targets = request.targets(&self.base)?;
        let results = join_all(targets.iter().map(|target| self.fetch_list(target))).await;

        let mut records = Vec::new();
        let mut degraded = Vec::new();
        for (target, result) in targets.into_iter().zip(results) {
            match result {
                Ok(items) => records.extend(items),
                Err(error) => match policy {
                    FetchPolicy::Strict => return Err(error),
                    FetchPolicy::Lenient => {
                        warn!("fetch"; "{}; continuing without it", error);
                        degraded.push(FetchWarning {
                            tier: target.tier,
                            error,
                        });
                    }
                },
            }
        }

        // Single-list tiered types are narrowed locally
        if let (Some(tier), TierFanout::None) = (request.tier_scope(), request.kind().spec().fanout) {
            records.retain(|record| record.tier() == Some(tier));
        }

        let collection = Arc::new(Collection::new(request.clone(), records, degraded));
        if collection.is_empty() && collection.is_complete() {
            debug!("fetch"; "{}: no records upstream", request.kind());
        }
        self.cache.insert(Arc::clone(&collection));
        Ok(collection)
    }

    /// GET one endpoint and check it returns a JSON list.
    async fn fetch_list(&self, target: &Target) -> Result<Vec<EntityRecord>, FetchError> {
        let url = &target.url;
        debug!("fetch"; "GET {}", url);

        let response = self
            .transport
            .get(url)
            .await
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                reason: e.0,
            })?;

        if !response.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status: response.status,
            });
        }

        let body: Value = serde_json::from_slice(&response.body).map_err(|e| FetchError::Shape {
            url: url.clone(),
            detail: e.to_string(),
        })?;

        match body {
            Value::Array(items) => Ok(items.into_iter().map(EntityRecord::from_item).collect()),
            other => Err(FetchError::Shape {
                url: url.clone(),
                detail: format!("got {}", json_kind(&other)),
            }),
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
