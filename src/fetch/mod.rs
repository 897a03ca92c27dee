//! Collection fetching from the content API.
//!
//! | Module       | Purpose                                          |
//! |--------------|--------------------------------------------------|
//! | `endpoint`   | Base URL validation, request → URL targets       |
//! | `transport`  | Transport seam and raw responses                 |
//! | `http`       | `reqwest` transport                              |
//! | `collection` | Fan-out fetch, policies, `Collection`            |
//! | `cache`      | Per-build memo of complete collections           |

mod cache;
mod collection;
mod endpoint;
mod error;
mod http;
mod transport;

pub use cache::CollectionCache;
pub use collection::{Collection, CollectionFetcher};
pub use endpoint::{BaseUrlError, CollectionRequest, Target, parse_base_url};
pub use error::FetchError;
pub use http::HttpTransport;
pub use transport::{RawResponse, Transport, TransportError};

#[cfg(test)]
pub(crate) use transport::testing;

use serde::{Deserialize, Serialize};

/// What a failed sub-fetch does to the whole fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchPolicy {
    /// Abort with an error naming the failing endpoint.
    #[default]
    Strict,
    /// Keep going with an empty sub-collection and a warning.
    Lenient,
}

/// How a tiered type spreads its list over endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierFanout {
    /// One list holding every tier.
    None,
    /// `<endpoint>?tier=<n>`
    Query,
    /// `<endpoint>/<n>`
    Path,
}
