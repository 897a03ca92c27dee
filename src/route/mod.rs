//! Route enumeration and lookup over validated entities.
//!
//! | Module      | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `params`    | One route parameter set per valid record       |
//! | `resolve`   | Route parameters back to an entity             |
//! | `partition` | Group entities by tier, level, ...             |
//! | `nav`       | Tab selection to route transitions             |

mod nav;
mod params;
mod partition;
mod resolve;

pub use nav::{EmptyTabPolicy, NavIntent, NavOutcome, NavState, TabRoutes};
pub use params::{RouteParams, generate_params, params_for};
pub use partition::{Partitions, by_tier};
pub use resolve::{LookupKey, Resolver};
