//! waypost-core: Client-side navigation core
//!
//! Builds on waypost-router's ordered route table with everything needed to
//! drive a single-page app:
//!
//! ## Features
//! - `wrap` - bind custom data and guards to a handler
//! - Guard chains - sync or async predicates, evaluated strictly in order
//! - Router events - `routeLoading`, `routeLoaded`, `conditionsFailed`
//! - Hash locations, in-memory history (`push`, `replace`, `pop`)
//! - Nested routers via path prefixes
//! - Stale navigations are superseded, never rendered
//! - Active-link detection
//!
//! ## Example
//! ```
//! use serde_json::json;
//! use waypost_core::{wrap, Guard, Location, Router, Routes};
//!
//! # futures::executor::block_on(async {
//! let mut routes: Routes<&str> = Routes::new();
//! routes.insert("/", "home".into()).unwrap();
//! routes.insert("/lucky", wrap("lucky", Some(json!({"foo": "bar"})), [
//!     Guard::new(|d| d.querystring == "pass=1"),
//! ])).unwrap();
//! routes.insert("*", "not-found".into()).unwrap();
//!
//! let router = Router::new(routes).unwrap();
//! let nav = router.navigate(&Location::parse("/lucky?pass=1").unwrap()).await;
//! assert_eq!(nav.loaded().unwrap().handler, "lucky");
//! # });
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod active;
pub mod config;
pub mod error;
pub mod event;
pub mod guard;
pub mod history;
pub mod location;
pub mod navigation;
pub mod router;
pub mod wrap;

// Re-exports
pub use active::ActiveLink;
pub use config::{RouterConfig, Validation};
pub use error::{BoxError, Error, Result};
pub use event::{EventBus, RouterEvent, SubscriptionId};
pub use guard::{ChainOutcome, Guard, GuardChain, GuardState};
pub use history::History;
pub use location::Location;
pub use navigation::{Generation, Loaded, Navigation, NavigationDetail, NavigationToken};
pub use router::{Router, Routes};
pub use wrap::{wrap, RouteEntry, WrapOptions};

pub use waypost_router::{MatchOptions, Params, Pattern, Prefix, RouteDict, RouteMap, RouteTable};
