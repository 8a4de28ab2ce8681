//! waypost-router: Ordered first-match path router
//!
//! Compiles route patterns into matchers and selects the first registered
//! entry accepting a path. Used by waypost-core for navigation and by
//! nested routers for the remainder of an already-matched prefix.
//!
//! ## Features
//! - Static paths: `/`, `/wild/data`
//! - Parameters: `/hello/:first/:last?` (optional trailing parameter)
//! - Wildcards: `/wild/*`, `*` (catch-all)
//! - Regular expressions with positional captures
//! - Dictionary and ordered-map table representations
//! - Construction-time validation of ordering defects
//!
//! ## Priority
//! Registration order. The first entry whose pattern accepts the path wins,
//! so specific routes go before wildcards and the catch-all goes last.
//!
//! ## Example
//! ```
//! use waypost_router::RouteTable;
//!
//! let table = RouteTable::new()
//!     .route("/hello/:first/:last?", "name").unwrap()
//!     .route("*", "not-found").unwrap();
//! table.validate().unwrap();
//!
//! let m = table.find("/hello/Jane").unwrap();
//! assert_eq!(*m.value(), "name");
//! assert_eq!(m.params.get("first"), Some("Jane"));
//! assert_eq!(m.params.get("last"), None);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod error;
pub mod pattern;
pub mod table;

pub use error::{Error, Result};
pub use pattern::{MatchOptions, Matcher, Params, Pattern, Prefix, WILDCARD_KEY};
pub use table::{Match, Route, RouteDict, RouteMap, RouteTable};

// Re-exported so callers can build regex patterns without a direct dependency
pub use regex::Regex;
