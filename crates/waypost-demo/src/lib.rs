//! waypost-demo: Demo route table and views
//!
//! Declares the sample app's routes in both table representations and
//! renders a text page per navigation. Exercises every routing feature:
//! exact paths, optional parameters, wildcards, custom route data, guarded
//! routes, regular expressions, a nested router and the catch-all.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod app;
pub mod routes;
pub mod views;

pub use app::{App, AppConfig, Page};
pub use routes::{dictionary_routes, map_routes, nested_routes, Coin, RouteTableMode};
pub use views::{NestedView, View};
