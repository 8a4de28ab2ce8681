//! The demo route table
//!
//! Built in two equivalent shapes so both construction paths stay exercised:
//! a dictionary of path strings, and an ordered map that can also hold
//! regular expressions. A `routemap` query flag on the start location picks
//! the map.

use crate::views::{NestedView, View};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use waypost_core::{wrap, Guard, Location, MatchOptions, RouteDict, RouteEntry, RouteMap, Routes};
use waypost_router::Pattern;

/// Which representation the route table is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTableMode {
    Dictionary,
    Map,
}

impl RouteTableMode {
    /// `Map` when the location carries a `routemap` query parameter
    pub fn from_location(location: &Location) -> Self {
        if location.has_query_param("routemap") {
            RouteTableMode::Map
        } else {
            RouteTableMode::Dictionary
        }
    }

    /// `Map` when the page URL's search part (before any `#`) has `routemap`
    pub fn from_href(href: &str) -> Self {
        let before_hash = href.split('#').next().unwrap_or_default();
        let search = before_hash
            .split_once('?')
            .map(|(_, query)| query)
            .unwrap_or_default();
        Self::from_location(&Location {
            path: "/".to_string(),
            querystring: search.to_string(),
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteTableMode::Dictionary => "dictionary",
            RouteTableMode::Map => "map",
        }
    }
}

/// Coin flip shared by the lucky route's first guard
#[derive(Debug, Clone)]
pub struct Coin {
    rng: Arc<Mutex<fastrand::Rng>>,
}

impl Default for Coin {
    fn default() -> Self {
        Self::from_rng(fastrand::Rng::new())
    }
}

impl Coin {
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(fastrand::Rng::with_seed(seed))
    }

    fn from_rng(rng: fastrand::Rng) -> Self {
        Self {
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn flip(&self) -> bool {
        self.rng.lock().f64() > 0.5
    }
}

/// First lucky guard: lets people in about half of the time
///
/// With `query_override`, `pass=1` always passes and `pass=0` always fails so
/// tests can be deterministic.
pub fn lucky_gate(coin: Coin, query_override: bool) -> Guard {
    Guard::new(move |detail| {
        if query_override {
            match detail.querystring.as_str() {
                "pass=1" => return true,
                "pass=0" => return false,
                _ => {}
            }
        }
        coin.flip()
    })
}

/// Second lucky guard: only runs after the first passed, always passes
pub fn lucky_followup() -> Guard {
    Guard::new(|detail| {
        tracing::info!(
            location = %detail.location,
            querystring = %detail.querystring,
            user_data = ?detail.user_data,
            "Pre-condition 2 executed"
        );
        true
    })
}

fn lucky(coin: Coin, query_override: bool) -> RouteEntry<View> {
    wrap(
        View::Lucky,
        Some(json!({"foo": "bar"})),
        [lucky_gate(coin, query_override), lucky_followup()],
    )
}

/// Dictionary form: string keys only, nested router reached via two keys
pub fn dictionary_routes(coin: Coin) -> waypost_core::Result<Routes<View>> {
    let mut routes: RouteDict<RouteEntry<View>> = RouteDict::new();

    // Exact paths
    routes.insert("/".to_string(), View::Home.into());
    // Children of /brand also activate its link
    routes.insert("/brand".to_string(), View::Home.into());

    routes.insert("/hello/:first/:last?".to_string(), View::Name.into());

    routes.insert("/wild".to_string(), View::Wild.into());
    // Must precede /wild/* or the wildcard shadows it
    routes.insert(
        "/wild/data".to_string(),
        wrap(View::Wild, Some(json!({"hello": "world"})), []),
    );
    routes.insert("/wild/*".to_string(), View::Wild.into());

    routes.insert("/lucky".to_string(), lucky(coin, true));

    routes.insert("/nested".to_string(), View::Nested.into());
    routes.insert("/nested/*".to_string(), View::Nested.into());

    routes.insert("*".to_string(), View::NotFound.into());

    Ok(Routes::from_dict(routes, MatchOptions::default())?)
}

/// Map form: adds regular-expression routes; one regex covers `/nested` and below
pub fn map_routes(coin: Coin) -> waypost_core::Result<Routes<View>> {
    let mut routes: RouteMap<RouteEntry<View>> = RouteMap::new();

    routes
        .set("/", View::Home.into())
        .set("/brand", View::Home.into())
        .set("/hello/:first/:last?", View::Name.into())
        .set("/wild", View::Wild.into())
        .set(
            "/wild/data",
            wrap(View::Wild, Some(json!({"hello": "world"})), []),
        )
        .set("/wild/*", View::Wild.into())
        .set("/lucky", lucky(coin, false))
        .set(Pattern::regex(r"(?i)^/regex/(.*)?")?, View::Regex.into())
        .set(
            Pattern::regex(r"(?i)^/(pattern|match)(/[a-z0-9]+)?")?,
            View::Regex.into(),
        )
        .set(Pattern::regex(r"^/nested(/(.*))?")?, View::Nested.into())
        .set("*", View::NotFound.into());

    Ok(Routes::from_map(routes, MatchOptions::default())?)
}

/// Build the table for a mode
pub fn routes(mode: RouteTableMode, coin: Coin) -> waypost_core::Result<Routes<View>> {
    match mode {
        RouteTableMode::Dictionary => dictionary_routes(coin),
        RouteTableMode::Map => map_routes(coin),
    }
}

/// Prefix handled by the nested router
pub const NESTED_PREFIX: &str = "/nested";

/// Table of the router inside the `Nested` view
pub fn nested_routes() -> waypost_core::Result<Routes<NestedView>> {
    let mut routes: RouteDict<RouteEntry<NestedView>> = RouteDict::new();
    routes.insert("/".to_string(), NestedView::Home.into());
    routes.insert("/:item".to_string(), NestedView::Item.into());
    routes.insert("*".to_string(), NestedView::NotFound.into());
    Ok(Routes::from_dict(routes, MatchOptions::default())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both() -> Vec<(RouteTableMode, Routes<View>)> {
        vec![
            (
                RouteTableMode::Dictionary,
                dictionary_routes(Coin::with_seed(1)).unwrap(),
            ),
            (RouteTableMode::Map, map_routes(Coin::with_seed(1)).unwrap()),
        ]
    }

    fn view(table: &Routes<View>, path: &str) -> View {
        table.find(path).unwrap().value().handler
    }

    #[test]
    fn test_mode_from_location() {
        let loc = Location::parse("/?routemap=1").unwrap();
        assert_eq!(RouteTableMode::from_location(&loc), RouteTableMode::Map);
        let loc = Location::parse("/").unwrap();
        assert_eq!(RouteTableMode::from_location(&loc), RouteTableMode::Dictionary);
    }

    #[test]
    fn test_mode_from_href() {
        assert_eq!(
            RouteTableMode::from_href("http://localhost:5000/?routemap=1#/wild"),
            RouteTableMode::Map
        );
        assert_eq!(
            RouteTableMode::from_href("http://localhost:5000/#/wild?routemap=1"),
            RouteTableMode::Dictionary
        );
        assert_eq!(
            RouteTableMode::from_href("http://localhost:5000/"),
            RouteTableMode::Dictionary
        );
    }

    #[test]
    fn test_tables_are_valid() {
        for (mode, table) in both() {
            table.validate_strict().unwrap_or_else(|e| panic!("{}: {e}", mode.as_str()));
        }
        nested_routes().unwrap().validate_strict().unwrap();
    }

    #[test]
    fn test_shared_routes_agree() {
        let cases = [
            ("/", View::Home),
            ("/brand", View::Home),
            ("/hello/Jane", View::Name),
            ("/hello/Jane/Doe", View::Name),
            ("/wild", View::Wild),
            ("/wild/data", View::Wild),
            ("/wild/anything/else", View::Wild),
            ("/lucky", View::Lucky),
            ("/nested", View::Nested),
            ("/nested/anything", View::Nested),
            ("/does/not/exist", View::NotFound),
        ];
        for (mode, table) in both() {
            for (path, expected) in cases {
                assert_eq!(view(&table, path), expected, "{} {path}", mode.as_str());
            }
        }
    }

    #[test]
    fn test_wild_data_carries_user_data() {
        for (_, table) in both() {
            let m = table.find("/wild/data").unwrap();
            assert_eq!(m.route.pattern().source(), "/wild/data");
            assert_eq!(m.value().user_data, Some(json!({"hello": "world"})));

            let m = table.find("/wild/other").unwrap();
            assert_eq!(m.route.pattern().source(), "/wild/*");
            assert!(m.value().user_data.is_none());
        }
    }

    #[test]
    fn test_regex_only_in_map() {
        let dict = dictionary_routes(Coin::default()).unwrap();
        let map = map_routes(Coin::default()).unwrap();

        assert_eq!(view(&dict, "/regex/abc"), View::NotFound);

        let m = map.find("/regex/abc").unwrap();
        assert_eq!(m.value().handler, View::Regex);
        assert_eq!(m.params.group(1), Some("abc"));

        assert_eq!(view(&map, "/MATCH/x1"), View::Regex);
        assert_eq!(view(&map, "/pattern"), View::Regex);
    }

    #[test]
    fn test_lucky_has_two_guards() {
        for (_, table) in both() {
            let entry = table.find("/lucky").unwrap().value();
            assert_eq!(entry.conditions.len(), 2);
            assert_eq!(entry.user_data, Some(json!({"foo": "bar"})));
        }
    }

    #[test]
    fn test_seeded_coin_repeats() {
        let a = Coin::with_seed(7);
        let b = Coin::with_seed(7);
        let flips_a: Vec<bool> = (0..16).map(|_| a.flip()).collect();
        let flips_b: Vec<bool> = (0..16).map(|_| b.flip()).collect();
        assert_eq!(flips_a, flips_b);
    }
}
