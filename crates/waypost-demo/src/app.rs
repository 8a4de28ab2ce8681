//! Demo application
//!
//! Wires the top-level router and the router nested inside the `Nested` view,
//! and turns each navigation into a rendered page.

use crate::routes::{self, Coin, RouteTableMode, NESTED_PREFIX};
use crate::views::{render_conditions_failed, NestedView, View};
use waypost_core::{Location, Navigation, Router, RouterConfig, Validation};

/// App configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: RouteTableMode,
    /// Seed for the lucky route's coin; random when unset
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: RouteTableMode::Dictionary,
            seed: None,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the table representation from a routed location
    pub fn for_location(location: &Location) -> Self {
        Self {
            mode: RouteTableMode::from_location(location),
            ..Self::default()
        }
    }

    /// Pick the table representation from the page URL
    pub fn for_href(href: &str) -> Self {
        Self {
            mode: RouteTableMode::from_href(href),
            ..Self::default()
        }
    }

    pub fn mode(mut self, mode: RouteTableMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A rendered navigation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Navigation outcome name (`loaded`, `conditions-failed`, ...)
    pub outcome: &'static str,
    /// Top-level view shown, if any
    pub view: Option<View>,
    /// Nested view shown inside `Nested`, if any
    pub nested: Option<NestedView>,
    pub body: String,
}

/// Top-level router plus the nested one
#[derive(Debug)]
pub struct App {
    router: Router<View>,
    nested: Router<NestedView>,
    mode: RouteTableMode,
}

impl App {
    pub fn new(config: AppConfig) -> waypost_core::Result<Self> {
        let coin = config.seed.map(Coin::with_seed).unwrap_or_default();
        let table = routes::routes(config.mode, coin)?;
        let router = Router::with_config(table, RouterConfig::new().strict())?;
        let nested = Router::with_config(
            routes::nested_routes()?,
            RouterConfig::new()
                .prefix(NESTED_PREFIX)
                .validation(Validation::Strict),
        )?;
        tracing::debug!(mode = config.mode.as_str(), "demo app ready");
        Ok(Self {
            router,
            nested,
            mode: config.mode,
        })
    }

    pub fn router(&self) -> &Router<View> {
        &self.router
    }

    pub fn nested_router(&self) -> &Router<NestedView> {
        &self.nested
    }

    pub fn mode(&self) -> RouteTableMode {
        self.mode
    }

    /// Push a location or href and render the result
    pub async fn visit(&self, location: &str) -> waypost_core::Result<Page> {
        let location = Location::resolve(location)?;
        let nav = self.router.push(&location.to_string()).await?;
        Ok(self.render(&location, nav).await)
    }

    async fn render(&self, location: &Location, nav: Navigation<View>) -> Page {
        let outcome = nav.as_str();
        match nav {
            Navigation::Loaded(loaded) => {
                let mut body = loaded.handler.render(&loaded);
                let mut nested = None;
                if loaded.handler == View::Nested {
                    match self.nested.navigate(location).await {
                        Navigation::Loaded(inner) => {
                            body.push('\n');
                            body.push_str(&inner.handler.render(&inner));
                            nested = Some(inner.handler);
                        }
                        other => {
                            tracing::debug!(outcome = other.as_str(), "nested router showed nothing");
                        }
                    }
                }
                Page {
                    outcome,
                    view: Some(loaded.handler),
                    nested,
                    body,
                }
            }
            Navigation::ConditionsFailed(detail) => Page {
                outcome,
                view: None,
                nested: None,
                body: render_conditions_failed(&detail),
            },
            Navigation::NotFound(location) => Page {
                outcome,
                view: None,
                nested: None,
                body: format!("Nothing to show for {location}"),
            },
            Navigation::Superseded => Page {
                outcome,
                view: None,
                nested: None,
                body: String::new(),
            },
        }
    }
}
