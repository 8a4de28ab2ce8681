//! Client-side router
//!
//! Owns a route table of [`RouteEntry`] values built once at startup and
//! resolves each navigation against it:
//!
//! 1. strip the configured prefix (nested routers)
//! 2. select the first matching entry
//! 3. evaluate its guards in order
//! 4. make the handler current and emit `RouteLoading`/`RouteLoaded`,
//!    or emit `ConditionsFailed`
//!
//! Every navigation takes a fresh token. A navigation whose token was
//! superseded while a guard was pending resolves to
//! [`Navigation::Superseded`] and emits nothing, so a slow guard can never
//! show a stale handler.

use crate::config::{RouterConfig, Validation};
use crate::event::{EventBus, RouterEvent, SubscriptionId};
use crate::guard::ChainOutcome;
use crate::history::History;
use crate::navigation::{Generation, Loaded, Navigation, NavigationDetail};
use crate::wrap::RouteEntry;
use crate::{Error, Location, Result};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use waypost_router::{Match, Prefix, RouteTable};

/// Route table of wrapped handlers
pub type Routes<H> = RouteTable<RouteEntry<H>>;

/// Navigation state machine over a read-only route table
pub struct Router<H> {
    table: Arc<Routes<H>>,
    config: RouterConfig,
    events: EventBus<H>,
    generation: Generation,
    current: RwLock<Option<Loaded<H>>>,
    history: Mutex<History>,
}

impl<H> std::fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.table.len())
            .field("prefix", &self.config.prefix)
            .field("listeners", &self.events.len())
            .finish()
    }
}

impl<H> Router<H>
where
    H: Clone + Send + Sync + 'static,
{
    /// Router with the default configuration
    pub fn new(table: impl Into<Arc<Routes<H>>>) -> Result<Self> {
        Self::with_config(table, RouterConfig::default())
    }

    /// Router whose table handles the path left after `prefix`
    pub fn nested(table: impl Into<Arc<Routes<H>>>, prefix: impl Into<Prefix>) -> Result<Self> {
        Self::with_config(table, RouterConfig::new().prefix(prefix))
    }

    pub fn with_config(table: impl Into<Arc<Routes<H>>>, config: RouterConfig) -> Result<Self> {
        let table = table.into();
        match config.validation {
            Validation::Off => {}
            Validation::Ordering => table.validate()?,
            Validation::Strict => table.validate_strict()?,
        }
        tracing::debug!(routes = table.len(), prefix = ?config.prefix, "router created");

        let history = History::new(Location::root(), config.history_limit);
        Ok(Self {
            table,
            config,
            events: EventBus::new(),
            generation: Generation::new(),
            current: RwLock::new(None),
            history: Mutex::new(history),
        })
    }

    pub fn table(&self) -> &Routes<H> {
        &self.table
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus<H> {
        &self.events
    }

    /// Shorthand for `events().subscribe`
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&RouterEvent<H>) + Send + Sync + 'static,
    {
        self.events.subscribe(listener)
    }

    /// Route currently shown, if any
    pub fn current(&self) -> Option<Loaded<H>> {
        self.current.read().clone()
    }

    /// Location at the history cursor
    pub fn location(&self) -> Location {
        self.history.lock().current().clone()
    }

    /// Select the entry for a path without running guards
    pub fn resolve(&self, path: &str) -> Option<Match<'_, RouteEntry<H>>> {
        match &self.config.prefix {
            Some(prefix) => {
                let rest = prefix.strip(path)?;
                self.table.find(&rest)
            }
            None => self.table.find(path),
        }
    }

    /// Resolve a location, run its guards and update the current route
    pub async fn navigate(&self, location: &Location) -> Navigation<H> {
        let token = self.generation.begin();

        let Some(Match { route, params, .. }) = self.resolve(&location.path) else {
            tracing::debug!(location = %location, "no route matched");
            self.set_current(None);
            return Navigation::NotFound(location.clone());
        };
        let entry = route.value();

        let detail = NavigationDetail {
            route: route.pattern().source().to_string(),
            location: location.path.clone(),
            querystring: location.querystring.clone(),
            user_data: entry.user_data.clone(),
            params,
        };
        tracing::debug!(
            navigation = token.id(),
            route = %detail.route,
            location = %location,
            guards = entry.conditions.len(),
            "route matched"
        );

        match entry.conditions.evaluate(&detail, &token).await {
            ChainOutcome::Cancelled => Navigation::Superseded,
            ChainOutcome::Failed { index, .. } => {
                tracing::info!(route = %detail.route, guard = index, "conditions failed");
                self.set_current(None);
                self.events
                    .emit(&RouterEvent::ConditionsFailed(detail.clone()));
                Navigation::ConditionsFailed(detail)
            }
            ChainOutcome::Passed => {
                self.events.emit(&RouterEvent::RouteLoading(detail.clone()));

                let loaded = Loaded {
                    handler: entry.handler.clone(),
                    props: entry.props.clone(),
                    detail,
                };
                self.set_current(Some(loaded.clone()));
                tracing::info!(route = %loaded.detail.route, location = %location, "route loaded");
                self.events.emit(&RouterEvent::RouteLoaded(loaded.clone()));
                Navigation::Loaded(loaded)
            }
        }
    }

    /// Add a history entry and navigate to it
    pub async fn push(&self, location: &str) -> Result<Navigation<H>> {
        let location = Location::resolve(location)?;
        self.history.lock().push(location.clone());
        Ok(self.navigate(&location).await)
    }

    /// Overwrite the current history entry and navigate to it
    pub async fn replace(&self, location: &str) -> Result<Navigation<H>> {
        let location = Location::resolve(location)?;
        self.history.lock().replace(location.clone());
        Ok(self.navigate(&location).await)
    }

    /// Go back one history entry and navigate to it
    pub async fn pop(&self) -> Result<Navigation<H>> {
        let location = self
            .history
            .lock()
            .back()
            .cloned()
            .ok_or(Error::HistoryEmpty)?;
        Ok(self.navigate(&location).await)
    }

    fn set_current(&self, loaded: Option<Loaded<H>>) {
        *self.current.write() = loaded;
    }
}
