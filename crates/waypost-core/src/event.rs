//! Router events
//!
//! Listeners observe what the router did with each navigation:
//! - `RouteLoading` once the guards passed, before the route becomes current
//! - `RouteLoaded` with the handler, props and detail
//! - `ConditionsFailed` with the detail when a guard blocked navigation

use crate::navigation::{Loaded, NavigationDetail};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Event emitted by a router
#[derive(Debug, Clone)]
pub enum RouterEvent<H> {
    RouteLoading(NavigationDetail),
    RouteLoaded(Loaded<H>),
    ConditionsFailed(NavigationDetail),
}

impl<H> RouterEvent<H> {
    pub fn name(&self) -> &'static str {
        match self {
            RouterEvent::RouteLoading(_) => "routeLoading",
            RouterEvent::RouteLoaded(_) => "routeLoaded",
            RouterEvent::ConditionsFailed(_) => "conditionsFailed",
        }
    }

    pub fn detail(&self) -> &NavigationDetail {
        match self {
            RouterEvent::RouteLoading(detail) | RouterEvent::ConditionsFailed(detail) => detail,
            RouterEvent::RouteLoaded(loaded) => &loaded.detail,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<H> = Arc<dyn Fn(&RouterEvent<H>) + Send + Sync>;

/// Listener registry
pub struct EventBus<H> {
    listeners: RwLock<Vec<(SubscriptionId, Listener<H>)>>,
    next_id: AtomicU64,
}

impl<H> Default for EventBus<H> {
    fn default() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl<H> std::fmt::Debug for EventBus<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.read().len())
            .finish()
    }
}

impl<H> EventBus<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; listeners run in subscription order
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&RouterEvent<H>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener, returning whether it was registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn emit(&self, event: &RouterEvent<H>) {
        // Snapshot so listeners may subscribe or unsubscribe while handling
        let listeners: Vec<Listener<H>> = self
            .listeners
            .read()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        tracing::trace!(event = event.name(), listeners = listeners.len(), "emit");
        for listener in listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use waypost_router::Params;

    fn detail() -> NavigationDetail {
        NavigationDetail {
            route: "/lucky".to_string(),
            location: "/lucky".to_string(),
            querystring: String::new(),
            user_data: Some(serde_json::json!({"foo": "bar"})),
            params: Params::default(),
        }
    }

    #[test]
    fn test_listeners_in_order() {
        let bus: EventBus<&str> = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for tag in ["a", "b"] {
            let seen = Arc::clone(&seen);
            bus.subscribe(move |event| seen.lock().push((tag, event.name())));
        }

        bus.emit(&RouterEvent::ConditionsFailed(detail()));
        assert_eq!(
            *seen.lock(),
            vec![("a", "conditionsFailed"), ("b", "conditionsFailed")]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let bus: EventBus<&str> = EventBus::new();
        let count = Arc::new(AtomicU64::new(0));
        let id = {
            let count = Arc::clone(&count);
            bus.subscribe(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };

        bus.emit(&RouterEvent::RouteLoading(detail()));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(&RouterEvent::RouteLoading(detail()));

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_event_carries_user_data() {
        let event: RouterEvent<&str> = RouterEvent::ConditionsFailed(detail());
        assert_eq!(
            event.detail().user_data,
            Some(serde_json::json!({"foo": "bar"}))
        );
    }
}
