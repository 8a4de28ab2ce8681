//! Per-navigation state and outcomes

use crate::Location;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use waypost_router::Params;

/// Payload handed to every guard and to the router events
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationDetail {
    /// Source of the matched route pattern
    pub route: String,
    /// Path being navigated to, as the table saw it
    pub location: String,
    /// Querystring without the leading `?`
    pub querystring: String,
    /// Custom data attached with `wrap`
    pub user_data: Option<Value>,
    /// Values captured by the route pattern
    pub params: Params,
}

impl NavigationDetail {
    /// First decoded value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        url::form_urlencoded::parse(self.querystring.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

/// A route that passed its guards and is being shown
#[derive(Debug, Clone)]
pub struct Loaded<H> {
    pub handler: H,
    /// Static props from `WrapOptions::props`
    pub props: Option<Value>,
    pub detail: NavigationDetail,
}

/// Result of one navigation attempt
#[derive(Debug, Clone)]
pub enum Navigation<H> {
    /// Guards passed; the handler is now current
    Loaded(Loaded<H>),
    /// A guard returned false or failed
    ConditionsFailed(NavigationDetail),
    /// No entry selected the path (table without catch-all, or outside the prefix)
    NotFound(Location),
    /// A newer navigation started before this one finished
    Superseded,
}

impl<H> Navigation<H> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Navigation::Loaded(_))
    }

    pub fn loaded(&self) -> Option<&Loaded<H>> {
        match self {
            Navigation::Loaded(loaded) => Some(loaded),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Navigation::Loaded(_) => "loaded",
            Navigation::ConditionsFailed(_) => "conditions-failed",
            Navigation::NotFound(_) => "not-found",
            Navigation::Superseded => "superseded",
        }
    }
}

/// Generation counter shared by all navigations of one router
#[derive(Debug, Default, Clone)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a navigation, superseding every earlier token
    pub fn begin(&self) -> NavigationToken {
        let id = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        NavigationToken {
            id,
            generation: Arc::clone(&self.0),
        }
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Identifies one navigation attempt
#[derive(Debug, Clone)]
pub struct NavigationToken {
    id: u64,
    generation: Arc<AtomicU64>,
}

impl NavigationToken {
    /// Token that is never superseded, for evaluating a chain outside a router
    pub fn detached() -> Self {
        Generation::new().begin()
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// False once a newer navigation has begun
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_supersede() {
        let generation = Generation::new();
        let first = generation.begin();
        assert!(first.is_current());

        let second = generation.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert_eq!(second.id(), 2);
        assert_eq!(generation.current(), 2);
    }

    #[test]
    fn test_detached_token() {
        assert!(NavigationToken::detached().is_current());
    }

    #[test]
    fn test_detail_query_param() {
        let detail = NavigationDetail {
            route: "/lucky".to_string(),
            location: "/lucky".to_string(),
            querystring: "pass=1".to_string(),
            user_data: None,
            params: Params::default(),
        };
        assert_eq!(detail.query_param("pass"), Some("1".to_string()));
        assert_eq!(detail.query_param("other"), None);
    }
}
