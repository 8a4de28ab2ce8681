//! Wrapped routes
//!
//! A table value is a [`RouteEntry`]: the handler to show, optional custom
//! data forwarded to router events, optional static props and the guards
//! that must pass first. Bare handlers convert with `From`.

use crate::guard::{Guard, GuardChain};
use crate::{Error, Result};
use serde_json::Value;

/// Handler plus the data and guards bound to it
#[derive(Debug, Clone)]
pub struct RouteEntry<H> {
    pub handler: H,
    pub user_data: Option<Value>,
    pub props: Option<Value>,
    pub conditions: GuardChain,
}

impl<H> RouteEntry<H> {
    /// Entry with no data and no guards
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            user_data: None,
            props: None,
            conditions: GuardChain::new(),
        }
    }

    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }
}

impl<H> From<H> for RouteEntry<H> {
    fn from(handler: H) -> Self {
        Self::new(handler)
    }
}

/// Bind custom data and guards to a handler
///
/// `data` is forwarded unchanged to the events describing this route and the
/// guards run in the order given.
///
/// # Example
/// ```
/// use serde_json::json;
/// use waypost_core::{wrap, Guard};
///
/// let entry = wrap("lucky", Some(json!({"foo": "bar"})), [
///     Guard::new(|d| d.querystring != "pass=0"),
///     Guard::new(|_| true),
/// ]);
/// assert_eq!(entry.conditions.len(), 2);
/// ```
pub fn wrap<H, I>(handler: H, data: Option<Value>, guards: I) -> RouteEntry<H>
where
    I: IntoIterator<Item = Guard>,
{
    RouteEntry {
        handler,
        user_data: data,
        props: None,
        conditions: guards.into_iter().collect(),
    }
}

/// Builder form of [`wrap`]
#[derive(Debug, Clone)]
pub struct WrapOptions<H> {
    component: Option<H>,
    user_data: Option<Value>,
    props: Option<Value>,
    conditions: GuardChain,
}

impl<H> Default for WrapOptions<H> {
    fn default() -> Self {
        Self {
            component: None,
            user_data: None,
            props: None,
            conditions: GuardChain::new(),
        }
    }
}

impl<H> WrapOptions<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn component(mut self, component: H) -> Self {
        self.component = Some(component);
        self
    }

    pub fn user_data(mut self, data: Value) -> Self {
        self.user_data = Some(data);
        self
    }

    /// Static props handed to the component when it is shown
    pub fn props(mut self, props: Value) -> Self {
        self.props = Some(props);
        self
    }

    /// Append one guard
    pub fn condition(mut self, guard: Guard) -> Self {
        self.conditions.push(guard);
        self
    }

    pub fn build(self) -> Result<RouteEntry<H>> {
        let handler = self.component.ok_or(Error::MissingComponent)?;
        Ok(RouteEntry {
            handler,
            user_data: self.user_data,
            props: self.props,
            conditions: self.conditions,
        })
    }
}
