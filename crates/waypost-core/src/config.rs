//! Router configuration

use waypost_router::Prefix;

/// How strictly a table is checked when a router is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Accept any table
    Off,
    /// Reject misplaced catch-alls and shadowed literal routes
    Ordering,
    /// `Ordering` plus a required catch-all entry
    Strict,
}

/// Router configuration
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Path prefix consumed before matching (nested routers)
    pub prefix: Option<Prefix>,
    /// Table checks at construction (default: Ordering)
    pub validation: Validation,
    /// Maximum retained history entries (default: 100)
    pub history_limit: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            validation: Validation::Ordering,
            history_limit: 100,
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<Prefix>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    pub fn strict(self) -> Self {
        self.validation(Validation::Strict)
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }
}
