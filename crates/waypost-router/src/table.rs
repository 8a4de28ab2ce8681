//! Ordered route table
//!
//! Matching is first-match-wins in registration order, so a specific route
//! must come before any wildcard that would also accept its path, and the
//! catch-all must be the last entry. [`RouteTable::validate`] checks both.
//!
//! Tables are usually built from one of two representations:
//! - [`RouteDict`]: string keys in insertion order, like a plain object
//! - [`RouteMap`]: explicitly ordered keys that may be regular expressions

use crate::pattern::{MatchOptions, Matcher, Params, Pattern};
use crate::{Error, Result};
use indexmap::IndexMap;

/// Dictionary representation: path-string keys in insertion order
///
/// Re-inserting a key keeps its original position.
pub type RouteDict<T> = IndexMap<String, T>;

/// A compiled table entry
#[derive(Debug, Clone)]
pub struct Route<T> {
    pattern: Pattern,
    matcher: Matcher,
    value: T,
}

impl<T> Route<T> {
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

/// Route match result
#[derive(Debug)]
pub struct Match<'a, T> {
    /// Position of the selected entry
    pub index: usize,
    /// The selected entry
    pub route: &'a Route<T>,
    /// Captured values
    pub params: Params,
}

impl<'a, T> Match<'a, T> {
    pub fn value(&self) -> &'a T {
        &self.route.value
    }
}

/// Ordered collection of (pattern, value) entries
#[derive(Debug, Clone)]
pub struct RouteTable<T> {
    routes: Vec<Route<T>>,
    options: MatchOptions,
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RouteTable<T> {
    /// Create an empty table with default match options
    pub fn new() -> Self {
        Self::with_options(MatchOptions::default())
    }

    pub fn with_options(options: MatchOptions) -> Self {
        Self {
            routes: Vec::new(),
            options,
        }
    }

    /// Append an entry
    ///
    /// # Example
    /// ```
    /// use waypost_router::RouteTable;
    ///
    /// let mut table = RouteTable::new();
    /// table.insert("/wild/data", 1).unwrap();
    /// table.insert("/wild/*", 2).unwrap();
    ///
    /// assert_eq!(*table.find("/wild/data").unwrap().value(), 1);
    /// assert_eq!(*table.find("/wild/other").unwrap().value(), 2);
    /// ```
    pub fn insert(&mut self, pattern: impl Into<Pattern>, value: T) -> Result<()> {
        let pattern = pattern.into();
        let matcher = pattern.compile(&self.options)?;
        self.routes.push(Route {
            pattern,
            matcher,
            value,
        });
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn route(mut self, pattern: impl Into<Pattern>, value: T) -> Result<Self> {
        self.insert(pattern, value)?;
        Ok(self)
    }

    /// Select the first entry accepting `path`
    pub fn find(&self, path: &str) -> Option<Match<'_, T>> {
        self.routes.iter().enumerate().find_map(|(index, route)| {
            route.matcher.captures(path).map(|params| Match {
                index,
                route,
                params,
            })
        })
    }

    /// Check ordering defects that would make entries unreachable
    ///
    /// - a catch-all followed by other entries
    /// - a literal path already accepted by an earlier entry
    pub fn validate(&self) -> Result<()> {
        for (index, route) in self.routes.iter().enumerate() {
            if route.pattern.is_catch_all() {
                if let Some(next) = self.routes.get(index + 1) {
                    return Err(Error::MisplacedCatchAll {
                        pattern: route.pattern.to_string(),
                        index,
                        following: next.pattern.to_string(),
                    });
                }
            }

            if let Pattern::Literal(path) = &route.pattern {
                let probe = if path.is_empty() { "/" } else { path.as_str() };
                if let Some(earlier) = self.routes[..index]
                    .iter()
                    .find(|r| r.matcher.is_match(probe))
                {
                    return Err(Error::ShadowedRoute {
                        pattern: route.pattern.to_string(),
                        index,
                        shadowed_by: earlier.pattern.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// [`validate`](Self::validate), additionally requiring a catch-all
    pub fn validate_strict(&self) -> Result<()> {
        self.validate()?;
        if self.has_catch_all() {
            Ok(())
        } else {
            Err(Error::MissingCatchAll)
        }
    }

    pub fn has_catch_all(&self) -> bool {
        self.routes.iter().any(|r| r.pattern.is_catch_all())
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route<T>> {
        self.routes.iter()
    }

    /// Build from the dictionary representation
    pub fn from_dict(dict: RouteDict<T>, options: MatchOptions) -> Result<Self> {
        let mut table = Self::with_options(options);
        for (path, value) in dict {
            table.insert(Pattern::parse(path), value)?;
        }
        Ok(table)
    }

    /// Build from the ordered-map representation
    pub fn from_map(map: RouteMap<T>, options: MatchOptions) -> Result<Self> {
        let mut table = Self::with_options(options);
        for (pattern, value) in map.entries {
            table.insert(pattern, value)?;
        }
        Ok(table)
    }
}

impl<'a, T> IntoIterator for &'a RouteTable<T> {
    type Item = &'a Route<T>;
    type IntoIter = std::slice::Iter<'a, Route<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

impl<T> TryFrom<RouteDict<T>> for RouteTable<T> {
    type Error = Error;

    fn try_from(dict: RouteDict<T>) -> Result<Self> {
        Self::from_dict(dict, MatchOptions::default())
    }
}

impl<T> TryFrom<RouteMap<T>> for RouteTable<T> {
    type Error = Error;

    fn try_from(map: RouteMap<T>) -> Result<Self> {
        Self::from_map(map, MatchOptions::default())
    }
}

/// Explicitly ordered map whose keys may be regular expressions
#[derive(Debug, Clone)]
pub struct RouteMap<T> {
    entries: Vec<(Pattern, T)>,
}

impl<T> Default for RouteMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RouteMap<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set the value for a key
    ///
    /// An existing key keeps its position and only has its value replaced.
    pub fn set(&mut self, pattern: impl Into<Pattern>, value: T) -> &mut Self {
        let pattern = pattern.into();
        match self.entries.iter_mut().find(|(p, _)| p.same_key(&pattern)) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((pattern, value)),
        }
        self
    }

    pub fn get(&self, pattern: &Pattern) -> Option<&T> {
        self.entries
            .iter()
            .find(|(p, _)| p.same_key(pattern))
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
