//! Active-link detection
//!
//! A link is active when the current location matches its path pattern.
//! Loose matching lets child locations activate their parent link, so a
//! `/brand` link stays highlighted on `/brand/logo`.

use crate::{Location, Result};
use waypost_router::{Error as RouterError, MatchOptions, Matcher, Pattern};

/// Path pattern plus the CSS classes toggled on a link
#[derive(Debug, Clone)]
pub struct ActiveLink {
    path: String,
    matcher: Matcher,
    class_name: String,
    inactive_class_name: Option<String>,
}

impl ActiveLink {
    /// Link active on `path` and on any location below it
    pub fn new(path: &str) -> Result<Self> {
        Self::build(path, MatchOptions::new().loose())
    }

    /// Link active only when the location matches `path` itself
    pub fn exact(path: &str) -> Result<Self> {
        Self::build(path, MatchOptions::new())
    }

    fn build(path: &str, options: MatchOptions) -> Result<Self> {
        if !(path.starts_with('/') || path.starts_with('*')) {
            return Err(RouterError::InvalidPattern {
                pattern: path.to_string(),
                reason: "link path must start with '/' or '*'".to_string(),
            }
            .into());
        }
        Ok(Self {
            path: path.to_string(),
            matcher: Pattern::parse(path).compile(&options)?,
            class_name: "active".to_string(),
            inactive_class_name: None,
        })
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn inactive_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.inactive_class_name = Some(class_name.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_active(&self, location: &Location) -> bool {
        self.matcher.is_match(&location.path)
    }

    /// Class to apply for the given location
    pub fn class_for(&self, location: &Location) -> Option<&str> {
        if self.is_active(location) {
            Some(self.class_name.as_str())
        } else {
            self.inactive_class_name.as_deref()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn loc(path: &str) -> Location {
        Location::parse(path).unwrap()
    }

    #[test]
    fn test_children_activate_parent() {
        let link = ActiveLink::new("/brand").unwrap();
        assert!(link.is_active(&loc("/brand")));
        assert!(link.is_active(&loc("/brand/logo")));
        assert!(!link.is_active(&loc("/brandnew")));
        assert!(!link.is_active(&loc("/")));
    }

    #[test]
    fn test_exact() {
        let link = ActiveLink::exact("/hello/:first").unwrap();
        assert!(link.is_active(&loc("/hello/Jane")));
        assert!(!link.is_active(&loc("/hello/Jane/Doe")));
    }

    #[test]
    fn test_classes() {
        let link = ActiveLink::new("/wild")
            .unwrap()
            .class_name("selected")
            .inactive_class_name("dim");
        assert_eq!(link.class_for(&loc("/wild/x")), Some("selected"));
        assert_eq!(link.class_for(&loc("/lucky")), Some("dim"));

        let plain = ActiveLink::new("/wild").unwrap();
        assert_eq!(plain.class_for(&loc("/lucky")), None);
        assert_eq!(plain.class_for(&loc("/wild")), Some("active"));
    }

    #[test]
    fn test_invalid_path() {
        assert!(matches!(
            ActiveLink::new("brand"),
            Err(Error::Router(RouterError::InvalidPattern { .. }))
        ));
    }
}
