//! Hash-based locations
//!
//! The routed location lives in the URL fragment: `https://host/#/lucky?pass=1`
//! routes `/lucky` with querystring `pass=1`.

use crate::{Error, Result};
use std::fmt;

/// Path plus querystring (without the leading `?`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub path: String,
    pub querystring: String,
}

impl Location {
    /// Parse `/path?query`
    pub fn parse(location: &str) -> Result<Self> {
        let (path, querystring) = match location.split_once('?') {
            Some((path, query)) => (path, query),
            None => (location, ""),
        };
        let path = if path.is_empty() { "/" } else { path };
        if !path.starts_with('/') {
            return Err(Error::InvalidLocation(location.to_string()));
        }
        Ok(Self {
            path: path.to_string(),
            querystring: querystring.to_string(),
        })
    }

    /// Extract the routed location from a full href
    ///
    /// Everything after the first `#/` is the location; without one the
    /// location is `/`.
    ///
    /// # Example
    /// ```
    /// use waypost_core::Location;
    ///
    /// let loc = Location::from_href("https://example.com/#/lucky?pass=1");
    /// assert_eq!(loc.path, "/lucky");
    /// assert_eq!(loc.querystring, "pass=1");
    /// ```
    pub fn from_href(href: &str) -> Self {
        match href.find("#/") {
            // the remainder always starts with '/'
            Some(pos) => Self::parse(&href[pos + 1..]).unwrap_or_else(|_| Self::root()),
            None => Self::root(),
        }
    }

    /// Accept either a bare location or a full href
    pub fn resolve(input: &str) -> Result<Self> {
        if input.contains("#/") {
            Ok(Self::from_href(input))
        } else {
            Self::parse(input)
        }
    }

    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
            querystring: String::new(),
        }
    }

    /// First decoded value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        url::form_urlencoded::parse(self.querystring.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// Whether the query has the key, with or without a value
    pub fn has_query_param(&self, name: &str) -> bool {
        url::form_urlencoded::parse(self.querystring.as_bytes()).any(|(k, _)| k == name)
    }

    /// Href fragment for this location, e.g. `#/lucky?pass=1`
    pub fn to_hash(&self) -> String {
        format!("#{self}")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.querystring.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}?{}", self.path, self.querystring)
        }
    }
}

impl std::str::FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let loc = Location::parse("/lucky?pass=1").unwrap();
        assert_eq!(loc.path, "/lucky");
        assert_eq!(loc.querystring, "pass=1");

        let loc = Location::parse("/wild/data").unwrap();
        assert_eq!(loc.querystring, "");

        assert_eq!(Location::parse("").unwrap().path, "/");
        assert_eq!(Location::parse("?x=1").unwrap().path, "/");
        assert!(matches!(
            Location::parse("relative"),
            Err(Error::InvalidLocation(_))
        ));
    }

    #[test]
    fn test_from_href() {
        let loc = Location::from_href("http://localhost:5000/#/hello/Jane?a=b&c");
        assert_eq!(loc.path, "/hello/Jane");
        assert_eq!(loc.querystring, "a=b&c");

        assert_eq!(Location::from_href("http://localhost:5000/"), Location::root());
        assert_eq!(
            Location::from_href("http://localhost:5000/?routemap=1"),
            Location::root()
        );
    }

    #[test]
    fn test_query_param() {
        let loc = Location::parse("/lucky?pass=1&name=J%C3%BCrgen&routemap").unwrap();
        assert_eq!(loc.query_param("pass"), Some("1".to_string()));
        assert_eq!(loc.query_param("name"), Some("Jürgen".to_string()));
        assert_eq!(loc.query_param("routemap"), Some(String::new()));
        assert!(loc.has_query_param("routemap"));
        assert!(!loc.has_query_param("missing"));
    }

    #[test]
    fn test_display() {
        let loc = Location::parse("/lucky?pass=0").unwrap();
        assert_eq!(loc.to_string(), "/lucky?pass=0");
        assert_eq!(loc.to_hash(), "#/lucky?pass=0");
        assert_eq!("/x".parse::<Location>().unwrap().to_string(), "/x");
    }
}
