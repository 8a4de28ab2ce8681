//! Path patterns and their compiled matchers
//!
//! Every route key is either a path string or a regular expression. Path
//! strings are compiled into an anchored regex plus an ordered key list, so
//! both kinds share the same [`Matcher`] at lookup time.
//!
//! ## Path Syntax
//! - `/about` - static segment, matched literally
//! - `:name` - named parameter (captures one segment)
//! - `:name?` - optional parameter (may be absent)
//! - `:name.ext` - parameter followed by a literal suffix
//! - `*` or `*name` - wildcard (captures the remainder, key `wild` when unnamed)

use crate::{Error, Result};
use percent_encoding::percent_decode_str;
use regex::{Regex, RegexBuilder};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;

/// Key used for unnamed wildcard captures
pub const WILDCARD_KEY: &str = "wild";

/// Route pattern
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Only static segments: `/`, `/wild/data`
    Literal(String),
    /// At least one named parameter: `/hello/:first/:last?`
    Parameterized(String),
    /// Contains a wildcard segment: `/wild/*`, `*`
    Wildcard(String),
    /// Regular expression, used verbatim
    Regex(Regex),
}

impl Pattern {
    /// Classify a path string
    ///
    /// # Example
    /// ```
    /// use waypost_router::Pattern;
    ///
    /// assert!(matches!(Pattern::parse("/wild/data"), Pattern::Literal(_)));
    /// assert!(matches!(Pattern::parse("/hello/:first"), Pattern::Parameterized(_)));
    /// assert!(matches!(Pattern::parse("/wild/*"), Pattern::Wildcard(_)));
    /// ```
    pub fn parse(path: impl Into<String>) -> Self {
        let path = path.into();
        let mut has_param = false;
        for segment in path.split('/') {
            if segment.starts_with('*') {
                return Pattern::Wildcard(path);
            }
            if segment.starts_with(':') {
                has_param = true;
            }
        }
        if has_param {
            Pattern::Parameterized(path)
        } else {
            Pattern::Literal(path)
        }
    }

    /// Build a regular-expression pattern
    pub fn regex(expr: &str) -> Result<Self> {
        Ok(Pattern::Regex(Regex::new(expr)?))
    }

    /// Original source text of the pattern
    pub fn source(&self) -> &str {
        match self {
            Pattern::Literal(s) | Pattern::Parameterized(s) | Pattern::Wildcard(s) => s,
            Pattern::Regex(re) => re.as_str(),
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, Pattern::Regex(_))
    }

    /// True for the bare wildcard that accepts every path
    pub fn is_catch_all(&self) -> bool {
        matches!(self, Pattern::Wildcard(s) if s == "*" || s == "/*")
    }

    /// Whether two patterns would occupy the same key of an ordered map
    pub fn same_key(&self, other: &Pattern) -> bool {
        self.is_regex() == other.is_regex() && self.source() == other.source()
    }

    /// Compile into a matcher
    pub fn compile(&self, options: &MatchOptions) -> Result<Matcher> {
        match self {
            Pattern::Regex(re) => Ok(Matcher {
                regex: re.clone(),
                keys: None,
            }),
            Pattern::Literal(path) | Pattern::Parameterized(path) | Pattern::Wildcard(path) => {
                let (source, keys) = compile_path(path, options)?;
                let regex = RegexBuilder::new(&source)
                    .case_insensitive(options.case_insensitive)
                    .build()?;
                Ok(Matcher {
                    regex,
                    keys: Some(keys),
                })
            }
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Regex(re) => write!(f, "/{}/", re.as_str()),
            other => f.write_str(other.source()),
        }
    }
}

impl From<&str> for Pattern {
    fn from(path: &str) -> Self {
        Pattern::parse(path)
    }
}

impl From<String> for Pattern {
    fn from(path: String) -> Self {
        Pattern::parse(path)
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Pattern::Regex(re)
    }
}

/// Path-string compilation options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Ignore ASCII/Unicode case when matching static segments (default: true)
    pub case_insensitive: bool,
    /// Accept any path that continues past the pattern at a `/` boundary (default: false)
    pub loose: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            loose: false,
        }
    }
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_sensitive(mut self) -> Self {
        self.case_insensitive = false;
        self
    }

    pub fn loose(mut self) -> Self {
        self.loose = true;
        self
    }
}

/// Translate a path string into regex source and its capture keys
fn compile_path(path: &str, options: &MatchOptions) -> Result<(String, Vec<String>)> {
    let mut keys = Vec::new();
    let mut source = String::from("^");

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if let Some(name) = segment.strip_prefix('*') {
            keys.push(if name.is_empty() { WILDCARD_KEY } else { name }.to_string());
            source.push_str("/(.*)");
        } else if let Some(body) = segment.strip_prefix(':') {
            let optional_at = body.find('?');
            let ext_at = body.find('.');
            let name = &body[..optional_at.or(ext_at).unwrap_or(body.len())];
            if name.is_empty() {
                return Err(Error::InvalidPattern {
                    pattern: path.to_string(),
                    reason: format!("parameter segment {segment:?} has no name"),
                });
            }
            keys.push(name.to_string());

            match (optional_at.is_some(), ext_at) {
                (true, None) => source.push_str("(?:/([^/]+?))?"),
                (optional, Some(ext)) => {
                    source.push_str("/([^/]+?)");
                    if optional {
                        source.push('?');
                    }
                    source.push_str(&regex::escape(&body[ext..]));
                }
                (false, None) => source.push_str("/([^/]+?)"),
            }
        } else {
            source.push('/');
            source.push_str(&regex::escape(segment));
        }
    }

    source.push_str(if options.loose { "(?:$|/)" } else { "/?$" });
    Ok((source, keys))
}

/// Compiled pattern
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    /// Capture names in group order, `None` for regex patterns
    keys: Option<Vec<String>>,
}

impl Matcher {
    /// Test a path without extracting captures
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match a path and extract its captures
    ///
    /// Named values are percent-decoded; empty, absent and undecodable
    /// values come back as `None`.
    pub fn captures(&self, path: &str) -> Option<Params> {
        let caps = self.regex.captures(path)?;
        match &self.keys {
            None => Some(Params::Positional(
                caps.iter()
                    .map(|group| group.map(|m| m.as_str().to_string()))
                    .collect(),
            )),
            Some(keys) => {
                let named = keys
                    .iter()
                    .enumerate()
                    .map(|(i, key)| {
                        let value = caps
                            .get(i + 1)
                            .map(|m| m.as_str())
                            .filter(|raw| !raw.is_empty())
                            .and_then(decode_param);
                        (key.clone(), value)
                    })
                    .collect();
                Some(Params::Named(named))
            }
        }
    }

    /// Capture keys in order, `None` for regex patterns
    pub fn keys(&self) -> Option<&[String]> {
        self.keys.as_deref()
    }

    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }
}

fn decode_param(raw: &str) -> Option<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
        .filter(|s| !s.is_empty())
}

/// Values captured by a match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Params {
    /// (key, value) pairs in pattern order, for path-string patterns
    Named(SmallVec<[(String, Option<String>); 4]>),
    /// Regex groups, index 0 being the whole match
    Positional(Vec<Option<String>>),
}

impl Default for Params {
    fn default() -> Self {
        Params::Named(SmallVec::new())
    }
}

impl Params {
    /// Value of a named parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            Params::Named(pairs) => pairs
                .iter()
                .find(|(k, _)| k == key)
                .and_then(|(_, v)| v.as_deref()),
            Params::Positional(_) => None,
        }
    }

    /// Value of a capture group, 1-based like regex groups
    ///
    /// For named params `group(1)` is the first key's value.
    pub fn group(&self, index: usize) -> Option<&str> {
        match self {
            Params::Named(pairs) => index
                .checked_sub(1)
                .and_then(|i| pairs.get(i))
                .and_then(|(_, v)| v.as_deref()),
            Params::Positional(groups) => groups.get(index).and_then(|g| g.as_deref()),
        }
    }

    /// Whether the pattern declares this key (present or not)
    pub fn contains_key(&self, key: &str) -> bool {
        match self {
            Params::Named(pairs) => pairs.iter().any(|(k, _)| k == key),
            Params::Positional(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Params::Named(pairs) => pairs.len(),
            Params::Positional(groups) => groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Present named values as a HashMap
    pub fn to_map(&self) -> HashMap<String, String> {
        match self {
            Params::Named(pairs) => pairs
                .iter()
                .filter_map(|(k, v)| v.clone().map(|v| (k.clone(), v)))
                .collect(),
            Params::Positional(groups) => groups
                .iter()
                .enumerate()
                .filter_map(|(i, g)| g.clone().map(|v| (i.to_string(), v)))
                .collect(),
        }
    }
}

/// Leading part of the path consumed before a nested table sees it
#[derive(Debug, Clone)]
pub enum Prefix {
    Literal(String),
    Regex(Regex),
}

impl Prefix {
    pub fn regex(expr: &str) -> Result<Self> {
        Ok(Prefix::Regex(Regex::new(expr)?))
    }

    /// Remove the prefix, returning the remainder (`/` when nothing is left)
    ///
    /// Returns `None` when the path is outside the prefix. A literal prefix
    /// must end at a segment boundary: `/nested` applies to `/nested/a`
    /// but not to `/nestedfoo`.
    pub fn strip(&self, path: &str) -> Option<String> {
        let rest = match self {
            Prefix::Literal(prefix) => {
                let rest = path.strip_prefix(prefix.as_str())?;
                if !rest.is_empty() && !rest.starts_with('/') && !prefix.ends_with('/') {
                    return None;
                }
                rest
            }
            Prefix::Regex(re) => {
                let m = re.find(path)?;
                if m.start() != 0 || m.as_str().is_empty() {
                    return None;
                }
                &path[m.end()..]
            }
        };
        Some(if rest.is_empty() {
            "/".to_string()
        } else if rest.starts_with('/') {
            rest.to_string()
        } else {
            format!("/{rest}")
        })
    }
}

impl From<&str> for Prefix {
    fn from(prefix: &str) -> Self {
        Prefix::Literal(prefix.to_string())
    }
}
