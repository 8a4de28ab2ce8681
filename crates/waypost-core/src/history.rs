//! In-memory navigation history

use crate::Location;

/// Stack of visited locations with a cursor
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    index: usize,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Location::root(), 100)
    }
}

impl History {
    pub fn new(initial: Location, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            limit: limit.max(1),
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    /// Add a new entry, dropping any forward entries
    pub fn push(&mut self, location: Location) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }
        self.index = self.entries.len() - 1;
    }

    /// Overwrite the current entry
    pub fn replace(&mut self, location: Location) {
        self.entries[self.index] = location;
    }

    /// Step back, returning the new current entry
    pub fn back(&mut self) -> Option<&Location> {
        self.index = self.index.checked_sub(1)?;
        Some(self.current())
    }

    /// Step forward, returning the new current entry
    pub fn forward(&mut self) -> Option<&Location> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(path: &str) -> Location {
        Location::parse(path).unwrap()
    }

    #[test]
    fn test_push_back_forward() {
        let mut history = History::default();
        history.push(loc("/a"));
        history.push(loc("/b"));
        assert_eq!(history.current().path, "/b");

        assert_eq!(history.back().unwrap().path, "/a");
        assert_eq!(history.back().unwrap().path, "/");
        assert!(history.back().is_none());
        assert_eq!(history.current().path, "/");

        assert_eq!(history.forward().unwrap().path, "/a");
    }

    #[test]
    fn test_push_drops_forward_entries() {
        let mut history = History::default();
        history.push(loc("/a"));
        history.push(loc("/b"));
        history.back();
        history.push(loc("/c"));

        assert_eq!(history.len(), 3);
        assert!(history.forward().is_none());
        assert_eq!(history.back().unwrap().path, "/a");
    }

    #[test]
    fn test_replace() {
        let mut history = History::default();
        history.push(loc("/a"));
        history.replace(loc("/b"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.current().path, "/b");
    }

    #[test]
    fn test_limit() {
        let mut history = History::new(Location::root(), 2);
        history.push(loc("/a"));
        history.push(loc("/b"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.back().unwrap().path, "/a");
        assert!(history.back().is_none());
    }
}
