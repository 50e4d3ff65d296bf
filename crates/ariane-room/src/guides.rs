//! The connected-guide directory.
//!
//! Tracks every connection that announced itself as a voice/chat guide via
//! `joinAsGuide`. Orthogonal to rooms: a connection may be in a room, in
//! this directory, both, or neither.

use std::collections::HashMap;

use ariane_protocol::ClientId;

/// Connection identity → announced guide name.
pub struct GuideDirectory {
    entries: HashMap<ClientId, String>,
    /// Announcement order, for a stable `guidesUpdate` payload.
    order: Vec<ClientId>,
}

impl GuideDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Records (or renames) a guide announcement. Re-announcing keeps the
    /// connection's original position in the listing.
    pub fn announce(&mut self, id: ClientId, name: impl Into<String>) {
        if !self.entries.contains_key(&id) {
            self.order.push(id);
        }
        self.entries.insert(id, name.into());
    }

    /// Removes an entry, returning the announced name if there was one.
    pub fn remove(&mut self, id: ClientId) -> Option<String> {
        let removed = self.entries.remove(&id);
        if removed.is_some() {
            self.order.retain(|o| *o != id);
        }
        removed
    }

    /// Every announced name, in announcement order — the `guidesUpdate`
    /// payload.
    pub fn names(&self) -> Vec<String> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .cloned()
            .collect()
    }

    /// Returns the number of announced guides.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nobody has announced.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GuideDirectory {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_follow_announcement_order() {
        let mut dir = GuideDirectory::new();
        dir.announce(ClientId(3), "Charlie");
        dir.announce(ClientId(1), "Alex");
        dir.announce(ClientId(2), "Sam");

        assert_eq!(dir.names(), vec!["Charlie", "Alex", "Sam"]);
    }

    #[test]
    fn test_reannounce_renames_in_place() {
        let mut dir = GuideDirectory::new();
        dir.announce(ClientId(1), "Alex");
        dir.announce(ClientId(2), "Sam");
        dir.announce(ClientId(1), "Alexandre");

        assert_eq!(dir.names(), vec!["Alexandre", "Sam"]);
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn test_remove_returns_name_and_forgets_entry() {
        let mut dir = GuideDirectory::new();
        dir.announce(ClientId(1), "Alex");

        assert_eq!(dir.remove(ClientId(1)), Some("Alex".into()));
        assert_eq!(dir.remove(ClientId(1)), None);
        assert!(dir.is_empty());
    }
}
