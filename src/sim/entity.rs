//! Entity identifiers
//!
//! An entity is nothing but an id; having a component means having an entry
//! under that id in the component's table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque entity identifier. Never reused within a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id issuer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityAllocator {
    next_id: u32,
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Issue a fresh id, strictly greater than every id issued before
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u32 {
        self.next_id - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_strictly_increasing() {
        let mut alloc = EntityAllocator::new();
        let ids: Vec<_> = (0..100).map(|_| alloc.allocate()).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(alloc.issued(), 100);
    }

    #[test]
    fn test_display() {
        let mut alloc = EntityAllocator::new();
        assert_eq!(alloc.allocate().to_string(), "#1");
    }
}
