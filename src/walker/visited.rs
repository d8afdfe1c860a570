// Mon Feb 02 2026 - Alex

use crate::runtime::InstanceHandle;
use ahash::AHashSet;

/// Reference identities already priced during one root's walk.
#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: AHashSet<InstanceHandle>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `handle` was already visited.
    pub fn insert(&mut self, handle: InstanceHandle) -> bool {
        self.seen.insert(handle)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_reports_first_visit_only() {
        let mut visited = VisitedSet::new();
        assert!(visited.is_empty());
        assert!(visited.insert(InstanceHandle(3)));
        assert!(!visited.insert(InstanceHandle(3)));
        assert!(visited.insert(InstanceHandle(4)));
        assert_eq!(visited.len(), 2);
    }
}
