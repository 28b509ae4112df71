//! Multi-select state (ctrl/cmd-click).

use std::collections::BTreeSet;

use crate::models::EntryId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<EntryId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &EntryId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.ids.contains(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntryId> {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut selection = SelectionSet::new();
        let a = EntryId::new("1");

        assert!(selection.toggle(&a));
        assert!(selection.contains(&a));
        assert!(!selection.toggle(&a));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut selection = SelectionSet::new();
        selection.toggle(&EntryId::new("1"));
        selection.toggle(&EntryId::new("abc"));
        assert_eq!(selection.len(), 2);

        selection.clear();
        assert_eq!(selection.iter().count(), 0);
    }
}
