use std::collections::BTreeSet;

use crate::RecordId;

/// The set of selected record ids.
///
/// Always a subset of the ids the server last reported: `reconcile` runs in
/// the same state transition that replaces the dataset, so a stale selection
/// can never survive a poll.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSet {
    ids: BTreeSet<RecordId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of one id.
    pub fn toggle(&mut self, id: RecordId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Adds every id of the currently visible page. Rows on other pages are
    /// untouched.
    pub fn select_all_visible(&mut self, visible: impl IntoIterator<Item = RecordId>) {
        self.ids.extend(visible);
    }

    /// Empties the selection.
    pub fn clear_all(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    /// Drops every id that is absent from `known`. Never adds ids.
    pub fn reconcile(&mut self, known: &BTreeSet<RecordId>) {
        self.ids.retain(|id| known.contains(id));
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.ids.iter().copied().collect()
    }
}
