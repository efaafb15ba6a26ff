//! Favorite selection.

use std::collections::BTreeSet;

use crate::types::DogId;

/// Label for a dog that is not in the selection.
pub const FAVORITE_LABEL: &str = "Favorite";

/// Label for a dog that is already in the selection.
pub const UNFAVORITE_LABEL: &str = "Unfavorite";

/// The set of dogs a user has marked as favorite.
///
/// Membership is independent of which page is displayed. Iteration order is
/// the ids' lexical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<DogId>,
}

impl SelectionSet {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns the new membership.
    pub fn toggle(&mut self, id: DogId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Returns true if `id` is selected.
    pub fn contains(&self, id: &DogId) -> bool {
        self.ids.contains(id)
    }

    /// Button label for `id`, derived from membership.
    pub fn label(&self, id: &DogId) -> &'static str {
        if self.contains(id) {
            UNFAVORITE_LABEL
        } else {
            FAVORITE_LABEL
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DogId> {
        self.ids.iter()
    }

    /// Snapshot of the selected ids.
    pub fn to_vec(&self) -> Vec<DogId> {
        self.ids.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl FromIterator<DogId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = DogId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
