//! Row selection.

use crate::entity::EntityId;
use std::collections::BTreeSet;

/// A set of selected entity ids.
///
/// The controller keeps it a subset of the filtered rows; on its own it
/// is a plain ordered set with the toggle semantics the listing screens use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<EntityId>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the selection of one id. Returns true if it is now selected.
    pub fn toggle(&mut self, id: EntityId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// True if `id` is selected.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.ids.contains(id)
    }

    /// True if every id in `ids` is selected. Vacuously false for no ids,
    /// so an empty result set never shows as "all selected".
    pub fn contains_all<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a EntityId>,
    {
        let mut any = false;
        for id in ids {
            any = true;
            if !self.ids.contains(id) {
                return false;
            }
        }
        any
    }

    /// Replaces the selection with `ids`.
    pub fn select_exactly<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = EntityId>,
    {
        self.ids = ids.into_iter().collect();
    }

    /// Keeps only ids for which `keep` returns true. Returns how many were
    /// dropped.
    pub fn retain<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&EntityId) -> bool,
    {
        let before = self.ids.len();
        self.ids.retain(keep);
        before - self.ids.len()
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Borrows the underlying set.
    pub fn ids(&self) -> &BTreeSet<EntityId> {
        &self.ids
    }
}
