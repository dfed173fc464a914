//! Recomputation of the derived order.
//!
//! The order is fixed: structured filters, then search, then a stable sort.
//! Pagination is applied last, on read, from the paginator's slice bounds.
//! The selection never outlives the filtered set it was made from.

use super::ListViewController;
use crate::entity::{Entity, EntityId};
use std::collections::HashSet;
use tracing::debug;

impl<E: Entity> ListViewController<E> {
    /// Rebuilds `visible` from the collection and view state, deselects ids
    /// that fell out of it, then updates the page count (which clamps the
    /// current page).
    pub(super) fn recompute(&mut self) {
        let search = self.search.pass(&self.searchable_fields, self.search_mode);
        let mut order: Vec<usize> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, entity)| self.filters.matches(*entity))
            .filter(|(_, entity)| search.matches(*entity))
            .map(|(index, _)| index)
            .collect();

        if let Some(sort) = &self.sort {
            sort.sort_indices(&self.entities, &mut order);
        }

        let filtered: HashSet<EntityId> = order.iter().map(|&i| self.entities[i].id()).collect();
        let dropped = self.selection.retain(|id| filtered.contains(id));
        if dropped > 0 {
            debug!(dropped, "deselected rows outside the filtered set");
        }

        self.visible = order;
        self.paginator.set_total_items(self.visible.len());

        debug!(
            total = self.entities.len(),
            filtered = self.visible.len(),
            filters = self.filters.len(),
            page = self.paginator.page(),
            pages = self.paginator.total_pages(),
            "list view recomputed"
        );
    }

    /// Indices of the rows on the current page.
    pub(super) fn page_indices(&self) -> &[usize] {
        let (start, end) = self.paginator.slice_bounds(self.visible.len());
        &self.visible[start..end]
    }
}
