//! The derived view handed to the rendering layer.

use crate::entity::EntityId;
use crate::sort::SortField;
use std::collections::BTreeSet;

/// Snapshot of what a listing screen shows.
///
/// Produced by [`ListViewController::get_view`](super::ListViewController::get_view).
/// Calling it twice with no setter in between yields equal snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<E> {
    /// Rows of the current page, in display order.
    pub rows: Vec<E>,
    /// Rows passing filters and search, across all pages.
    pub total_filtered: usize,
    /// Current page, 1-based.
    pub current_page: usize,
    /// Number of pages, at least 1.
    pub total_pages: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Selected ids.
    pub selected_ids: BTreeSet<EntityId>,
    /// Sorted column, when sorting by field.
    pub sort: Option<SortField>,
}

impl<E> ListView<E> {
    /// 1-based inclusive positions of the page's rows within the filtered
    /// set, or `None` for an empty page.
    pub fn row_range(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        let first = (self.current_page - 1) * self.page_size + 1;
        Some((first, first + self.rows.len() - 1))
    }

    /// True when no row matches.
    pub fn is_empty(&self) -> bool {
        self.total_filtered == 0
    }

    /// True if `id` is selected.
    pub fn is_selected(&self, id: &EntityId) -> bool {
        self.selected_ids.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_range() {
        let view = ListView {
            rows: vec![(); 5],
            total_filtered: 25,
            current_page: 3,
            total_pages: 3,
            page_size: 10,
            selected_ids: BTreeSet::new(),
            sort: None,
        };
        assert_eq!(view.row_range(), Some((21, 25)));
    }

    #[test]
    fn test_empty_view_has_no_range() {
        let view: ListView<()> = ListView {
            rows: vec![],
            total_filtered: 0,
            current_page: 1,
            total_pages: 1,
            page_size: 10,
            selected_ids: BTreeSet::new(),
            sort: None,
        };
        assert!(view.is_empty());
        assert_eq!(view.row_range(), None);
    }
}
