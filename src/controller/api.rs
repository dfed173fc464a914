//! Public setters and the view accessor.
//!
//! Page policy per input:
//! - collection replaced: page kept, or back to 1 if it fell out of range
//! - filter or search changed: back to page 1
//! - sort changed: page kept
//! - page size changed: page clamped into range
//!
//! Rejected inputs return an error and leave every piece of state as it was.
//! Any change that shrinks the filtered set also deselects the rows it hid.

use super::view::ListView;
use super::ListViewController;
use crate::entity::{Entity, EntityId, FieldValue};
use crate::error::Result;
use crate::filter::Criterion;
use crate::search::{SearchMode, SearchTerm};
use crate::sort::{SortDirection, SortSpec};
use std::cmp::Ordering;
use tracing::{debug, trace};

impl<E: Entity> ListViewController<E> {
    /// Replaces the backing collection.
    ///
    /// Filters, search and sort are kept. Selected ids missing from the new
    /// collection (or filtered out of it) are dropped silently.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuentas_listview::{EntityId, ListViewController, Record};
    ///
    /// let mut list = ListViewController::new()
    ///     .with_entities((1..=30).map(Record::new).collect());
    /// list.set_page(3).unwrap();
    /// list.toggle_select(&EntityId::Number(25));
    ///
    /// // Page 3 no longer exists and row 25 is gone.
    /// list.set_entities((1..=12).map(Record::new).collect());
    /// assert_eq!(list.current_page(), 1);
    /// assert!(list.selection().is_empty());
    /// ```
    pub fn set_entities(&mut self, entities: Vec<E>) {
        let previous_page = self.paginator.page();
        self.entities = entities;
        debug!(count = self.entities.len(), "entities replaced");

        self.recompute();
        if previous_page > self.paginator.total_pages() {
            self.paginator.reset();
        }
    }

    /// Sets or clears (blank value) the equality filter on `field`.
    /// Always returns to page 1; selected rows the filter hides are
    /// deselected.
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.set_criterion(field, Criterion::Equals(value.into()));
    }

    /// Sets or clears any criterion on `field`. Always returns to page 1.
    pub fn set_criterion(&mut self, field: impl Into<String>, criterion: Criterion) {
        let field = field.into();
        trace!(%field, ?criterion, "set filter");
        self.filters.set(field, criterion);
        self.paginator.reset();
        self.recompute();
    }

    /// Removes the filter on `field`. Always returns to page 1.
    pub fn clear_filter(&mut self, field: &str) {
        self.filters.clear_field(field);
        self.paginator.reset();
        self.recompute();
    }

    /// Removes every structured filter and the search term.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.search = SearchTerm::default();
        self.paginator.reset();
        self.recompute();
    }

    /// Sets the free-text search term. Always returns to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search = SearchTerm::new(term);
        trace!(term = self.search.raw(), "set search term");
        self.paginator.reset();
        self.recompute();
    }

    /// Replaces the fields matched by the search term.
    pub fn set_searchable_fields<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable_fields = fields.into_iter().map(Into::into).collect();
        if !self.search.is_empty() {
            self.paginator.reset();
        }
        self.recompute();
    }

    /// Switches between substring and fuzzy search.
    pub fn set_search_mode(&mut self, mode: SearchMode) {
        self.search_mode = mode;
        if !self.search.is_empty() {
            self.paginator.reset();
        }
        self.recompute();
    }

    /// Sorts by `field` in `direction`. The current page is kept.
    pub fn set_sort(&mut self, field: impl Into<String>, direction: SortDirection) {
        self.apply_sort(Some(SortSpec::by_field(field, direction)));
    }

    /// Sorts with a comparator. The current page is kept.
    pub fn set_comparator<F>(&mut self, compare: F)
    where
        F: Fn(&E, &E) -> Ordering + Send + Sync + 'static,
    {
        self.apply_sort(Some(SortSpec::by(compare)));
    }

    /// Column-header click: the sorted field flips direction, any other
    /// field starts ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        let direction = match self.sort.as_ref().and_then(SortSpec::field) {
            Some(current) if current.field == field => current.direction.flipped(),
            _ => SortDirection::Ascending,
        };
        self.set_sort(field, direction);
    }

    /// Returns rows to collection order.
    pub fn clear_sort(&mut self) {
        self.apply_sort(None);
    }

    fn apply_sort(&mut self, sort: Option<SortSpec<E>>) {
        trace!(?sort, "set sort");
        self.sort = sort;
        self.recompute();
    }

    /// Moves to `page` (1-based).
    ///
    /// Page 0 is rejected and the current page is kept; pages past the end
    /// clamp to the last page.
    ///
    /// # Errors
    ///
    /// [`ListViewError::PageOutOfRange`](crate::ListViewError::PageOutOfRange)
    /// for page 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuentas_listview::{ListViewController, ListViewError, Record};
    ///
    /// let mut list = ListViewController::new()
    ///     .with_entities((1..=25).map(Record::new).collect());
    ///
    /// list.set_page(8).unwrap();
    /// assert_eq!(list.current_page(), 3);
    ///
    /// assert_eq!(list.set_page(0), Err(ListViewError::PageOutOfRange { page: 0 }));
    /// assert_eq!(list.current_page(), 3);
    /// ```
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        self.paginator.set_page(page)
    }

    /// Moves forward one page, stopping at the last.
    pub fn next_page(&mut self) {
        self.paginator.next_page();
    }

    /// Moves back one page, stopping at the first.
    pub fn prev_page(&mut self) {
        self.paginator.prev_page();
    }

    /// Jumps to page 1.
    pub fn first_page(&mut self) {
        self.paginator.reset();
    }

    /// Jumps to the last page.
    pub fn last_page(&mut self) {
        let last = self.paginator.total_pages();
        // `last` is at least 1, so this cannot be rejected.
        let _ = self.paginator.set_page(last);
    }

    /// Changes the page size and clamps the current page into range.
    /// Zero is rejected and nothing changes.
    ///
    /// # Errors
    ///
    /// [`ListViewError::InvalidPageSize`](crate::ListViewError::InvalidPageSize)
    /// for a size of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuentas_listview::{ListViewController, Record};
    ///
    /// let mut list = ListViewController::new()
    ///     .with_entities((1..=25).map(Record::new).collect());
    /// list.set_page(3).unwrap();
    ///
    /// list.set_page_size(20).unwrap();
    /// assert_eq!(list.total_pages(), 2);
    /// assert_eq!(list.current_page(), 2);
    ///
    /// assert!(list.set_page_size(0).is_err());
    /// assert_eq!(list.page_size(), 20);
    /// ```
    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        self.paginator.set_per_page(size, self.visible.len())
    }

    /// Flips the selection of one row.
    ///
    /// Ids outside the current filtered set are ignored. Returns true if the
    /// id is selected afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuentas_listview::{EntityId, ListViewController, Record};
    ///
    /// let mut list = ListViewController::new()
    ///     .with_entities((1..=3).map(Record::new).collect());
    /// assert!(list.toggle_select(&EntityId::Number(2)));
    /// assert!(!list.toggle_select(&EntityId::Number(2)));
    /// assert!(!list.toggle_select(&EntityId::Number(9)));
    /// ```
    pub fn toggle_select(&mut self, id: &EntityId) -> bool {
        let visible = self
            .visible
            .iter()
            .any(|&index| &self.entities[index].id() == id);
        if !visible {
            trace!(%id, "ignored selection of a row outside the filtered set");
            return self.selection.contains(id);
        }
        self.selection.toggle(id.clone())
    }

    /// Selects exactly the rows matching the current filters and search,
    /// across all pages. When they are all selected already, clears the
    /// selection instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuentas_listview::{ListViewController, Record};
    ///
    /// let units: Vec<Record> = (1..=30)
    ///     .map(|i| Record::new(i).with_field("torre", if i % 2 == 0 { "A" } else { "B" }))
    ///     .collect();
    /// let mut list = ListViewController::new().with_entities(units);
    /// list.set_filter("torre", "A");
    ///
    /// list.toggle_select_all();
    /// assert_eq!(list.selection().len(), 15);
    ///
    /// list.toggle_select_all();
    /// assert!(list.selection().is_empty());
    /// ```
    pub fn toggle_select_all(&mut self) {
        if self.all_selected() {
            self.selection.clear();
        } else {
            let filtered: Vec<EntityId> = self
                .visible
                .iter()
                .map(|&index| self.entities[index].id())
                .collect();
            self.selection.select_exactly(filtered);
        }
        trace!(selected = self.selection.len(), "toggled select all");
    }

    /// True when every filtered row is selected (and there is at least one).
    pub fn all_selected(&self) -> bool {
        let filtered: Vec<EntityId> = self
            .visible
            .iter()
            .map(|&index| self.entities[index].id())
            .collect();
        self.selection.contains_all(&filtered)
    }

    /// Deselects everything.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// True if `id` is selected.
    pub fn is_selected(&self, id: &EntityId) -> bool {
        self.selection.contains(id)
    }

    /// Selected entities in collection order, for bulk row actions.
    pub fn selected_entities(&self) -> Vec<&E> {
        self.entities
            .iter()
            .filter(|entity| self.selection.contains(&entity.id()))
            .collect()
    }

    /// Id of the row at `index` on the current page, for row actions
    /// (view, edit, delete).
    pub fn row_id(&self, index: usize) -> Option<EntityId> {
        self.page_indices()
            .get(index)
            .map(|&i| self.entities[i].id())
    }

    /// Ids of the rows on the current page.
    pub fn page_ids(&self) -> Vec<EntityId> {
        self.page_indices()
            .iter()
            .map(|&i| self.entities[i].id())
            .collect()
    }

    /// The visible page and its metadata.
    pub fn get_view(&self) -> ListView<E> {
        ListView {
            rows: self
                .page_indices()
                .iter()
                .map(|&i| self.entities[i].clone())
                .collect(),
            total_filtered: self.visible.len(),
            current_page: self.paginator.page(),
            total_pages: self.paginator.total_pages(),
            page_size: self.paginator.per_page(),
            selected_ids: self.selection.ids().clone(),
            sort: self.sort.as_ref().and_then(SortSpec::field).cloned(),
        }
    }
}
