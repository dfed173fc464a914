//! The controller struct, construction and read accessors.

use super::keys::ControllerKeyMap;
use super::load::LoadTracker;
use crate::config::ListConfig;
use crate::entity::{Entity, EntityId};
use crate::filter::FilterCriteria;
use crate::paginator;
use crate::render::{Renderer, RowDelegate, ViewMode};
use crate::search::{SearchMode, SearchTerm};
use crate::selection::Selection;
use crate::sort::SortSpec;

/// Owns an entity collection and the view state over it.
///
/// Every setter recomputes the filtered and sorted order eagerly, so
/// [`get_view`](Self::get_view) only slices the current page. The
/// controller is exclusively owned by the view that shows it; I/O happens
/// outside and feeds back through [`set_entities`](Self::set_entities) or
/// [`finish_load`](Self::finish_load).
///
/// # Examples
///
/// ```
/// use cuentas_listview::{Entity, ListViewController, Record};
///
/// let torres: Vec<Record> = (1..=25)
///     .map(|i| Record::new(i).with_field("name", format!("Torre {i}")))
///     .collect();
///
/// let mut list = ListViewController::new();
/// list.set_entities(torres);
/// list.set_page(2).unwrap();
///
/// let view = list.get_view();
/// assert_eq!(view.total_pages, 3);
/// assert_eq!(view.rows.len(), 10);
/// assert_eq!(view.rows[0].field("name").unwrap().to_string(), "Torre 11");
/// ```
#[derive(Debug, Clone)]
pub struct ListViewController<E: Entity> {
    pub(super) entities: Vec<E>,
    pub(super) filters: FilterCriteria,
    pub(super) search: SearchTerm,
    pub(super) searchable_fields: Vec<String>,
    pub(super) search_mode: SearchMode,
    pub(super) sort: Option<SortSpec<E>>,
    pub(super) paginator: paginator::Model,
    pub(super) selection: Selection,
    /// Indices into `entities` that pass filters and search, in sorted order.
    pub(super) visible: Vec<usize>,
    pub(super) view_mode: ViewMode,
    pub(super) empty_message: String,
    pub(super) keymap: ControllerKeyMap,
    pub(super) loads: LoadTracker,
}

impl<E: Entity> Default for ListViewController<E> {
    fn default() -> Self {
        Self::with_config(ListConfig::default())
    }
}

impl<E: Entity> ListViewController<E> {
    /// Creates an empty controller with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty controller from a configuration.
    ///
    /// The configuration is trusted as given; use
    /// [`ListConfig::from_json`] or [`ListConfig::validate`] for untrusted
    /// input. A zero page size falls back to 1.
    pub fn with_config(config: ListConfig) -> Self {
        let paginator = paginator::Model::new()
            .with_per_page(config.page_size)
            .with_type(config.paginator_type);
        Self {
            entities: Vec::new(),
            filters: FilterCriteria::new(),
            search: SearchTerm::default(),
            searchable_fields: config.searchable_fields,
            search_mode: config.search_mode,
            sort: config.default_sort.map(SortSpec::from),
            paginator,
            selection: Selection::new(),
            visible: Vec::new(),
            view_mode: config.view_mode,
            empty_message: config.empty_message,
            keymap: ControllerKeyMap::default(),
            loads: LoadTracker::default(),
        }
    }

    /// Sets the initial collection (builder pattern).
    #[must_use]
    pub fn with_entities(mut self, entities: Vec<E>) -> Self {
        self.set_entities(entities);
        self
    }

    /// Sets the searchable fields (builder pattern).
    #[must_use]
    pub fn with_searchable_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_searchable_fields(fields);
        self
    }

    /// Number of entities in the collection, before filtering.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of entities passing filters and search.
    pub fn total_filtered(&self) -> usize {
        self.visible.len()
    }

    /// Current page, 1-based.
    pub fn current_page(&self) -> usize {
        self.paginator.page()
    }

    /// Number of pages, at least 1.
    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages()
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.paginator.per_page()
    }

    /// The whole collection in input order.
    pub fn entities(&self) -> &[E] {
        &self.entities
    }

    /// Looks up an entity by id.
    pub fn entity(&self, id: &EntityId) -> Option<&E> {
        self.entities.iter().find(|e| &e.id() == id)
    }

    /// Active structured filters.
    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    /// Active search term.
    pub fn search_term(&self) -> &str {
        self.search.raw()
    }

    /// Fields matched by the search term.
    pub fn searchable_fields(&self) -> &[String] {
        &self.searchable_fields
    }

    /// Active sort, if any.
    pub fn sort(&self) -> Option<&SortSpec<E>> {
        self.sort.as_ref()
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The paginator, for rendering its indicator.
    pub fn paginator(&self) -> &paginator::Model {
        &self.paginator
    }

    /// Table or card rendering.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switches between table and card rendering.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Text shown when no row matches.
    pub fn empty_message(&self) -> &str {
        &self.empty_message
    }

    /// A renderer carrying this controller's view mode, indicator style and
    /// empty message.
    pub fn renderer(&self) -> Renderer {
        Renderer {
            mode: self.view_mode,
            paginator_type: self.paginator.paginator_type,
            empty_message: self.empty_message.clone(),
        }
    }

    /// Renders the current page with `delegate`.
    pub fn view<D: RowDelegate<E> + ?Sized>(&self, delegate: &D) -> String {
        self.renderer().render(&self.get_view(), delegate)
    }

    /// Key bindings.
    pub fn keymap(&self) -> &ControllerKeyMap {
        &self.keymap
    }

    /// Mutable key bindings, for remapping.
    pub fn keymap_mut(&mut self) -> &mut ControllerKeyMap {
        &mut self.keymap
    }
}
