//! Pagination state for list views.
//!
//! Pages are 1-based, as they are shown to users. The paginator only tracks
//! the cursor, page size and page count and computes slice bounds; it never
//! holds the rows themselves. It also renders the page indicator in one of
//! two styles and reacts to prev/next key bindings.

use crate::error::{ListViewError, Result};
use crate::key::{self, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// How the page indicator is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    /// Page numbers, e.g. `"2/5"`.
    #[default]
    Arabic,
    /// One dot per page, e.g. `"○ • ○ ○ ○"`.
    Dots,
}

/// Key bindings for page navigation.
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    /// Previous page. Default keys: PageUp, Left, `h`.
    pub prev_page: key::Binding,
    /// Next page. Default keys: PageDown, Right, `l`.
    pub next_page: key::Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            prev_page: key::Binding::new(vec![
                KeyCode::PageUp.into(),
                KeyCode::Left.into(),
                'h'.into(),
            ])
            .with_help("←/h", "página anterior"),
            next_page: key::Binding::new(vec![
                KeyCode::PageDown.into(),
                KeyCode::Right.into(),
                'l'.into(),
            ])
            .with_help("→/l", "página siguiente"),
        }
    }
}

impl KeyMapTrait for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.prev_page, &self.next_page]]
    }
}

/// Pagination cursor over a filtered row count.
///
/// Invariants: `per_page >= 1`, `total_pages = max(1, ceil(items / per_page))`,
/// and `1 <= page <= total_pages`.
///
/// # Examples
///
/// ```rust
/// use cuentas_listview::paginator::Model;
///
/// let mut paginator = Model::new().with_per_page(10).with_total_items(25);
/// assert_eq!(paginator.total_pages(), 3);
///
/// paginator.set_page(2).unwrap();
/// assert_eq!(paginator.slice_bounds(25), (10, 20));
///
/// // Past the end clamps to the last page.
/// paginator.set_page(99).unwrap();
/// assert_eq!(paginator.page(), 3);
///
/// // Page 0 is rejected and the cursor stays put.
/// assert!(paginator.set_page(0).is_err());
/// assert_eq!(paginator.page(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// Indicator style.
    pub paginator_type: Type,
    page: usize,
    per_page: usize,
    total_pages: usize,

    /// Dot for the current page in `Dots` mode.
    pub active_dot: String,
    /// Dot for other pages in `Dots` mode.
    pub inactive_dot: String,
    /// Format for `Arabic` mode; the two `%d` are current and total.
    pub arabic_format: String,

    /// Key bindings.
    pub keymap: PaginatorKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            paginator_type: Type::default(),
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
            total_pages: 1,
            active_dot: "•".to_string(),
            inactive_dot: "○".to_string(),
            arabic_format: "%d/%d".to_string(),
            keymap: PaginatorKeyMap::default(),
        }
    }
}

impl Model {
    /// Creates a paginator on page 1 of 1 with the default page size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size (builder pattern). Zero is raised to 1.
    #[must_use]
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Sets the item count (builder pattern).
    #[must_use]
    pub fn with_total_items(mut self, items: usize) -> Self {
        self.set_total_items(items);
        self
    }

    /// Sets the indicator style (builder pattern).
    #[must_use]
    pub fn with_type(mut self, paginator_type: Type) -> Self {
        self.paginator_type = paginator_type;
        self
    }

    /// Current page, 1-based.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Rows per page.
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Number of pages, at least 1.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Changes the page size, keeping the page in range for `items`.
    ///
    /// A size of zero is rejected and nothing changes.
    ///
    /// # Errors
    ///
    /// Returns [`ListViewError::InvalidPageSize`] when `per_page` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuentas_listview::paginator::Model;
    ///
    /// let mut paginator = Model::new().with_total_items(45);
    /// paginator.set_page(5).unwrap();
    ///
    /// paginator.set_per_page(25, 45).unwrap();
    /// assert_eq!(paginator.total_pages(), 2);
    /// assert_eq!(paginator.page(), 2);
    /// assert!(paginator.set_per_page(0, 45).is_err());
    /// ```
    pub fn set_per_page(&mut self, per_page: usize, items: usize) -> Result<()> {
        if per_page == 0 {
            return Err(ListViewError::InvalidPageSize { size: per_page });
        }
        self.per_page = per_page;
        self.set_total_items(items);
        Ok(())
    }

    /// Recomputes the page count for `items` rows and clamps the page.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuentas_listview::paginator::Model;
    ///
    /// let mut paginator = Model::new().with_total_items(30);
    /// paginator.set_page(3).unwrap();
    ///
    /// paginator.set_total_items(12);
    /// assert_eq!(paginator.total_pages(), 2);
    /// assert_eq!(paginator.page(), 2);
    ///
    /// paginator.set_total_items(0);
    /// assert_eq!(paginator.total_pages(), 1);
    /// ```
    pub fn set_total_items(&mut self, items: usize) {
        self.total_pages = items.div_ceil(self.per_page).max(1);
        if self.page > self.total_pages {
            self.page = self.total_pages;
        }
    }

    /// Moves to `page`.
    ///
    /// Pages past the end clamp to the last page. Page 0 is rejected with
    /// [`ListViewError::PageOutOfRange`] and the cursor does not move.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuentas_listview::paginator::Model;
    ///
    /// let mut paginator = Model::new().with_total_items(25);
    /// paginator.set_page(2).unwrap();
    /// assert_eq!(paginator.page(), 2);
    ///
    /// paginator.set_page(9).unwrap();
    /// assert_eq!(paginator.page(), 3);
    ///
    /// assert!(paginator.set_page(0).is_err());
    /// assert_eq!(paginator.page(), 3);
    /// ```
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        if page == 0 {
            return Err(ListViewError::PageOutOfRange { page });
        }
        self.page = page.min(self.total_pages);
        Ok(())
    }

    /// Returns to page 1.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Slice bounds `[start, end)` of the current page over `length` rows.
    ///
    /// # Returns
    ///
    /// A start and end clamped to `length`, so the pair can index a slice of
    /// that length directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuentas_listview::paginator::Model;
    ///
    /// let rows: Vec<u32> = (1..=25).collect();
    /// let mut paginator = Model::new().with_total_items(rows.len());
    /// paginator.set_page(3).unwrap();
    ///
    /// let (start, end) = paginator.slice_bounds(rows.len());
    /// assert_eq!(&rows[start..end], &[21, 22, 23, 24, 25]);
    /// ```
    pub fn slice_bounds(&self, length: usize) -> (usize, usize) {
        let start = ((self.page - 1) * self.per_page).min(length);
        let end = (start + self.per_page).min(length);
        (start, end)
    }

    /// Number of rows on the current page.
    pub fn items_on_page(&self, total_items: usize) -> usize {
        let (start, end) = self.slice_bounds(total_items);
        end - start
    }

    /// Moves back one page, stopping at page 1.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Moves forward one page, stopping at the last page.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuentas_listview::paginator::Model;
    ///
    /// let mut paginator = Model::new().with_total_items(15);
    /// paginator.next_page();
    /// paginator.next_page();
    /// assert_eq!(paginator.page(), 2);
    /// assert!(paginator.on_last_page());
    /// ```
    pub fn next_page(&mut self) {
        if !self.on_last_page() {
            self.page += 1;
        }
    }

    /// True on page 1.
    pub fn on_first_page(&self) -> bool {
        self.page == 1
    }

    /// True on the last page.
    pub fn on_last_page(&self) -> bool {
        self.page == self.total_pages
    }

    /// Handles prev/next key presses. Returns true if the page moved.
    pub fn update(&mut self, msg: &Msg) -> bool {
        let Some(key_msg) = msg.downcast_ref::<KeyMsg>() else {
            return false;
        };
        let before = self.page;
        if self.keymap.next_page.matches(key_msg) {
            self.next_page();
        } else if self.keymap.prev_page.matches(key_msg) {
            self.prev_page();
        }
        self.page != before
    }

    /// Renders the page indicator.
    pub fn view(&self) -> String {
        match self.paginator_type {
            Type::Arabic => self.arabic_view(),
            Type::Dots => self.dots_view(),
        }
    }

    fn arabic_view(&self) -> String {
        self.arabic_format
            .replacen("%d", &self.page.to_string(), 1)
            .replacen("%d", &self.total_pages.to_string(), 1)
    }

    fn dots_view(&self) -> String {
        (1..=self.total_pages)
            .map(|i| {
                if i == self.page {
                    self.active_dot.as_str()
                } else {
                    self.inactive_dot.as_str()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key_msg(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_defaults() {
        let p = Model::new();
        assert_eq!(p.page(), 1);
        assert_eq!(p.per_page(), DEFAULT_PAGE_SIZE);
        assert_eq!(p.total_pages(), 1);
        assert_eq!(p.paginator_type, Type::Arabic);
    }

    #[test]
    fn test_total_pages_never_below_one() {
        let p = Model::new().with_per_page(10).with_total_items(0);
        assert_eq!(p.total_pages(), 1);
        assert_eq!(p.slice_bounds(0), (0, 0));
    }

    #[test]
    fn test_twenty_five_rows_make_three_pages() {
        let mut p = Model::new().with_per_page(10).with_total_items(25);
        assert_eq!(p.total_pages(), 3);
        p.set_page(3).unwrap();
        assert_eq!(p.slice_bounds(25), (20, 25));
        assert_eq!(p.items_on_page(25), 5);
    }

    #[test]
    fn test_shrinking_item_count_clamps_page() {
        let mut p = Model::new().with_per_page(10).with_total_items(100);
        p.set_page(8).unwrap();
        p.set_total_items(35);
        assert_eq!(p.page(), 4);
    }

    #[test]
    fn test_set_per_page_rejects_zero() {
        let mut p = Model::new().with_per_page(5).with_total_items(20);
        p.set_page(4).unwrap();
        let err = p.set_per_page(0, 20).unwrap_err();
        assert_eq!(err, ListViewError::InvalidPageSize { size: 0 });
        assert_eq!(p.per_page(), 5);
        assert_eq!(p.page(), 4);

        p.set_per_page(10, 20).unwrap();
        assert_eq!(p.total_pages(), 2);
        assert_eq!(p.page(), 2);
    }

    #[test]
    fn test_prev_and_next_stop_at_edges() {
        let mut p = Model::new().with_per_page(10).with_total_items(30);
        p.prev_page();
        assert!(p.on_first_page());
        p.next_page();
        p.next_page();
        p.next_page();
        assert_eq!(p.page(), 3);
        assert!(p.on_last_page());
    }

    #[test]
    fn test_update_follows_key_bindings() {
        let mut p = Model::new().with_per_page(10).with_total_items(30);
        assert!(p.update(&key_msg(KeyCode::Right)));
        assert_eq!(p.page(), 2);
        assert!(p.update(&key_msg(KeyCode::Char('h'))));
        assert_eq!(p.page(), 1);
        assert!(!p.update(&key_msg(KeyCode::Char('x'))));
    }

    #[test]
    fn test_views() {
        let mut p = Model::new().with_per_page(10).with_total_items(50);
        p.set_page(3).unwrap();
        assert_eq!(p.view(), "3/5");
        p.paginator_type = Type::Dots;
        assert_eq!(p.view(), "○ ○ • ○ ○");
    }
}
