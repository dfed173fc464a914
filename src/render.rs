//! Text rendering of a [`ListView`].
//!
//! The renderer consumes only the derived view, never the controller, so
//! the same snapshot can feed a table or a card grid. A [`RowDelegate`]
//! decides which columns exist and what each cell says; [`FieldDelegate`]
//! covers the common case of one column per entity field.
//!
//! ```
//! use cuentas_listview::render::{FieldDelegate, Renderer, ViewMode};
//! use cuentas_listview::{ListViewController, Record};
//!
//! let mut list = ListViewController::new().with_entities(vec![
//!     Record::new(1).with_field("name", "Torre A").with_field("pisos", 12),
//!     Record::new(2).with_field("name", "Torre B").with_field("pisos", 8),
//! ]);
//! list.toggle_select(&1.into());
//!
//! let delegate = FieldDelegate::new([("Nombre", "name"), ("Pisos", "pisos")]);
//! let out = Renderer::new(ViewMode::Table).render(&list.get_view(), &delegate);
//!
//! assert!(out.contains("[x] Torre A"));
//! assert!(out.contains("Mostrando 1-2 de 2"));
//! ```

use crate::controller::ListView;
use crate::entity::Entity;
use crate::paginator;
use lipgloss_extras::lipgloss;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

/// Character appended to truncated cells.
pub const ELLIPSIS: &str = "…";

/// Table rows or cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One line per entity under a header.
    #[default]
    Table,
    /// One block per entity, a line per column.
    Cards,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Table => Self::Cards,
            Self::Cards => Self::Table,
        }
    }
}

/// A table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Header text.
    pub title: String,
    /// Field the column shows, used to mark the sorted column.
    pub field: Option<String>,
    /// Fixed display width; defaults to the widest of header and cells.
    pub width: Option<usize>,
}

impl Column {
    /// Creates a column with a header only.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            field: None,
            width: None,
        }
    }

    /// Associates the column with a field (builder pattern).
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Fixes the display width (builder pattern).
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }
}

/// Decides how entities turn into cells.
pub trait RowDelegate<E> {
    /// Columns, in display order.
    fn columns(&self) -> Vec<Column>;

    /// One cell per column for `entity`.
    fn cells(&self, entity: &E) -> Vec<String>;
}

/// Delegate showing one field per column.
#[derive(Debug, Clone)]
pub struct FieldDelegate {
    columns: Vec<Column>,
}

impl FieldDelegate {
    /// Creates a delegate from `(header, field)` pairs.
    pub fn new<I, T, F>(columns: I) -> Self
    where
        I: IntoIterator<Item = (T, F)>,
        T: Into<String>,
        F: Into<String>,
    {
        Self {
            columns: columns
                .into_iter()
                .map(|(title, field)| Column::new(title).with_field(field))
                .collect(),
        }
    }
}

impl<E: Entity> RowDelegate<E> for FieldDelegate {
    fn columns(&self) -> Vec<Column> {
        self.columns.clone()
    }

    fn cells(&self, entity: &E) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| {
                column
                    .field
                    .as_deref()
                    .and_then(|field| entity.field(field))
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            })
            .collect()
    }
}

/// Renders views as plain text (cells may carry their own styling).
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Table or cards.
    pub mode: ViewMode,
    /// Page indicator style.
    pub paginator_type: paginator::Type,
    /// Text shown when no row matches.
    pub empty_message: String,
}

impl Renderer {
    /// Creates a renderer with the default indicator and empty message.
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            paginator_type: paginator::Type::default(),
            empty_message: "No se encontraron registros".to_string(),
        }
    }

    /// Renders rows and footer.
    pub fn render<E, D>(&self, view: &ListView<E>, delegate: &D) -> String
    where
        E: Entity,
        D: RowDelegate<E> + ?Sized,
    {
        let body = if view.rows.is_empty() {
            self.empty_message.clone()
        } else {
            match self.mode {
                ViewMode::Table => Self::table(view, delegate),
                ViewMode::Cards => Self::cards(view, delegate),
            }
        };
        format!("{body}\n{}", self.footer(view))
    }

    /// `"Mostrando a-b de n"`, the selection count and the page indicator.
    pub fn footer<E>(&self, view: &ListView<E>) -> String {
        let mut parts = Vec::new();
        match view.row_range() {
            Some((first, last)) => parts.push(format!(
                "Mostrando {first}-{last} de {}",
                view.total_filtered
            )),
            None => parts.push("Mostrando 0 de 0".to_string()),
        }
        if !view.selected_ids.is_empty() {
            parts.push(format!("{} seleccionados", view.selected_ids.len()));
        }

        let mut indicator = paginator::Model::new()
            .with_per_page(view.page_size)
            .with_total_items(view.total_filtered)
            .with_type(self.paginator_type);
        // `current_page` comes from a paginator, so it is at least 1.
        let _ = indicator.set_page(view.current_page);
        parts.push(indicator.view());

        parts.join(" · ")
    }

    fn table<E, D>(view: &ListView<E>, delegate: &D) -> String
    where
        E: Entity,
        D: RowDelegate<E> + ?Sized,
    {
        let columns = delegate.columns();
        let rows: Vec<(bool, Vec<String>)> = view
            .rows
            .iter()
            .map(|entity| (view.is_selected(&entity.id()), delegate.cells(entity)))
            .collect();

        let headers: Vec<String> = columns
            .iter()
            .map(|column| match (&view.sort, &column.field) {
                (Some(sort), Some(field)) if &sort.field == field => {
                    format!("{} {}", column.title, sort.direction.arrow())
                }
                _ => column.title.clone(),
            })
            .collect();

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                column.width.unwrap_or_else(|| {
                    rows.iter()
                        .filter_map(|(_, cells)| cells.get(i))
                        .map(|cell| lipgloss::width_visible(cell))
                        .chain(std::iter::once(lipgloss::width_visible(&headers[i])))
                        .max()
                        .unwrap_or(0)
                })
            })
            .collect();

        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(format!("    {}", join_cells(&headers, &widths)));
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        lines.push(format!("    {}", separator.join("-+-")));
        for (selected, cells) in &rows {
            lines.push(format!("{} {}", marker(*selected), join_cells(cells, &widths)));
        }
        trim_lines(&lines)
    }

    fn cards<E, D>(view: &ListView<E>, delegate: &D) -> String
    where
        E: Entity,
        D: RowDelegate<E> + ?Sized,
    {
        let columns = delegate.columns();
        let mut blocks = Vec::with_capacity(view.rows.len());
        for entity in &view.rows {
            let cells = delegate.cells(entity);
            let title = cells.first().cloned().unwrap_or_else(|| entity.id().to_string());
            let mut block = vec![format!("{} {title}", marker(view.is_selected(&entity.id())))];
            for (column, cell) in columns.iter().zip(&cells).skip(1) {
                block.push(format!("    {}: {cell}", column.title));
            }
            blocks.push(block.join("\n"));
        }
        blocks.join("\n\n")
    }
}

fn marker(selected: bool) -> &'static str {
    if selected {
        "[x]"
    } else {
        "[ ]"
    }
}

fn join_cells(cells: &[String], widths: &[usize]) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(i, &width)| fit(cells.get(i).map_or("", String::as_str), width))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn trim_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pads `cell` to `width` display columns, or truncates it with an ellipsis.
/// Styled cells that need truncating lose their styling.
fn fit(cell: &str, width: usize) -> String {
    let visible = lipgloss::width_visible(cell);
    if visible <= width {
        return format!("{cell}{}", " ".repeat(width - visible));
    }
    if width == 0 {
        return String::new();
    }

    let plain = strip_ansi_escapes::strip_str(cell);
    let mut out = String::new();
    let mut used = 0;
    for ch in plain.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(ELLIPSIS);
    used += 1;
    format!("{out}{}", " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Record;
    use crate::sort::SortDirection;
    use crate::ListViewController;

    fn edificios() -> ListViewController<Record> {
        ListViewController::new().with_entities(vec![
            Record::new(1)
                .with_field("name", "Edificio Central")
                .with_field("comuna", "Providencia"),
            Record::new(2)
                .with_field("name", "Los Álamos")
                .with_field("comuna", "Ñuñoa"),
        ])
    }

    fn delegate() -> FieldDelegate {
        FieldDelegate::new([("Nombre", "name"), ("Comuna", "comuna")])
    }

    #[test]
    fn test_table_layout() {
        let list = edificios();
        let out = Renderer::new(ViewMode::Table).render(&list.get_view(), &delegate());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "    Nombre           | Comuna");
        assert_eq!(lines[1], "    -----------------+------------");
        assert_eq!(lines[2], "[ ] Edificio Central | Providencia");
        assert_eq!(lines[3], "[ ] Los Álamos       | Ñuñoa");
        assert_eq!(lines[4], "Mostrando 1-2 de 2 · 1/1");
    }

    #[test]
    fn test_sorted_column_has_arrow() {
        let mut list = edificios();
        list.set_sort("name", SortDirection::Descending);
        let out = Renderer::new(ViewMode::Table).render(&list.get_view(), &delegate());
        assert!(out.lines().next().unwrap().contains("Nombre ▼"));
        assert!(out.lines().nth(2).unwrap().contains("Los Álamos"));
    }

    #[test]
    fn test_cards_show_selection_and_fields() {
        let mut list = edificios();
        list.toggle_select(&2.into());
        let out = Renderer::new(ViewMode::Cards).render(&list.get_view(), &delegate());

        assert!(out.contains("[ ] Edificio Central\n    Comuna: Providencia"));
        assert!(out.contains("[x] Los Álamos\n    Comuna: Ñuñoa"));
        assert!(out.ends_with("Mostrando 1-2 de 2 · 1 seleccionados · 1/1"));
    }

    #[test]
    fn test_empty_view_shows_message() {
        let mut list = edificios();
        list.set_search_term("inexistente");
        let out = Renderer::new(ViewMode::Table).render(&list.get_view(), &delegate());
        assert_eq!(out, "No se encontraron registros\nMostrando 0 de 0 · 1/1");
    }

    #[test]
    fn test_fit_truncates_by_display_width() {
        assert_eq!(fit("Providencia", 6), "Provi…");
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn test_fixed_width_column() {
        let list = edificios();
        let delegate = DelegateWithWidth;
        let out = Renderer::new(ViewMode::Table).render(&list.get_view(), &delegate);
        assert!(out.contains("[ ] Edifi…"));
    }

    struct DelegateWithWidth;

    impl RowDelegate<Record> for DelegateWithWidth {
        fn columns(&self) -> Vec<Column> {
            vec![Column::new("Nombre").with_field("name").with_width(6)]
        }

        fn cells(&self, entity: &Record) -> Vec<String> {
            vec![entity.field("name").map(|v| v.to_string()).unwrap_or_default()]
        }
    }
}
