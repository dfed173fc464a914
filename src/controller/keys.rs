//! Key bindings and message handling for the controller.
//!
//! Page up/down go through the paginator's own bindings; the controller adds
//! jumps to the first and last page, select-all and clearing filters.
//!
//! | Action | Keys |
//! |---|---|
//! | previous / next page | `←/h/pgup`, `→/l/pgdown` |
//! | first / last page | `home/g`, `end/G` |
//! | toggle select all | `ctrl+a` |
//! | clear filters and search | `esc` |

use super::ListViewController;
use crate::entity::Entity;
use crate::key::{self, KeyMap};
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::trace;

/// Controller-level key bindings.
#[derive(Debug, Clone)]
pub struct ControllerKeyMap {
    /// Jump to page 1.
    pub first_page: key::Binding,
    /// Jump to the last page.
    pub last_page: key::Binding,
    /// Select or deselect every filtered row.
    pub toggle_select_all: key::Binding,
    /// Clear structured filters and the search term.
    pub clear_filters: key::Binding,
}

impl Default for ControllerKeyMap {
    fn default() -> Self {
        Self {
            first_page: key::Binding::new(vec![KeyCode::Home.into(), 'g'.into()])
                .with_help("g/home", "primera página"),
            last_page: key::Binding::new(vec![KeyCode::End.into(), 'G'.into()])
                .with_help("G/end", "última página"),
            toggle_select_all: key::Binding::new(vec![
                (KeyCode::Char('a'), KeyModifiers::CONTROL).into(),
            ])
            .with_help("ctrl+a", "seleccionar todo"),
            clear_filters: key::Binding::new(vec![KeyCode::Esc.into()])
                .with_help("esc", "limpiar filtros"),
        }
    }
}

impl<E: Entity> ListViewController<E> {
    /// Handles a bubbletea message. Returns true if the view changed.
    ///
    /// Messages other than key presses are ignored.
    pub fn update(&mut self, msg: &Msg) -> bool {
        let Some(key_msg) = msg.downcast_ref::<KeyMsg>() else {
            return false;
        };
        trace!(key = ?key_msg.key, "list view key");

        if self.paginator.update(msg) {
            return true;
        }

        let before_page = self.paginator.page();
        if self.keymap.first_page.matches(key_msg) {
            self.first_page();
            self.paginator.page() != before_page
        } else if self.keymap.last_page.matches(key_msg) {
            self.last_page();
            self.paginator.page() != before_page
        } else if self.keymap.toggle_select_all.matches(key_msg) {
            self.toggle_select_all();
            true
        } else if self.keymap.clear_filters.matches(key_msg) {
            let had_filters = !self.filters.is_empty() || !self.search_term().is_empty();
            if had_filters {
                self.clear_filters();
            }
            had_filters
        } else {
            false
        }
    }
}

impl<E: Entity> KeyMap for ListViewController<E> {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.paginator.keymap.prev_page,
            &self.paginator.keymap.next_page,
            &self.keymap.toggle_select_all,
            &self.keymap.clear_filters,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.paginator.keymap.prev_page,
                &self.paginator.keymap.next_page,
                &self.keymap.first_page,
                &self.keymap.last_page,
            ],
            vec![&self.keymap.toggle_select_all, &self.keymap.clear_filters],
        ]
    }
}
