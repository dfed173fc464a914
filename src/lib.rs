#![warn(missing_docs)]

//! # cuentas-listview
//!
//! A reusable list-view controller for the admin screens of a property
//! management console: buildings, towers, units, cost centers, tickets and
//! members all share one way of filtering, searching, sorting, paginating and
//! selecting rows.
//!
//! ## Overview
//!
//! [`ListViewController`] owns a collection of entities plus the view state
//! over it. Every setter re-derives the visible rows through a fixed
//! pipeline (filters, then search, then a stable sort, then the page slice),
//! and [`ListViewController::get_view`] returns the current page with its
//! metadata. Rendering, key handling and badge styling are layered on top,
//! following the bubbletea Elm architecture: the controller consumes
//! [`bubbletea_rs::Msg`] values in `update` and renders to a string in
//! `view`.
//!
//! ## Quick Start
//!
//! ```rust
//! use cuentas_listview::prelude::*;
//!
//! let units: Vec<Record> = (1..=25)
//!     .map(|i| {
//!         Record::new(i)
//!             .with_field("name", format!("Depto {i}"))
//!             .with_field("torre", if i <= 12 { "A" } else { "B" })
//!     })
//!     .collect();
//!
//! let mut list = ListViewController::new().with_entities(units);
//! list.set_filter("torre", "B");
//! list.set_sort("name", SortDirection::Descending);
//!
//! let view = list.get_view();
//! assert_eq!(view.total_filtered, 13);
//! assert_eq!(view.total_pages, 2);
//!
//! let delegate = FieldDelegate::new([("Unidad", "name"), ("Torre", "torre")]);
//! let screen = list.view(&delegate);
//! assert!(screen.ends_with("Mostrando 1-10 de 13 · 1/2"));
//! ```
//!
//! ## Entities
//!
//! Anything implementing [`Entity`] can be listed: it needs a stable id and
//! a way to look up a field by name. [`Record`] is the dynamic
//! implementation decoded from backend JSON.
//!
//! ## Key Bindings
//!
//! | Action | Keys |
//! |---|---|
//! | previous / next page | `←/h/pgup`, `→/l/pgdown` |
//! | first / last page | `home/g`, `end/G` |
//! | toggle select all | `ctrl+a` |
//! | clear filters and search | `esc` |
//!
//! Bindings live in [`ControllerKeyMap`] and
//! [`PaginatorKeyMap`](paginator::PaginatorKeyMap) and can be remapped.

pub mod badge;
pub mod config;
pub mod controller;
pub mod entity;
pub mod error;
pub mod filter;
pub mod key;
pub mod paginator;
pub mod render;
pub mod search;
pub mod selection;
pub mod sort;
pub mod source;

pub use badge::{Badge, EntityStatus, MembershipTier, Priority, Tone};
pub use config::ListConfig;
pub use controller::{ControllerKeyMap, ListView, ListViewController, LoadOutcome, LoadTicket};
pub use entity::{Entity, EntityId, FieldValue, Record};
pub use error::{ConfigError, ListViewError, LoadError, ParseCodeError};
pub use filter::{Criterion, FilterCriteria};
pub use key::{Binding, KeyMap, KeyPress};
pub use paginator::Model as Paginator;
pub use render::{Column, FieldDelegate, Renderer, RowDelegate, ViewMode};
pub use search::SearchMode;
pub use selection::Selection;
pub use sort::{SortDirection, SortField, SortSpec};
pub use source::{EntitySource, FixtureSource};

/// Prelude module for convenient imports.
///
/// ```rust
/// use cuentas_listview::prelude::*;
///
/// let list: ListViewController<Record> = ListViewController::new();
/// assert_eq!(list.get_view().total_pages, 1);
/// ```
pub mod prelude {
    pub use crate::badge::{Badge, EntityStatus, MembershipTier, Priority, Tone};
    pub use crate::config::ListConfig;
    pub use crate::controller::{ListView, ListViewController, LoadOutcome};
    pub use crate::entity::{Entity, EntityId, FieldValue, Record};
    pub use crate::error::{ListViewError, LoadError};
    pub use crate::filter::Criterion;
    pub use crate::key::KeyMap;
    pub use crate::render::{FieldDelegate, RowDelegate, ViewMode};
    pub use crate::search::SearchMode;
    pub use crate::sort::SortDirection;
    pub use crate::source::EntitySource;
}
