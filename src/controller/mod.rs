//! The list-view controller.
//!
//! `ListViewController<E: Entity>` owns a collection and five pieces of view
//! state: structured filters, a search term, a sort, a pagination cursor and
//! a row selection. Every setter re-derives the visible order through one
//! fixed pipeline:
//!
//! 1. structured filters (AND across fields)
//! 2. free-text search (AND with the filters)
//! 3. stable sort
//! 4. page slice `[(page - 1) * size, page * size)`
//!
//! Steps 1 to 3 run eagerly and are cached as indices; step 4 happens when
//! [`ListViewController::get_view`] is called, which is pure.
//!
//! ### Page policy
//! Filter and search changes return to page 1. Sorting keeps the page.
//! Replacing the collection keeps the page unless it no longer exists, in
//! which case it goes back to page 1. Page size changes clamp the page.
//!
//! ### Selection
//! The selection is always a subset of the filtered result set: ids that a
//! filter, search or new collection hides are deselected. "Select all"
//! selects exactly that set, not only the current page, and clears the
//! selection when everything is already selected.
//!
//! ### Messages
//! [`ListViewController::update`] accepts bubbletea-rs messages, so the
//! controller can be embedded in a bubbletea model and driven by keys. The
//! controller implements [`KeyMap`](crate::key::KeyMap) for help display.

mod api;
mod keys;
mod load;
mod model;
mod pipeline;
mod view;

pub use keys::ControllerKeyMap;
pub use load::{LoadOutcome, LoadTicket};
pub use model::ListViewController;
pub use view::ListView;
