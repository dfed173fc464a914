//! Load tickets.
//!
//! Loading is the caller's job, but a slow response must not overwrite a
//! newer one. Each [`begin_load`](ListViewController::begin_load) issues a
//! ticket; only the latest ticket's first result is applied.

use super::ListViewController;
use crate::entity::Entity;
use crate::error::LoadError;
use crate::source::EntitySource;
use tracing::{debug, warn};

/// Identifies one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

/// What [`finish_load`](ListViewController::finish_load) did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The entities replaced the collection.
    Applied,
    /// The load failed; the previous collection is kept.
    Failed,
    /// A newer load was started, or this ticket already finished; the
    /// result was discarded.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct LoadTracker {
    latest: u64,
    in_flight: bool,
    last_error: Option<String>,
}

impl<E: Entity> ListViewController<E> {
    /// Starts a load and returns its ticket. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.loads.latest += 1;
        self.loads.in_flight = true;
        debug!(ticket = self.loads.latest, "load started");
        LoadTicket(self.loads.latest)
    }

    /// Completes the load identified by `ticket`.
    ///
    /// Results for superseded or already finished tickets are dropped. A failure keeps the
    /// previous collection and records the message for
    /// [`load_error`](Self::load_error).
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<E>, LoadError>,
    ) -> LoadOutcome {
        if ticket.0 != self.loads.latest || !self.loads.in_flight {
            debug!(
                ticket = ticket.0,
                latest = self.loads.latest,
                "discarding stale load"
            );
            return LoadOutcome::Stale;
        }
        self.loads.in_flight = false;

        match result {
            Ok(entities) => {
                debug!(ticket = ticket.0, count = entities.len(), "load applied");
                self.loads.last_error = None;
                self.set_entities(entities);
                LoadOutcome::Applied
            }
            Err(err) => {
                warn!(ticket = ticket.0, error = %err, "load failed");
                self.loads.last_error = Some(err.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Loads synchronously from `source` under a fresh ticket.
    pub fn load_from<S>(&mut self, source: &S) -> LoadOutcome
    where
        S: EntitySource<E> + ?Sized,
    {
        let ticket = self.begin_load();
        let result = source.fetch();
        self.finish_load(ticket, result)
    }

    /// True while the latest load has not finished.
    pub fn is_loading(&self) -> bool {
        self.loads.in_flight
    }

    /// Message of the latest failed load, cleared by the next success.
    pub fn load_error(&self) -> Option<&str> {
        self.loads.last_error.as_deref()
    }
}
