use swimlane_protocol::GraphDocument;

use super::view::GraphView;
use crate::sources::{SourceError, parse_auto};

/// Identifies one load request. Later tickets supersede earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub enum LoadOutcome {
    /// The result replaced the current view.
    Applied,
    /// A newer load was started after this one; the result was dropped.
    Stale,
    /// The load failed; the current view is unchanged.
    Failed(SourceError),
}

/// The view currently on screen and the loads that may replace it.
///
/// Fetches, dropped files and host messages all end up here. Only the most
/// recently started load is applied; a failed load leaves the previous view
/// in place.
#[derive(Debug, Default)]
pub struct GraphSession {
    view: Option<GraphView>,
    issued: u64,
}

impl GraphSession {
    pub const fn new() -> Self {
        Self {
            view: None,
            issued: 0,
        }
    }

    pub fn view(&self) -> Option<&GraphView> {
        self.view.as_ref()
    }

    /// Start a load. Any ticket handed out before this one becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.issued
    }

    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<GraphDocument, SourceError>,
    ) -> LoadOutcome {
        if !self.is_current(ticket) {
            log::debug!(
                "dropping stale history load {} (latest is {})",
                ticket.0,
                self.issued
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(document) => {
                self.view = Some(GraphView::build(document));
                LoadOutcome::Applied
            }
            Err(err) => {
                log::warn!("history load failed, keeping previous graph: {err}");
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Parse `data` and show it, superseding any load still in flight.
    pub fn load_bytes(&mut self, data: &[u8]) -> Result<&GraphView, SourceError> {
        let ticket = self.begin_load();
        match self.finish_load(ticket, parse_auto(data)) {
            LoadOutcome::Failed(err) => Err(err),
            LoadOutcome::Applied | LoadOutcome::Stale => {
                Ok(self.view.get_or_insert_with(GraphView::default))
            }
        }
    }
}
