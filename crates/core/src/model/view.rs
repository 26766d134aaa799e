use serde::Serialize;
use swimlane_protocol::{CommitRecord, GraphDocument};

use super::layout::{GraphLayout, LaneRow};
use super::summary::GraphSummary;
use crate::lanes::assign_lanes;

/// Shown in place of the graph when there is nothing to lay out.
pub const EMPTY_PLACEHOLDER: &str = "No graph data available. Run /git-graph first.";

/// A laid-out history ready for a renderer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphView {
    pub commits: Vec<CommitRecord>,
    pub layout: GraphLayout,
    pub summary: GraphSummary,
}

impl GraphView {
    /// Lay out `document` with a fresh lane table.
    pub fn build(document: GraphDocument) -> Self {
        let summary = GraphSummary::from_document(&document);
        let layout = assign_lanes(&document.commits);
        Self {
            commits: document.commits,
            layout,
            summary,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_PLACEHOLDER)
    }

    /// Commits paired with their lane rows, in input order.
    pub fn entries(&self) -> impl Iterator<Item = (&CommitRecord, &LaneRow)> {
        self.commits.iter().zip(&self.layout.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HistoryStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_yields_placeholder() {
        let view = GraphView::build(GraphDocument::default());
        assert!(view.is_empty());
        assert_eq!(view.placeholder(), Some(EMPTY_PLACEHOLDER));
        assert_eq!(view.summary.commit_count, 0);
        assert_eq!(view.summary.status, HistoryStatus::Unavailable);
        assert_eq!(view.layout.lane_count, 0);
    }

    #[test]
    fn entries_keep_input_order() {
        let document = GraphDocument::new(
            vec![
                CommitRecord::new("c", ["b"]),
                CommitRecord::new("b", ["a"]),
                CommitRecord::new("a", Vec::<String>::new()),
            ],
            false,
        );
        let view = GraphView::build(document);
        let ids: Vec<(&str, usize)> = view
            .entries()
            .map(|(commit, row)| (commit.id.as_str(), row.lane))
            .collect();
        assert_eq!(ids, vec![("c", 0), ("b", 0), ("a", 0)]);
        assert_eq!(view.placeholder(), None);
    }
}
