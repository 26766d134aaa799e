use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use swimlane_protocol::GraphDocument;

/// Whether the history shown is the whole history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HistoryStatus {
    Truncated,
    Complete,
    /// Nothing loaded.
    Unavailable,
}

impl HistoryStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Truncated => "Truncated",
            Self::Complete => "Complete",
            Self::Unavailable => "–",
        }
    }
}

impl fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Counts shown alongside the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub commit_count: usize,
    /// Distinct local and remote branch names.
    pub branch_count: usize,
    pub tag_count: usize,
    pub status: HistoryStatus,
}

impl GraphSummary {
    pub fn empty() -> Self {
        Self {
            commit_count: 0,
            branch_count: 0,
            tag_count: 0,
            status: HistoryStatus::Unavailable,
        }
    }

    pub fn from_document(document: &GraphDocument) -> Self {
        if document.is_empty() {
            return Self::empty();
        }

        let mut branches = BTreeSet::new();
        let mut tags = BTreeSet::new();
        for commit in &document.commits {
            branches.extend(commit.decorations.branches());
            tags.extend(commit.decorations.tags.iter().map(String::as_str));
        }

        Self {
            commit_count: document.commits.len(),
            branch_count: branches.len(),
            tag_count: tags.len(),
            status: if document.truncated {
                HistoryStatus::Truncated
            } else {
                HistoryStatus::Complete
            },
        }
    }
}

impl Default for GraphSummary {
    fn default() -> Self {
        Self::empty()
    }
}
