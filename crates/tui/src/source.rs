use std::path::PathBuf;

use swimlane_core::sources::{GitLogCollector, SourceError, read_path};
use swimlane_protocol::{GraphDocument, HistoryLimit};

/// Where the viewer gets its history from. Refreshing re-reads the same source.
#[derive(Debug, Clone)]
pub enum HistorySource {
    /// A saved graph document or raw `git log` output.
    File(PathBuf),
    Repository(GitLogCollector),
}

impl HistorySource {
    /// Files are shown whole; `limit` only applies to repositories.
    pub fn load(&self, limit: HistoryLimit) -> Result<GraphDocument, SourceError> {
        match self {
            Self::File(path) => read_path(path),
            Self::Repository(collector) => collector.collect(limit),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Repository(collector) => collector.repo_root().display().to_string(),
        }
    }
}
