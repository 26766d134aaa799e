pub mod collector;
pub mod document;
pub mod git_log;

use std::path::{Path, PathBuf};

use swimlane_protocol::GraphDocument;
use thiserror::Error;

pub use collector::GitLogCollector;
pub use document::{parse_document, write_document};
pub use git_log::{parse_decorations, parse_git_log};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("malformed graph document: {0}")]
    Document(#[from] serde_json::Error),
    #[error("malformed git log record: {0}")]
    Record(String),
    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("git log exited with an error: {0}")]
    GitFailed(String),
    #[error("git output was not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("unable to detect history format")]
    UnknownFormat,
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a history file and parse it with [`parse_auto`].
pub fn read_path(path: &Path) -> Result<GraphDocument, SourceError> {
    let data = std::fs::read(path).map_err(|source| SourceError::Read {
        path: path.to_owned(),
        source,
    })?;
    parse_auto(&data)
}

/// Auto-detect the history format and parse it.
///
/// Detection strategy:
/// 1. Blank input is an empty history.
/// 2. Anything that parses as JSON is a graph document (or a bare commit list).
/// 3. Text containing git's record/field separators is raw `git log` output.
pub fn parse_auto(data: &[u8]) -> Result<GraphDocument, SourceError> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(GraphDocument::default());
    }

    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        return document::from_value(value);
    }

    if let Ok(text) = std::str::from_utf8(data)
        && (text.contains(git_log::RECORD_DELIMITER) || text.contains(git_log::FIELD_DELIMITER))
    {
        let commits = parse_git_log(text)?;
        return Ok(GraphDocument::new(commits, false));
    }

    // Broken JSON gets the JSON error rather than a generic one.
    match data.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{' | b'[') => parse_document(data),
        _ => Err(SourceError::UnknownFormat),
    }
}
