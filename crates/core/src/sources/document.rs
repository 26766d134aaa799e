use serde_json::Value;
use swimlane_protocol::{CommitRecord, GraphDocument};

use super::SourceError;

/// Parse a JSON graph document, as written by the host or saved to disk.
pub fn parse_document(data: &[u8]) -> Result<GraphDocument, SourceError> {
    let value: Value = serde_json::from_slice(data)?;
    from_value(value)
}

/// Serialize `document` as pretty JSON, edges included. [`parse_document`]
/// reads the result back unchanged.
pub fn write_document(document: &GraphDocument) -> Result<String, SourceError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Accepts a full document, a bare commit list, or `null`.
pub(crate) fn from_value(value: Value) -> Result<GraphDocument, SourceError> {
    match value {
        Value::Null => Ok(GraphDocument::default()),
        Value::Array(_) => {
            let commits: Vec<CommitRecord> = serde_json::from_value(value)?;
            Ok(GraphDocument::new(commits, false))
        }
        value => Ok(serde_json::from_value(value)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_full_document() {
        let data = br#"{
            "commits": [
                {
                    "id": "a1",
                    "short_id": "a1",
                    "parents": ["b2", "c3"],
                    "author": "Ada",
                    "summary": "Merge branch 'topic'",
                    "committed_at": "2024-05-01T10:00:00Z",
                    "relative_time": "2 days ago",
                    "decorations": {
                        "head": "main",
                        "local_branches": ["main"],
                        "remote_branches": ["origin/main"],
                        "tags": []
                    }
                }
            ],
            "truncated": false
        }"#;
        let doc = parse_document(data).unwrap_or_default();
        assert_eq!(doc.commits.len(), 1);
        assert_eq!(doc.commits[0].parents, vec!["b2", "c3"]);
        assert_eq!(doc.commits[0].relative_time, "2 days ago");
    }

    #[test]
    fn written_document_reads_back_with_edges() {
        let mut merge = CommitRecord::new("m", ["a", "b"]);
        merge.decorations.tags = vec!["v1".into()];
        let document = GraphDocument::new(
            vec![
                merge,
                CommitRecord::new("b", ["a"]),
                CommitRecord::new("a", Vec::<String>::new()),
            ],
            true,
        );

        let json = write_document(&document).unwrap_or_default();
        assert!(json.contains("\"edges\""));
        assert!(json.contains('\n'));

        let read = crate::sources::parse_auto(json.as_bytes()).unwrap_or_default();
        assert!(read.truncated);
        assert_eq!(read.edges.len(), 3);
        assert_eq!(read, document);
    }

    #[test]
    fn wrong_shape_is_an_error() {
        assert!(matches!(
            parse_document(br#"{"commits": 3}"#),
            Err(SourceError::Document(_))
        ));
        assert!(matches!(
            parse_document(br#"{"commits": [{"parents": []}]}"#),
            Err(SourceError::Document(_))
        ));
        assert!(matches!(parse_document(b"\"text\""), Err(SourceError::Document(_))));
    }
}
