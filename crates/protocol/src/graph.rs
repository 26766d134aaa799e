use serde::{Deserialize, Serialize};

/// Length of the abbreviated commit id shown next to each entry.
pub const SHORT_ID_LEN: usize = 8;

/// The document exchanged between a history source and a renderer.
///
/// ```text
///   git log ──┐
///   file drop ├─▶ GraphDocument ──▶ lane assignment ──▶ RenderCommand[] ──▶ Renderer
///   host msg ─┘       (this)
/// ```
///
/// Commits are already in topological, newest-first order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default, deserialize_with = "nullable_commits")]
    pub commits: Vec<CommitRecord>,
    /// Whether the source stopped before reaching the root of the history.
    #[serde(default)]
    pub truncated: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<GraphEdge>,
}

impl GraphDocument {
    /// Build a document, deriving one edge per (commit, parent) pair.
    pub fn new(commits: Vec<CommitRecord>, truncated: bool) -> Self {
        let edges = commits
            .iter()
            .flat_map(|commit| {
                commit.parents.iter().map(|parent| GraphEdge {
                    child: commit.id.clone(),
                    parent: parent.clone(),
                })
            })
            .collect();
        Self {
            commits,
            truncated,
            edges,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

fn nullable_commits<'de, D>(deserializer: D) -> Result<Vec<CommitRecord>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<CommitRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub child: String,
    pub parent: String,
}

/// One commit as supplied by the history source.
///
/// Only `id` and `parents` drive the layout; everything else is payload
/// handed through to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    #[serde(alias = "oid")]
    pub id: String,
    #[serde(default, alias = "short_oid")]
    pub short_id: String,
    /// Primary parent first.
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_email: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub committed_at: String,
    #[serde(default)]
    pub committed_timestamp: i64,
    #[serde(default)]
    pub relative_time: String,
    #[serde(default)]
    pub decorations: Decorations,
}

impl CommitRecord {
    pub fn new(id: impl Into<String>, parents: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let id = id.into();
        Self {
            short_id: abbreviate(&id).to_owned(),
            parents: parents.into_iter().map(Into::into).collect(),
            id,
            ..Self::default()
        }
    }

    /// The parent whose line continues in this commit's lane.
    pub fn primary_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }

    /// Parents beyond the first, present only on merges.
    pub fn secondary_parents(&self) -> impl Iterator<Item = &str> {
        self.parents.iter().skip(1).map(String::as_str)
    }

    /// `short_id`, or the abbreviated `id` when the source left it out.
    pub fn display_id(&self) -> &str {
        if self.short_id.is_empty() {
            abbreviate(&self.id)
        } else {
            &self.short_id
        }
    }
}

/// Abbreviate a commit id to at most [`SHORT_ID_LEN`] characters.
pub fn abbreviate(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Refs pointing at a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decorations {
    #[serde(default)]
    pub head: Option<String>,
    #[serde(default)]
    pub local_branches: Vec<String>,
    #[serde(default)]
    pub remote_branches: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Decorations {
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
            && self.local_branches.is_empty()
            && self.remote_branches.is_empty()
            && self.tags.is_empty()
    }

    /// Local then remote branch names.
    pub fn branches(&self) -> impl Iterator<Item = &str> {
        self.local_branches
            .iter()
            .chain(&self.remote_branches)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_extension_field_names() {
        let json = r#"{
            "commits": [{
                "oid": "0123456789abcdef",
                "short_oid": "01234567",
                "parents": ["fedcba9876543210"],
                "author": "Jane Doe",
                "summary": "Initial commit",
                "decorations": { "head": "main", "tags": ["v1"] }
            }],
            "truncated": true
        }"#;
        let doc: GraphDocument = serde_json::from_str(json).unwrap_or_default();
        assert_eq!(doc.commits.len(), 1);
        let commit = &doc.commits[0];
        assert_eq!(commit.id, "0123456789abcdef");
        assert_eq!(commit.display_id(), "01234567");
        assert_eq!(commit.primary_parent(), Some("fedcba9876543210"));
        assert_eq!(commit.decorations.head.as_deref(), Some("main"));
        assert!(commit.decorations.local_branches.is_empty());
        assert!(doc.truncated);
    }

    #[test]
    fn null_or_missing_commits_is_empty() {
        let doc: GraphDocument =
            serde_json::from_str(r#"{"commits": null}"#).unwrap_or_else(|_| GraphDocument {
                truncated: true,
                ..GraphDocument::default()
            });
        assert!(doc.is_empty());
        assert!(!doc.truncated);

        let doc: GraphDocument = serde_json::from_str("{}").unwrap_or_else(|_| GraphDocument {
            truncated: true,
            ..GraphDocument::default()
        });
        assert!(doc.is_empty());
        assert!(!doc.truncated);
    }

    #[test]
    fn new_derives_edges_in_parent_order() {
        let doc = GraphDocument::new(
            vec![
                CommitRecord::new("m", ["a", "b"]),
                CommitRecord::new("a", ["r"]),
            ],
            false,
        );
        let pairs: Vec<(&str, &str)> = doc
            .edges
            .iter()
            .map(|e| (e.child.as_str(), e.parent.as_str()))
            .collect();
        assert_eq!(pairs, vec![("m", "a"), ("m", "b"), ("a", "r")]);
    }

    #[test]
    fn display_id_falls_back_to_abbreviated_id() {
        let mut commit = CommitRecord::new("0123456789abcdef", Vec::<String>::new());
        commit.short_id.clear();
        assert_eq!(commit.display_id(), "01234567");
        assert_eq!(abbreviate("abc"), "abc");
    }
}
