use swimlane_protocol::{CommitRecord, Decorations};

use super::SourceError;

pub const FIELD_DELIMITER: char = '\x1f';
pub const RECORD_DELIMITER: char = '\x1e';

/// `git log --pretty=format:` string producing one record per commit.
///
/// Fields: hash, parent hashes, author name, author email, relative date,
/// ISO committer date, unix committer timestamp, subject, decorations.
pub const LOG_FORMAT: &str = "%H%x1f%P%x1f%an%x1f%ae%x1f%cr%x1f%cI%x1f%ct%x1f%s%x1f%D%x1e";

/// Parse raw `git log` output written with [`LOG_FORMAT`].
pub fn parse_git_log(raw_output: &str) -> Result<Vec<CommitRecord>, SourceError> {
    raw_output
        .split(RECORD_DELIMITER)
        .map(str::trim_start)
        .filter(|record| !record.trim().is_empty())
        .map(parse_record)
        .collect()
}

fn parse_record(record: &str) -> Result<CommitRecord, SourceError> {
    let mut parts = record.split(FIELD_DELIMITER);
    let id = parts
        .next()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| SourceError::Record("missing commit hash".into()))?;
    let parents = parts.next().unwrap_or_default();
    let author = parts.next().unwrap_or_default();
    let author_email = parts.next().unwrap_or_default();
    let relative_time = parts.next().unwrap_or_default();
    let committed_at = parts.next().unwrap_or_default();
    let committed_timestamp = parts.next().unwrap_or_default();
    let summary = parts.next().unwrap_or_default();
    let decorations = parts.next().unwrap_or_default();

    let committed_timestamp = committed_timestamp.trim().parse::<i64>().map_err(|err| {
        SourceError::Record(format!("timestamp parse error for {id}: {err}"))
    })?;

    let mut commit = CommitRecord::new(id, parents.split_whitespace());
    commit.author = author.to_owned();
    commit.author_email = author_email.to_owned();
    commit.relative_time = relative_time.to_owned();
    commit.committed_at = committed_at.to_owned();
    commit.committed_timestamp = committed_timestamp;
    commit.summary = summary.to_owned();
    commit.decorations = parse_decorations(decorations);
    Ok(commit)
}

/// Classify the `%D` ref list of one commit.
///
/// Understands both `--decorate=short` (`origin/main`) and
/// `--decorate=full` (`refs/remotes/origin/main`) spellings.
pub fn parse_decorations(raw: &str) -> Decorations {
    let mut decorations = Decorations::default();
    for token in raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
    {
        if let Some(target) = token.strip_prefix("HEAD -> ") {
            let target = target.trim();
            let target = target.strip_prefix("refs/heads/").unwrap_or(target);
            decorations.head = Some(target.to_owned());
        } else if token == "HEAD" {
            // Detached.
            decorations.head = Some(token.to_owned());
        } else if let Some(tag) = token.strip_prefix("tag: ") {
            let tag = tag.trim();
            let tag = tag.strip_prefix("refs/tags/").unwrap_or(tag);
            decorations.tags.push(tag.to_owned());
        } else if let Some(branch) = token.strip_prefix("refs/heads/") {
            decorations.local_branches.push(branch.to_owned());
        } else if let Some(branch) = token.strip_prefix("refs/remotes/") {
            decorations.remote_branches.push(branch.to_owned());
        } else if token.starts_with("refs/") {
            // stash, notes, and other non-branch refs
            continue;
        } else if token.contains('/') {
            decorations.remote_branches.push(token.to_owned());
        } else {
            decorations.local_branches.push(token.to_owned());
        }
    }
    decorations
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(fields: &[&str]) -> String {
        let mut out = fields.join(FIELD_DELIMITER.to_string().as_str());
        out.push(RECORD_DELIMITER);
        out
    }

    #[test]
    fn parse_simple_git_log() {
        let raw = record(&[
            "abc123",
            "",
            "Jane Doe",
            "jd@example.com",
            "2 days ago",
            "2024-05-01T10:00:00Z",
            "1714557600",
            "Initial commit",
            "HEAD -> main, origin/main",
        ]);
        let parsed = parse_git_log(&raw).unwrap_or_default();
        assert_eq!(parsed.len(), 1);
        let node = &parsed[0];
        assert_eq!(node.id, "abc123");
        assert!(node.parents.is_empty());
        assert_eq!(node.committed_timestamp, 1_714_557_600);
        assert_eq!(node.decorations.head.as_deref(), Some("main"));
        assert_eq!(node.decorations.remote_branches, vec!["origin/main"]);
    }

    #[test]
    fn records_separated_by_newlines() {
        let first = record(&[
            "1111111111111111", "2222222222222222 3333333333333333", "A", "a@x", "now",
            "2024-05-02T10:00:00Z", "1714644000", "Merge", "",
        ]);
        let second = record(&[
            "2222222222222222", "", "B", "b@x", "yesterday", "2024-05-01T10:00:00Z",
            "1714557600", "Root", "tag: v0.1",
        ]);
        let raw = format!("{first}\n{second}\n");
        let parsed = parse_git_log(&raw).unwrap_or_default();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].parents, vec!["2222222222222222", "3333333333333333"]);
        assert_eq!(parsed[0].display_id(), "11111111");
        assert_eq!(parsed[1].id, "2222222222222222");
        assert_eq!(parsed[1].decorations.tags, vec!["v0.1"]);
    }

    #[test]
    fn bad_timestamp_is_an_error() {
        let raw = record(&["abc", "", "A", "a@x", "now", "", "soon", "msg", ""]);
        assert!(matches!(parse_git_log(&raw), Err(SourceError::Record(_))));
    }

    #[test]
    fn missing_hash_is_an_error() {
        let raw = record(&["", "", "A"]);
        assert!(matches!(parse_git_log(&raw), Err(SourceError::Record(_))));
    }

    #[test]
    fn full_decorations_are_classified() {
        let decorations = parse_decorations(
            "HEAD -> refs/heads/main, refs/remotes/origin/main, refs/heads/topic, tag: refs/tags/v1.2, refs/stash",
        );
        assert_eq!(
            decorations,
            Decorations {
                head: Some("main".into()),
                local_branches: vec!["topic".into()],
                remote_branches: vec!["origin/main".into()],
                tags: vec!["v1.2".into()],
            }
        );
    }

    #[test]
    fn detached_head() {
        let decorations = parse_decorations("HEAD, release");
        assert_eq!(decorations.head.as_deref(), Some("HEAD"));
        assert_eq!(decorations.local_branches, vec!["release"]);
        assert!(parse_decorations("").is_empty());
    }
}
