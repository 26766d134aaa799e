use std::path::{Path, PathBuf};
use std::process::Command;

use swimlane_protocol::{GraphDocument, HistoryLimit};

use super::SourceError;
use super::git_log::{LOG_FORMAT, parse_git_log};

/// Reads the commit history of a repository by running `git log`.
#[derive(Debug, Clone)]
pub struct GitLogCollector {
    git: PathBuf,
    repo_root: PathBuf,
}

impl GitLogCollector {
    /// Use the `git` found on `PATH`.
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            git: PathBuf::from("git"),
            repo_root: repo_root.into(),
        }
    }

    pub fn with_git(mut self, git: impl Into<PathBuf>) -> Self {
        self.git = git.into();
        self
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Collect up to `limit` commits across all refs, newest first.
    ///
    /// One extra commit is requested so that `truncated` reports whether the
    /// history continues past the limit.
    pub fn collect(&self, limit: HistoryLimit) -> Result<GraphDocument, SourceError> {
        let limit = limit.get();
        let fetch_limit = limit.saturating_add(1);
        log::info!(
            "collecting up to {limit} commits from {}",
            self.repo_root.display()
        );

        let output = self.run_git_log(fetch_limit)?;
        let mut commits = parse_git_log(&output)?;
        let truncated = commits.len() > limit;
        commits.truncate(limit);

        log::debug!(
            "collected {} commits (truncated: {truncated})",
            commits.len()
        );
        Ok(GraphDocument::new(commits, truncated))
    }

    fn run_git_log(&self, max_count: usize) -> Result<String, SourceError> {
        let output = Command::new(&self.git)
            .arg("--no-pager")
            .arg("log")
            .arg("--all")
            .arg("--date-order")
            .arg("--decorate=full")
            .arg("--color=never")
            .arg(format!("--max-count={max_count}"))
            .arg(format!("--pretty=format:{LOG_FORMAT}"))
            .current_dir(&self.repo_root)
            .output()
            .map_err(SourceError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::GitFailed(stderr.trim().to_owned()));
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_git_binary_is_a_spawn_error() {
        let collector = GitLogCollector::new(std::env::temp_dir())
            .with_git("/nonexistent/swimlane-test-git");
        assert!(matches!(
            collector.collect(HistoryLimit::default()),
            Err(SourceError::Spawn(_))
        ));
    }

    #[test]
    fn keeps_repo_root() {
        let collector = GitLogCollector::new("/tmp/repo");
        assert_eq!(collector.repo_root(), Path::new("/tmp/repo"));
    }
}
