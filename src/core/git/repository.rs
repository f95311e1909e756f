use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::error::{Error, Result};

/// A local repository split into a bare state dir and a worktree dir.
///
/// Every operation runs `git --git-dir=<state> --work-tree=<worktree>`,
/// so the two directories are the only state this type owns.
#[derive(Debug, Clone)]
pub struct Repository {
    pub git_dir: PathBuf,
    pub work_tree: PathBuf,
}

/// Captured result of a git invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitOutput {
    pub args: Vec<String>,
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    fn from_output(args: Vec<String>, output: std::process::Output) -> Self {
        Self {
            args,
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl Repository {
    /// Create the state and worktree dirs and initialize a bare repository.
    pub fn init(git_dir: impl Into<PathBuf>, work_tree: impl Into<PathBuf>) -> Result<Self> {
        let repo = Self {
            git_dir: git_dir.into(),
            work_tree: work_tree.into(),
        };

        std::fs::create_dir_all(&repo.git_dir).map_err(|e| {
            Error::internal_io(
                e.to_string(),
                Some(format!("create {}", repo.git_dir.display())),
            )
        })?;
        std::fs::create_dir_all(&repo.work_tree).map_err(|e| {
            Error::internal_io(
                e.to_string(),
                Some(format!("create {}", repo.work_tree.display())),
            )
        })?;

        let output = Command::new("git")
            .arg(format!("--git-dir={}", repo.git_dir.display()))
            .args(["init", "-q", "--bare"])
            .output()
            .map_err(|e| Error::git_command_failed(format!("Failed to run git init: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::git_command_failed(format!(
                "git init failed: {}",
                stderr.trim()
            )));
        }

        Ok(repo)
    }

    /// Open an existing repository, validating the state dir.
    pub fn open(git_dir: impl Into<PathBuf>, work_tree: impl Into<PathBuf>) -> Result<Self> {
        let repo = Self {
            git_dir: git_dir.into(),
            work_tree: work_tree.into(),
        };

        let ok = Command::new("git")
            .arg(format!("--git-dir={}", repo.git_dir.display()))
            .args(["rev-parse", "--git-dir"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);

        if !ok {
            return Err(Error::git_command_failed(format!(
                "'{}' is not a git state directory",
                repo.git_dir.display()
            ))
            .with_hint("Run 'deckhand repo init' to create one"));
        }

        Ok(repo)
    }

    /// Build a deferred git invocation against this repository.
    pub fn git_command<I, S>(&self, args: I) -> GitCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GitCommand {
            repo: self.clone(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Run a git command, requiring success.
    pub fn run(&self, args: &[&str]) -> Result<String> {
        self.git_command(args.iter().copied()).stdout()
    }

    /// Register a remote under `name`.
    pub fn with_remote(&self, name: &str, url: &str) -> Result<&Self> {
        self.run(&["remote", "add", name, url])?;
        Ok(self)
    }

    pub fn tag(&self, name: impl Into<String>) -> Tag {
        Tag {
            repo: self.clone(),
            name: name.into(),
        }
    }

    pub fn commit(&self, digest: impl Into<String>) -> Commit {
        Commit {
            repo: self.clone(),
            digest: digest.into(),
        }
    }

    /// Checkout a ref into the worktree and return the worktree path.
    pub fn checkout(&self, reference: &str) -> Result<&Path> {
        self.run(&["checkout", reference])?;
        Ok(&self.work_tree)
    }
}

/// A deferred git invocation bound to a repository.
#[derive(Debug, Clone)]
pub struct GitCommand {
    pub repo: Repository,
    pub args: Vec<String>,
}

impl GitCommand {
    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg(format!("--git-dir={}", self.repo.git_dir.display()))
            .arg(format!("--work-tree={}", self.repo.work_tree.display()))
            .args(&self.args)
            .current_dir(&self.repo.work_tree);
        cmd
    }

    /// Run and capture the outcome without treating nonzero exit as an error.
    pub fn capture(&self) -> Result<GitOutput> {
        let output = self.command().output().map_err(|e| {
            Error::git_command_failed(format!("Failed to run git {}: {}", self.args.join(" "), e))
        })?;
        Ok(GitOutput::from_output(self.args.clone(), output))
    }

    /// Run, requiring success, and return trimmed stdout.
    pub fn stdout(&self) -> Result<String> {
        let output = self.capture()?;
        if !output.success {
            let detail = if output.stderr.trim().is_empty() {
                output.stdout.trim().to_string()
            } else {
                output.stderr.trim().to_string()
            };
            return Err(Error::git_command_failed(format!(
                "git {} failed: {}",
                self.args.join(" "),
                detail
            )));
        }
        Ok(output.stdout.trim_end().to_string())
    }
}

/// A tag reference in a local repository.
#[derive(Debug, Clone)]
pub struct Tag {
    pub repo: Repository,
    pub name: String,
}

impl Tag {
    /// Fully qualified ref name: `refs/tags/<name>` unless already qualified.
    pub fn full_name(&self) -> String {
        if self.name.starts_with("refs/tags/") {
            return self.name.clone();
        }
        if self.name.starts_with("tags/") {
            return format!("refs/{}", self.name);
        }
        format!("refs/tags/{}", self.name)
    }

    /// Checkout the tag into the worktree and return the worktree path.
    pub fn tree(&self) -> Result<PathBuf> {
        self.repo.checkout(&self.name).map(Path::to_path_buf)
    }
}

/// A commit in a local repository, addressed by digest.
#[derive(Debug, Clone)]
pub struct Commit {
    pub repo: Repository,
    pub digest: String,
}

impl Commit {
    /// Checkout the commit into the worktree and return the worktree path.
    pub fn tree(&self) -> Result<PathBuf> {
        self.repo.checkout(&self.digest).map(Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_repo() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = Repository::init(dir.path().join("state"), dir.path().join("worktree"))
            .expect("init repository");
        (dir, repo)
    }

    #[test]
    fn tag_full_name_normalization() {
        let repo = Repository {
            git_dir: PathBuf::from("/tmp/state"),
            work_tree: PathBuf::from("/tmp/worktree"),
        };
        assert_eq!(repo.tag("v1.0.0").full_name(), "refs/tags/v1.0.0");
        assert_eq!(repo.tag("tags/v1.0.0").full_name(), "refs/tags/v1.0.0");
        assert_eq!(repo.tag("refs/tags/v1.0.0").full_name(), "refs/tags/v1.0.0");
    }

    #[test]
    fn init_creates_a_usable_state_dir() {
        let (_dir, repo) = scratch_repo();
        let reopened = Repository::open(&repo.git_dir, &repo.work_tree);
        assert!(reopened.is_ok());
    }

    #[test]
    fn open_rejects_a_plain_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = Repository::open(dir.path(), dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn commit_and_checkout_round_trip() {
        let (_dir, repo) = scratch_repo();
        repo.run(&["config", "user.email", "ci@example.com"])
            .expect("config email");
        repo.run(&["config", "user.name", "CI"]).expect("config name");

        std::fs::write(repo.work_tree.join("hello.txt"), "hello\n").expect("write file");
        repo.run(&["add", "hello.txt"]).expect("git add");
        repo.run(&["commit", "-m", "initial"]).expect("git commit");

        let digest = repo.run(&["rev-parse", "HEAD"]).expect("rev-parse");
        let tree = repo.commit(&digest).tree().expect("checkout");
        assert!(tree.join("hello.txt").exists());
    }

    #[test]
    fn capture_reports_nonzero_exit_without_error() {
        let (_dir, repo) = scratch_repo();
        let output = repo
            .git_command(["rev-parse", "definitely-not-a-ref"])
            .capture()
            .expect("capture");
        assert!(!output.success);
        assert_ne!(output.exit_code, 0);
    }
}
