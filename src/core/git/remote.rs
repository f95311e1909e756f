use regex::Regex;
use serde::Serialize;
use std::process::Command;

use crate::core::error::{Error, Result};
use crate::core::git::{is_peeled, split_branch_line, split_tag_line};

/// A git remote addressed by URL. All queries shell out to `git ls-remote`.
#[derive(Debug, Clone)]
pub struct Remote {
    pub url: String,
}

/// A tag as reported by the remote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTag {
    pub name: String,
    pub commit: String,
}

/// A branch as reported by the remote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBranch {
    pub name: String,
    pub commit: String,
}

impl Remote {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Lookup a single tag in the remote.
    pub fn tag(&self, name: &str) -> Result<RemoteTag> {
        let output = self.ls_remote(&["--tags", &self.url, name])?;
        let line = output.lines().next().unwrap_or("");
        let (commit, tag_name) = split_tag_line(line);
        if tag_name.is_empty() {
            return Err(Error::remote_ref_not_found(&self.url, name, "tag"));
        }
        Ok(RemoteTag {
            name: tag_name.to_string(),
            commit: commit.to_string(),
        })
    }

    /// Query the remote for its tags.
    ///
    /// If `filter` is set, only tags matching that regular expression are
    /// included. With `refs_only`, peeled `^{}` entries are dropped.
    pub fn tags(&self, filter: Option<&str>, refs_only: bool) -> Result<Vec<RemoteTag>> {
        let filter_re = compile_filter(filter)?;
        let output = self.ls_remote(&["--tags", &self.url])?;

        let mut tags = Vec::new();
        for line in output.lines() {
            let (commit, name) = split_tag_line(line);
            if name.is_empty() {
                continue;
            }
            if refs_only && is_peeled(name) {
                continue;
            }
            if let Some(re) = &filter_re {
                if !re.is_match(name) {
                    continue;
                }
            }
            tags.push(RemoteTag {
                name: name.to_string(),
                commit: commit.to_string(),
            });
        }
        Ok(tags)
    }

    /// Lookup a single branch in the remote.
    pub fn branch(&self, name: &str) -> Result<RemoteBranch> {
        let output = self.ls_remote(&[&self.url, name])?;
        let line = output.lines().next().unwrap_or("");
        let (commit, branch_name) = split_branch_line(line);
        if branch_name.is_empty() {
            return Err(Error::remote_ref_not_found(&self.url, name, "branch"));
        }
        Ok(RemoteBranch {
            name: branch_name.to_string(),
            commit: commit.to_string(),
        })
    }

    /// List available branches in the remote, optionally regex-filtered.
    pub fn branches(&self, filter: Option<&str>) -> Result<Vec<RemoteBranch>> {
        let filter_re = compile_filter(filter)?;
        let output = self.ls_remote(&["--heads", &self.url])?;

        let mut branches = Vec::new();
        for line in output.lines() {
            let (commit, name) = split_branch_line(line);
            if name.is_empty() {
                continue;
            }
            if let Some(re) = &filter_re {
                if !re.is_match(name) {
                    continue;
                }
            }
            branches.push(RemoteBranch {
                name: name.to_string(),
                commit: commit.to_string(),
            });
        }
        Ok(branches)
    }

    fn ls_remote(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .arg("ls-remote")
            .args(args)
            .output()
            .map_err(|e| {
                Error::git_command_failed(format!("Failed to run git ls-remote: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::git_command_failed(format!(
                "git ls-remote failed: {}",
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

fn compile_filter(filter: Option<&str>) -> Result<Option<Regex>> {
    match filter {
        Some(pattern) => {
            let re = Regex::new(pattern).map_err(|e| {
                Error::validation_invalid_argument(
                    "filter",
                    format!("Invalid regex: {}", e),
                    None,
                    None,
                )
            })?;
            Ok(Some(re))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_filter_accepts_valid_regex() {
        assert!(compile_filter(Some(r"^v\d+\.\d+\.\d+$")).unwrap().is_some());
        assert!(compile_filter(None).unwrap().is_none());
    }

    #[test]
    fn compile_filter_rejects_invalid_regex() {
        let err = compile_filter(Some("v(1")).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ValidationInvalidArgument);
    }
}
