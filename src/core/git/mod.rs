//! Git plumbing over the local `git` binary.
//!
//! `remote` queries refs on a remote via `git ls-remote`; `repository`
//! drives a local bare-state-dir + worktree pair through git invocations.

pub mod remote;
pub mod repository;

pub use remote::{Remote, RemoteBranch, RemoteTag};
pub use repository::{Commit, GitCommand, GitOutput, Repository, Tag};

/// Split one `ls-remote` output line into `(commit, name)`.
///
/// Lines look like `<sha>\t<refname>`. The prefix (e.g. `refs/tags/`) is
/// trimmed from the name when present. A line without a tab yields an
/// empty name, which list operations skip.
pub(crate) fn split_ref_line<'a>(line: &'a str, trim_prefix: &str) -> (&'a str, &'a str) {
    match line.split_once('\t') {
        Some((commit, name)) => {
            let name = name.strip_prefix(trim_prefix).unwrap_or(name);
            (commit, name)
        }
        None => (line, ""),
    }
}

pub(crate) fn split_tag_line(line: &str) -> (&str, &str) {
    split_ref_line(line, "refs/tags/")
}

pub(crate) fn split_branch_line(line: &str) -> (&str, &str) {
    split_ref_line(line, "refs/heads/")
}

/// Whether a ref name is a peeled annotated-tag entry (`name^{}`).
///
/// `ls-remote --tags` emits these alongside the tag itself; callers that
/// want only real refs can filter them out.
pub fn is_peeled(name: &str) -> bool {
    name.ends_with("^{}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_tag_line_trims_prefix() {
        let (commit, name) =
            split_tag_line("4f5e2a914b0e1f6c9a3d8b7c6e5f4a3b2c1d0e9f\trefs/tags/v1.2.3");
        assert_eq!(commit, "4f5e2a914b0e1f6c9a3d8b7c6e5f4a3b2c1d0e9f");
        assert_eq!(name, "v1.2.3");
    }

    #[test]
    fn split_branch_line_trims_heads_prefix() {
        let (commit, name) = split_branch_line("abc123\trefs/heads/main");
        assert_eq!(commit, "abc123");
        assert_eq!(name, "main");
    }

    #[test]
    fn split_ref_line_without_tab_has_empty_name() {
        let (commit, name) = split_tag_line("abc123");
        assert_eq!(commit, "abc123");
        assert_eq!(name, "");
    }

    #[test]
    fn split_ref_line_keeps_unprefixed_names() {
        let (commit, name) = split_tag_line("abc123\tHEAD");
        assert_eq!(commit, "abc123");
        assert_eq!(name, "HEAD");
    }

    #[test]
    fn peeled_entries_are_detected() {
        assert!(is_peeled("v1.0.0^{}"));
        assert!(!is_peeled("v1.0.0"));
    }
}
