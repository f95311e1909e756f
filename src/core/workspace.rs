//! Workspace hygiene checks for multi-module repositories.
//!
//! `clean_go_workspace` scans a directory of Go modules and renames
//! `module main` declarations to the directory name, which fixes IDE
//! auto-complete in repositories hosting several modules side by side.

use serde::Serialize;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use crate::core::error::{Error, Result};

/// Outcome of inspecting one workspace entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRewrite {
    pub dir: String,
    pub path: String,
    pub module_name: String,
    pub renamed: bool,
}

/// Scan a Go workspace for modules called "main" and rename them to the
/// directory name. Entries without a readable `go.mod` are skipped.
///
/// The per-entry reads fan out across threads with results collected over
/// a channel; completion order is not significant, so the outcomes are
/// sorted by directory before returning.
pub fn clean_go_workspace(root: &Path) -> Result<Vec<ModuleRewrite>> {
    if !root.is_dir() {
        return Err(Error::workspace_not_a_directory(
            root.to_string_lossy().to_string(),
        ));
    }

    let entries = std::fs::read_dir(root).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read {}", root.display())))
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read {}", root.display())))
        })?;
        if entry.path().is_dir() {
            dirs.push(entry.file_name().to_string_lossy().to_string());
        }
    }

    let (sender, receiver) = mpsc::channel::<(ModuleRewrite, String)>();
    let mut handles = Vec::with_capacity(dirs.len());

    for dirname in dirs {
        let sender = sender.clone();
        let root = root.to_path_buf();
        handles.push(thread::spawn(move || {
            let go_mod = root.join(&dirname).join("go.mod");
            // Missing or unreadable go.mod means "not a module here"
            let contents = match std::fs::read_to_string(&go_mod) {
                Ok(contents) => contents,
                Err(_) => return,
            };

            // "go" is a forbidden module name
            let module_name = if dirname == "go" {
                "golang".to_string()
            } else {
                dirname.clone()
            };

            let rewritten =
                contents.replacen("module main", &format!("module {}", module_name), 1);
            let renamed = rewritten != contents;

            let rewrite = ModuleRewrite {
                dir: dirname,
                path: go_mod.to_string_lossy().to_string(),
                module_name,
                renamed,
            };
            // Receiver hangs up only if the caller bailed; nothing to do then
            let _ = sender.send((rewrite, rewritten));
        }));
    }
    drop(sender);

    let mut results = Vec::new();
    for (rewrite, contents) in receiver {
        if rewrite.renamed {
            std::fs::write(&rewrite.path, contents).map_err(|e| {
                Error::internal_io(e.to_string(), Some(format!("write {}", rewrite.path)))
            })?;
        }
        results.push(rewrite);
    }

    for handle in handles {
        let _ = handle.join();
    }

    results.sort_by(|a, b| a.dir.cmp(&b.dir));
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_module(root: &Path, dir: &str, contents: &str) {
        let module_dir = root.join(dir);
        std::fs::create_dir_all(&module_dir).expect("create module dir");
        std::fs::write(module_dir.join("go.mod"), contents).expect("write go.mod");
    }

    #[test]
    fn renames_main_modules_to_dir_name() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_module(tmp.path(), "alpha", "module main\n\ngo 1.21\n");
        write_module(tmp.path(), "beta", "module beta\n\ngo 1.21\n");

        let results = clean_go_workspace(tmp.path()).expect("clean workspace");
        assert_eq!(results.len(), 2);

        let alpha = results.iter().find(|r| r.dir == "alpha").unwrap();
        assert!(alpha.renamed);
        let rewritten = std::fs::read_to_string(tmp.path().join("alpha/go.mod")).unwrap();
        assert!(rewritten.starts_with("module alpha\n"));

        let beta = results.iter().find(|r| r.dir == "beta").unwrap();
        assert!(!beta.renamed);
    }

    #[test]
    fn go_dir_becomes_golang() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_module(tmp.path(), "go", "module main\n");

        let results = clean_go_workspace(tmp.path()).expect("clean workspace");
        assert_eq!(results[0].module_name, "golang");
        let rewritten = std::fs::read_to_string(tmp.path().join("go/go.mod")).unwrap();
        assert!(rewritten.starts_with("module golang"));
    }

    #[test]
    fn dirs_without_go_mod_are_skipped() {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(tmp.path().join("docs")).expect("create dir");
        write_module(tmp.path(), "svc", "module main\n");

        let results = clean_go_workspace(tmp.path()).expect("clean workspace");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].dir, "svc");
    }

    #[test]
    fn only_first_occurrence_is_replaced() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_module(tmp.path(), "svc", "module main\n// module main appears here too\n");

        clean_go_workspace(tmp.path()).expect("clean workspace");
        let rewritten = std::fs::read_to_string(tmp.path().join("svc/go.mod")).unwrap();
        assert_eq!(rewritten, "module svc\n// module main appears here too\n");
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let missing = tmp.path().join("nope");
        let err = clean_go_workspace(&missing).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::WorkspaceNotADirectory);
    }

    #[test]
    fn results_are_sorted_by_dir() {
        let tmp = tempfile::tempdir().expect("tempdir");
        for dir in ["zeta", "alpha", "mid"] {
            write_module(tmp.path(), dir, "module main\n");
        }
        let results = clean_go_workspace(tmp.path()).expect("clean workspace");
        let dirs: Vec<&str> = results.iter().map(|r| r.dir.as_str()).collect();
        assert_eq!(dirs, vec!["alpha", "mid", "zeta"]);
    }
}
