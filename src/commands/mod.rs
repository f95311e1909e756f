use std::io::Read;
use std::path::{Path, PathBuf};

pub type CmdResult<T> = deckhand::Result<(T, i32)>;

pub struct GlobalArgs {}

/// Read JSON spec from string, file (@path), or stdin (-).
pub fn read_json_spec_to_string(spec: &str) -> deckhand::Result<String> {
    use std::io::IsTerminal;

    if spec.trim() == "-" {
        let mut buf = String::new();
        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(deckhand::Error::validation_invalid_argument(
                "json",
                "Cannot read JSON from stdin when stdin is a TTY",
                None,
                None,
            ));
        }
        stdin.read_to_string(&mut buf).map_err(|e| {
            deckhand::Error::internal_io(e.to_string(), Some("read stdin".to_string()))
        })?;
        return Ok(buf);
    }

    if let Some(path) = spec.strip_prefix('@') {
        if path.trim().is_empty() {
            return Err(deckhand::Error::validation_invalid_argument(
                "json",
                "Invalid JSON spec '@' (missing file path)",
                None,
                None,
            ));
        }
        return std::fs::read_to_string(Path::new(path)).map_err(|e| {
            deckhand::Error::internal_io(e.to_string(), Some(format!("read {}", path)))
        });
    }

    Ok(spec.to_string())
}

/// Expand `~` in user-supplied paths.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

pub mod cast;
pub mod config;
pub mod remote;
pub mod repo;
pub mod workspace;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (deckhand::Result<serde_json::Value>, i32) {
    crate::tty::status("deckhand is working...");

    match command {
        crate::Commands::Remote(args) => dispatch!(args, global, remote),
        crate::Commands::Repo(args) => dispatch!(args, global, repo),
        crate::Commands::Cast(args) => dispatch!(args, global, cast),
        crate::Commands::Workspace(args) => dispatch!(args, global, workspace),
        crate::Commands::Config(args) => dispatch!(args, global, config),
    }
}

pub(crate) fn run_raw(
    command: crate::Commands,
    _global: &GlobalArgs,
) -> deckhand::Result<(String, i32)> {
    match command {
        crate::Commands::Cast(args) => cast::run_raw(args),
        _ => Err(deckhand::Error::validation_invalid_argument(
            "output_mode",
            "Command does not support raw output",
            None,
            None,
        )),
    }
}
