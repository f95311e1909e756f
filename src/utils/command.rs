//! Command execution primitives with consistent error handling.

use std::process::{Command, Stdio};

use crate::core::error::{Error, Result};

/// Run a command with inherited stdio, for interactive tools.
///
/// Returns the child's exit code. A missing binary maps to a
/// tool-not-found error rather than a generic IO failure.
pub fn run_interactive(program: &str, args: &[&str]) -> Result<i32> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found(program)
            } else {
                Error::internal_io(
                    format!("Failed to run {}: {}", program, e),
                    Some(program.to_string()),
                )
            }
        })?;

    Ok(status.code().unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_interactive_maps_missing_binary_to_tool_not_found() {
        let err = run_interactive("nonexistent_command_xyz", &[]).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ToolNotFound);
    }

    #[test]
    fn run_interactive_reports_child_exit_code() {
        let code = run_interactive("true", &[]).expect("run true");
        assert_eq!(code, 0);
        let code = run_interactive("false", &[]).expect("run false");
        assert_ne!(code, 0);
    }
}
