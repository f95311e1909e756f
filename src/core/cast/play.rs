//! Playback glue: hand a cast file to the local asciinema player.

use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::core::error::{Error, Result};
use crate::utils::command;

/// Result of a playback run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayOutput {
    pub player: String,
    pub file: String,
    pub exit_code: i32,
}

/// Play a cast file with the configured player, inheriting stdio.
pub fn play_file(player: &str, file: &Path) -> Result<PlayOutput> {
    let file_str = file.to_string_lossy().to_string();
    let exit_code = command::run_interactive(player, &[&file_str])?;
    Ok(PlayOutput {
        player: player.to_string(),
        file: file_str,
        exit_code,
    })
}

/// Play an in-memory cast by spilling it to a temp file first.
pub fn play_cast(player: &str, cast: &crate::cast::Cast) -> Result<PlayOutput> {
    let encoded = crate::cast::encode(cast)?;

    let mut tmp = tempfile::Builder::new()
        .prefix("deckhand-")
        .suffix(".cast")
        .tempfile()
        .map_err(|e| Error::internal_io(e.to_string(), Some("create temp cast".to_string())))?;
    tmp.write_all(encoded.as_bytes())
        .map_err(|e| Error::internal_io(e.to_string(), Some("write temp cast".to_string())))?;

    play_file(player, tmp.path())
}
