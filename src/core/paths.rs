use std::path::PathBuf;

/// Directory holding deckhand configuration.
///
/// `DECKHAND_CONFIG_DIR` overrides the default `~/.config/deckhand`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DECKHAND_CONFIG_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(shellexpand::tilde(&dir).to_string());
        }
    }
    PathBuf::from(shellexpand::tilde("~/.config/deckhand").to_string())
}

/// Path to the optional deckhand.json defaults file.
pub fn deckhand_json() -> PathBuf {
    config_dir().join("deckhand.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deckhand_json_lives_under_config_dir() {
        let path = deckhand_json();
        assert!(path.ends_with("deckhand.json"));
        assert!(path.starts_with(config_dir()));
    }
}
