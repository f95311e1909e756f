//! Filesystem helpers with consistent error mapping.

use std::path::Path;

use crate::core::error::{Error, Result};

pub fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("read {}", path.display()))))
}

pub fn write(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::internal_io(e.to_string(), Some(format!("create {}", parent.display())))
            })?;
        }
    }
    std::fs::write(path, contents)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("write {}", path.display()))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parent_directories() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("nested/dir/file.txt");
        write(&path, "content").expect("write");
        assert_eq!(read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn read_missing_file_is_an_io_error() {
        let err = read_to_string(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::InternalIoError);
    }
}
