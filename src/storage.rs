//! File access behind a small trait so the session can be driven without a disk.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::TaskError;

/// Whole-file line access to the task file.
pub trait Storage {
    /// Read every line of the file at `path`.
    fn read_all_lines(&self, path: &Path) -> Result<Vec<String>, TaskError>;

    /// Replace the content of the file at `path` with `lines`.
    fn write_all_lines(&mut self, path: &Path, lines: &[String]) -> Result<(), TaskError>;
}

/// Storage on the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskStorage;

impl Storage for DiskStorage {
    fn read_all_lines(&self, path: &Path) -> Result<Vec<String>, TaskError> {
        let content = fs::read_to_string(path).map_err(|source| TaskError::Storage {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = content.len(), "read task file");
        Ok(content.lines().map(str::to_string).collect())
    }

    fn write_all_lines(&mut self, path: &Path, lines: &[String]) -> Result<(), TaskError> {
        let storage_err = |source| TaskError::Storage {
            path: path.to_path_buf(),
            source,
        };

        let mut data = String::new();
        for line in lines {
            data.push_str(line);
            data.push('\n');
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(storage_err)?;
        }
        // Atomic-ish write via temp + rename.
        let tmp = temp_path(path);
        if let Err(e) = fs::write(&tmp, data.as_bytes()).and_then(|_| fs::rename(&tmp, path)) {
            let _ = fs::remove_file(&tmp);
            return Err(storage_err(e));
        }
        debug!(path = %path.display(), lines = lines.len(), "wrote task file");
        Ok(())
    }
}

/// Sibling of `path` with `.tmp` appended to the full file name.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// In-memory storage for driving a session in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    pub files: std::collections::HashMap<std::path::PathBuf, Vec<String>>,
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn read_all_lines(&self, path: &Path) -> Result<Vec<String>, TaskError> {
        self.files.get(path).cloned().ok_or_else(|| TaskError::Storage {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
    }

    fn write_all_lines(&mut self, path: &Path, lines: &[String]) -> Result<(), TaskError> {
        self.files.insert(path.to_path_buf(), lines.to_vec());
        Ok(())
    }
}
