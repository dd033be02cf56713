//! Byte-level file primitives used by notes.
//!
//! Notes never call `std::fs` directly; everything goes through [`Storage`] so
//! tests can observe or replace the filesystem.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to {op} {path}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("editor command is empty")]
    EmptyEditor,

    #[error("failed to launch editor '{program}': {source}")]
    EditorLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("editor '{program}' exited with {status}")]
    EditorExit { program: String, status: ExitStatus },
}

pub type StorageResult<T> = Result<T, StorageError>;

pub trait Storage: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> StorageResult<Vec<u8>>;

    /// Write `bytes`, creating parent directories as needed.
    fn write(&self, path: &Path, bytes: &[u8]) -> StorageResult<()>;

    /// Remove the file. A missing file is not an error.
    fn delete(&self, path: &Path) -> StorageResult<()>;

    /// Run `program` on `path` with inherited stdio and wait for it to exit.
    fn open_external(&self, path: &Path, program: &str) -> StorageResult<()>;
}

/// [`Storage`] backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl FsStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for FsStorage {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> StorageResult<Vec<u8>> {
        fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(path.to_path_buf()),
            _ => StorageError::Io { op: "read", path: path.to_path_buf(), source: e },
        })
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                op: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(path, bytes).map_err(|e| StorageError::Io {
            op: "write",
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn delete(&self, path: &Path) -> StorageResult<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(StorageError::Io { op: "delete", path: path.to_path_buf(), source: e })
            }
        }
    }

    fn open_external(&self, path: &Path, program: &str) -> StorageResult<()> {
        let mut parts = program.split_whitespace();
        let bin = parts.next().ok_or(StorageError::EmptyEditor)?;

        let status = Command::new(bin)
            .args(parts)
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| StorageError::EditorLaunch { program: program.to_string(), source: e })?;

        if status.success() {
            Ok(())
        } else {
            Err(StorageError::EditorExit { program: program.to_string(), status })
        }
    }
}
