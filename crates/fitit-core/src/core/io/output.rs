use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What to do when the destination of a rendered project already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Refuse to touch an existing file.
    #[default]
    CreateNew,
    /// Truncate and replace an existing file.
    Overwrite,
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to save, file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Destination directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Failed to write '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes `text` to `path` under `policy`, returning the number of bytes written.
pub fn write_output(path: &Path, text: &str, policy: WritePolicy) -> Result<usize, WriteError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(WriteError::MissingDirectory(parent.to_path_buf()));
        }
    }

    let mut options = OpenOptions::new();
    options.write(true);
    match policy {
        WritePolicy::CreateNew => options.create_new(true),
        WritePolicy::Overwrite => options.create(true).truncate(true),
    };

    let io_err = |source: std::io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = options.open(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => WriteError::AlreadyExists(path.to_path_buf()),
        _ => io_err(e),
    })?;
    file.write_all(text.as_bytes()).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    Ok(text.len())
}
