use crate::shared::error::EnvError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Upper bound for anything read from disk: snapshots, config, `index.json`
/// and `METADATA` files (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn read_error(path: &Path, details: impl ToString) -> anyhow::Error {
    EnvError::FileReadError {
        path: path.to_path_buf(),
        details: details.to_string(),
    }
    .into()
}

/// Checks that `path` is a regular file of acceptable size.
///
/// The link itself is inspected with `symlink_metadata()`, so a symlink is
/// rejected even when its target is a valid file.
///
/// # Errors
/// `EnvError::SecurityError` for symlinks and oversized files,
/// `EnvError::FileReadError` when the path is missing or not a file.
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| read_error(path, format!("cannot stat {}: {}", file_description, e)))?;

    if metadata.is_symlink() {
        return Err(EnvError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Pass the real file path instead of a link".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(read_error(
            path,
            format!("{} is not a regular file", file_description),
        ));
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)
}

pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(EnvError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("file is too large ({} bytes, limit {})", file_size, max_size),
            hint: "Environment snapshots and package metadata are never this big; check the path"
                .to_string(),
        }
        .into());
    }
    Ok(())
}

/// Reads a file after [`validate_regular_file`] passes.
pub fn safe_read_to_string(path: &Path, file_description: &str) -> Result<String> {
    validate_regular_file(path, file_description)?;
    fs::read_to_string(path).map_err(|e| read_error(path, e))
}
