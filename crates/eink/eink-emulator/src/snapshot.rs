//! PNG snapshot side channel
//!
//! Every simulated refresh can be written to disk so a developer can see what
//! the panel would show. Only the latest frame is kept: each refresh replaces
//! the previous file. Write failures are reported to the caller, which decides
//! whether they matter.

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use thiserror::Error;

/// Snapshot write errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Output directory could not be created
    #[error("cannot create {path}: {source}")]
    CreateDir {
        /// Directory that was being created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// PNG encode or file write failed
    #[error("cannot write {path}: {source}")]
    Write {
        /// File that was being written
        path: PathBuf,
        /// Underlying image error
        #[source]
        source: image::ImageError,
    },

    /// Finished PNG could not replace the previous snapshot
    #[error("cannot replace {path}: {source}")]
    Rename {
        /// Snapshot path being replaced
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Framebuffer did not convert into an image
    #[error("framebuffer does not match its dimensions")]
    Buffer,
}

/// File name of the retained snapshot
pub fn snapshot_name(prefix: &str) -> String {
    format!("{prefix}_latest.png")
}

/// Write `image` as PNG to `dir/file_name`, creating `dir` if needed
///
/// The PNG goes to a hidden temporary file first and is renamed over
/// `file_name`, so a reader never sees a half-written snapshot.
pub fn write_png(dir: &Path, file_name: &str, image: &RgbImage) -> Result<PathBuf, SnapshotError> {
    std::fs::create_dir_all(dir).map_err(|source| SnapshotError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(file_name);
    let partial = dir.join(format!(".{file_name}.partial"));
    image
        .save_with_format(&partial, ImageFormat::Png)
        .map_err(|source| SnapshotError::Write {
            path: partial.clone(),
            source,
        })?;
    std::fs::rename(&partial, &path).map_err(|source| {
        let _ = std::fs::remove_file(&partial);
        SnapshotError::Rename {
            path: path.clone(),
            source,
        }
    })?;
    Ok(path)
}
