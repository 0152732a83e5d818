//! On-disk format of the embedding table.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LookalikeError;

/// Serialized embedding table: parallel `ids` and `vectors`.
///
/// Written once by the offline build step, read once at process start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingArtifact {
    /// Encoder model that produced the vectors.
    pub model: String,
    pub dimension: usize,
    pub built_at: DateTime<Utc>,
    pub ids: Vec<i64>,
    pub vectors: Vec<Vec<f32>>,
}

impl EmbeddingArtifact {
    /// Read an artifact from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LookalikeError::NotFound`] if the file does not exist,
    /// [`LookalikeError::Io`] for other read failures, and
    /// [`LookalikeError::Json`] if the contents do not parse.
    pub fn read(path: &Path) -> Result<Self, LookalikeError> {
        let bytes = fs::read(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                LookalikeError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                LookalikeError::Io {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Write the artifact to `path`, creating parent directories as needed.
    ///
    /// Writes to a sibling temp file and renames it into place, so a reader
    /// never observes a half-written artifact.
    ///
    /// # Errors
    ///
    /// Returns [`LookalikeError::Io`] on any filesystem failure.
    pub fn write(&self, path: &Path) -> Result<(), LookalikeError> {
        let io_err = |p: &Path| {
            let p = p.to_path_buf();
            move |source| LookalikeError::Io { path: p, source }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }

        let tmp = tmp_path(path);
        let json = serde_json::to_vec(self)?;
        fs::write(&tmp, json).map_err(io_err(&tmp))?;
        fs::rename(&tmp, path).map_err(io_err(path))?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
