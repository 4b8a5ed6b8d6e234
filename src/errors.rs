//! Error types produced while reading diagram inputs or writing rendered output.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when a model, result or options file cannot be read.
///
/// Rendering itself never fails; these errors surface only from the explicit loading
/// functions so callers can decide whether to degrade or report.
///
/// # Examples
///
/// ```
/// use trussviz::{LoadError, Truss};
///
/// let error = Truss::load("does/not/exist.json").expect_err("missing file is rejected");
/// assert!(matches!(error, LoadError::Io { .. }));
/// ```
#[derive(Debug, Error)]
pub enum LoadError {
    /// Returned when the file cannot be opened or read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the file content is not the expected JSON shape.
    #[error("malformed JSON in {path}: {source}")]
    Parse {
        /// Path whose content was rejected.
        path: PathBuf,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// Returned when the file decodes but holds values that cannot be rendered.
    #[error("invalid options in {path}: {reason}")]
    Invalid {
        /// Path whose content was rejected.
        path: PathBuf,
        /// Which value is out of range.
        reason: String,
    },
}

/// Error returned when a rendered diagram cannot be written.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Returned when the SVG document cannot be saved.
    #[error("cannot write {path}: {source}")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Read a JSON document from `path` into `T`.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(
    path: &std::path::Path,
) -> Result<T, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
