// Error types shared by the catalog operations. Warnings that do not abort
// an operation (a missing image, a name collision) are not errors; they are
// reported through `catalog::AssignReport` instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid index format: '{0}'")]
    InvalidIndexRange(String),
    #[error("range '{token}' covers more than {limit} indices")]
    RangeTooWide { token: String, limit: u32 },
    #[error("project title must not be empty")]
    MissingTitle,
    #[error("year must be a whole number, got '{0}'")]
    InvalidYear(String),
    #[error("failed to rename '{}' to '{}': {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not read catalog {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a list of project objects: {reason}", path.display())]
    CatalogShape { path: PathBuf, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("catalog serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
