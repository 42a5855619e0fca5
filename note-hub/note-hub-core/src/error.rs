use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, NoteError>;

/// Which stage of loading a backing document failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFailure {
    Io,
    Parse,
}

impl std::fmt::Display for StorageFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageFailure::Io => f.write_str("io"),
            StorageFailure::Parse => f.write_str("parse"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("storage unavailable ({kind}) at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        kind: StorageFailure,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Note with ID {0} was not found.")]
    NotFound(u64),
    #[error("missing or rejected identity")]
    Unauthenticated,
    #[error("no note id left to allocate")]
    IdSpaceExhausted,
}

impl NoteError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        NoteError::StorageUnavailable {
            path: path.into(),
            kind: StorageFailure::Io,
            source: Box::new(err),
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, err: serde_json::Error) -> Self {
        NoteError::StorageUnavailable {
            path: path.into(),
            kind: StorageFailure::Parse,
            source: Box::new(err),
        }
    }
}
