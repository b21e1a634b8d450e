use std::fmt;

/// Core error type for the relay.
///
/// Adapter crates map their library errors into this type so the pipeline
/// can handle failures consistently (user-facing message vs startup-fatal).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("file retrieval failed: {0}")]
    Retrieval(String),

    #[error("storage {stage} failed: {reason}")]
    Storage { stage: StorageStage, reason: String },

    #[error("submission failed: {0}")]
    Submission(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which half of a store() call failed. Kept separate so orphan-object
/// diagnostics can tell a failed upload from a failed signing request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageStage {
    Upload,
    Sign,
}

impl fmt::Display for StorageStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageStage::Upload => f.write_str("upload"),
            StorageStage::Sign => f.write_str("sign"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
