use std::path::PathBuf;
use thiserror::Error;

/// Failures at the classifier boundary. Every variant is fatal for the
/// submission (or, at load time, for the process).
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read model artifact at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact at {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("model artifact is incompatible with the feature schema: {0}")]
    Incompatible(String),

    #[error("model input columns {found:?} do not match the classifier schema {expected:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("classifier produced an invalid probability: {0}")]
    InvalidOutput(String),
}
