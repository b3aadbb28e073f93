pub mod artifact;
pub mod engine;
pub mod error;

#[cfg(test)]
pub(crate) mod fixtures;

pub use artifact::{validate_artifact, ColumnKind, ColumnSpec, LogisticClassifier, ModelArtifact};
pub use engine::{Classifier, ScoringEngine};
pub use error::ModelError;
