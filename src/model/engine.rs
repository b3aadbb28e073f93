use std::path::Path;
use std::sync::Arc;

use super::artifact::LogisticClassifier;
use super::error::ModelError;
use crate::features::{ModelInput, MODEL_COLUMNS};

/// A trained binary classifier that scores one row at a time.
pub trait Classifier: Send + Sync {
    /// Model name for diagnostics.
    fn name(&self) -> &str;

    /// Column names the classifier was fit on, in order.
    fn columns(&self) -> &[String];

    /// Probability pair `[P(bad), P(good)]` for a single row.
    fn predict_proba(&self, input: &ModelInput) -> Result<[f64; 2], ModelError>;
}

/// Read-only handle to the loaded classifier, created once at startup and
/// shared by every submission.
#[derive(Clone)]
pub struct ScoringEngine {
    classifier: Arc<dyn Classifier>,
}

impl std::fmt::Debug for ScoringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringEngine")
            .field("classifier", &self.classifier.name())
            .finish()
    }
}

impl ScoringEngine {
    /// Wrap a classifier, refusing one whose schema differs from the model input columns.
    pub fn new(classifier: Arc<dyn Classifier>) -> Result<Self, ModelError> {
        let columns = classifier.columns();
        if !columns.iter().map(String::as_str).eq(MODEL_COLUMNS) {
            return Err(ModelError::Incompatible(format!(
                "classifier '{}' expects columns {:?}",
                classifier.name(),
                columns
            )));
        }
        Ok(Self { classifier })
    }

    /// Load the YAML model artifact at `path`. Any failure here is fatal:
    /// there is no fallback model.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let classifier = LogisticClassifier::load(path)?;
        Self::new(Arc::new(classifier))
    }

    pub fn model_name(&self) -> &str {
        self.classifier.name()
    }

    /// Probability that the applicant repays (index 1 of the classifier's pair).
    pub fn score(&self, input: &ModelInput) -> Result<f64, ModelError> {
        let expected = self.classifier.columns();
        if !input.names().eq(expected.iter().map(String::as_str)) {
            return Err(ModelError::SchemaMismatch {
                expected: expected.to_vec(),
                found: input.names().map(str::to_string).collect(),
            });
        }

        let proba = self.classifier.predict_proba(input)?;
        let proba_good = proba[1];
        if !(0.0..=1.0).contains(&proba_good) {
            return Err(ModelError::InvalidOutput(format!(
                "P(good) = {} is outside [0, 1]",
                proba_good
            )));
        }
        Ok(proba_good)
    }
}
