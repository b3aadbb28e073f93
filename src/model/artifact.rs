use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use super::engine::Classifier;
use super::error::ModelError;
use crate::applicant::{AccountType, AgeGroup, EmploymentStatus};
use crate::features::{is_categorical, ModelInput, ModelValue, MODEL_COLUMNS};

pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

/// On-disk description of a trained logistic classifier.
///
/// Example YAML:
/// ```yaml
/// format_version: 1
/// name: loan_default
/// intercept: 0.42
/// columns:
///   - name: repayment_curr_ratio
///     kind: numeric
///     mean: 1.0
///     scale: 0.35
///     weight: 0.8
///   - name: age_group
///     kind: categorical
///     levels: { "adults": 0.1, "middle-aged adults": 0.2 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModelArtifact {
    pub format_version: u32,

    #[serde(default)]
    pub name: Option<String>,

    pub intercept: f64,

    /// One entry per model input column, in training order.
    pub columns: Vec<ColumnSpec>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,

    // Numeric columns: standardised as (x - mean) / scale, then weighted
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,

    /// Categorical columns: one-hot weight per level. Levels not listed
    /// are the reference category and contribute nothing.
    #[serde(default)]
    pub levels: Option<BTreeMap<String, f64>>,
}

/// Category labels a categorical model column may legally carry.
pub fn allowed_levels(column: &str) -> Option<Vec<&'static str>> {
    match column {
        "age_group" => Some(AgeGroup::ALL.iter().map(|v| v.label()).collect()),
        "bank_account_type" => Some(AccountType::ALL.iter().map(|v| v.label()).collect()),
        "employment_status_clients" => {
            Some(EmploymentStatus::ALL.iter().map(|v| v.label()).collect())
        }
        _ => None,
    }
}

/// Check an artifact against the fixed model input schema.
/// Returns all problems at once (not just the first).
pub fn validate_artifact(artifact: &ModelArtifact) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if artifact.format_version != SUPPORTED_FORMAT_VERSION {
        errors.push(format!(
            "format_version: unsupported version {} (expected {})",
            artifact.format_version, SUPPORTED_FORMAT_VERSION
        ));
    }

    if !artifact.intercept.is_finite() {
        errors.push("intercept: must be finite".to_string());
    }

    let names: Vec<&str> = artifact.columns.iter().map(|c| c.name.as_str()).collect();
    if names != MODEL_COLUMNS {
        errors.push(format!(
            "columns: expected {:?} in this order, found {:?}",
            MODEL_COLUMNS, names
        ));
    }

    for (i, column) in artifact.columns.iter().enumerate() {
        let expected_kind = if is_categorical(&column.name) {
            ColumnKind::Categorical
        } else {
            ColumnKind::Numeric
        };
        if column.kind != expected_kind {
            errors.push(format!(
                "columns[{}] ({}): kind must be {:?}",
                i, column.name, expected_kind
            ));
            continue;
        }

        match column.kind {
            ColumnKind::Numeric => {
                if column.levels.is_some() {
                    errors.push(format!("columns[{}] ({}): numeric column cannot list levels", i, column.name));
                }
                match column.weight {
                    Some(w) if w.is_finite() => {}
                    Some(_) => errors.push(format!("columns[{}] ({}): weight must be finite", i, column.name)),
                    None => errors.push(format!("columns[{}] ({}): weight is required", i, column.name)),
                }
                if let Some(mean) = column.mean {
                    if !mean.is_finite() {
                        errors.push(format!("columns[{}] ({}): mean must be finite", i, column.name));
                    }
                }
                if let Some(scale) = column.scale {
                    if !(scale.is_finite() && scale > 0.0) {
                        errors.push(format!(
                            "columns[{}] ({}): scale must be a positive number",
                            i, column.name
                        ));
                    }
                }
            }
            ColumnKind::Categorical => {
                if column.mean.is_some() || column.scale.is_some() || column.weight.is_some() {
                    errors.push(format!(
                        "columns[{}] ({}): categorical column takes levels, not mean/scale/weight",
                        i, column.name
                    ));
                }
                let allowed = allowed_levels(&column.name).unwrap_or_default();
                for (level, weight) in column.levels.iter().flatten() {
                    if !allowed.iter().any(|a| *a == level.as_str()) {
                        errors.push(format!(
                            "columns[{}] ({}): unknown level '{}'",
                            i, column.name, level
                        ));
                    }
                    if !weight.is_finite() {
                        errors.push(format!(
                            "columns[{}] ({}): weight for level '{}' must be finite",
                            i, column.name, level
                        ));
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[derive(Debug, Clone)]
enum Term {
    Numeric { mean: f64, scale: f64, weight: f64 },
    Categorical { levels: HashMap<String, f64> },
}

/// Logistic regression over standardised numeric columns and one-hot
/// categorical columns, evaluated one row at a time.
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    name: String,
    intercept: f64,
    columns: Vec<String>,
    terms: Vec<Term>,
}

impl LogisticClassifier {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        validate_artifact(&artifact).map_err(|errors| ModelError::Incompatible(errors.join("; ")))?;

        let mut columns = Vec::with_capacity(artifact.columns.len());
        let mut terms = Vec::with_capacity(artifact.columns.len());
        for spec in artifact.columns {
            let term = match spec.kind {
                ColumnKind::Numeric => Term::Numeric {
                    mean: spec.mean.unwrap_or(0.0),
                    scale: spec.scale.unwrap_or(1.0),
                    weight: spec.weight.unwrap_or(0.0),
                },
                ColumnKind::Categorical => Term::Categorical {
                    levels: spec.levels.unwrap_or_default().into_iter().collect(),
                },
            };
            columns.push(spec.name);
            terms.push(term);
        }

        Ok(Self {
            name: artifact.name.unwrap_or_else(|| "unnamed".to_string()),
            intercept: artifact.intercept,
            columns,
            terms,
        })
    }

    /// Parse and validate an artifact held in memory. `origin` only labels errors.
    pub fn from_yaml_str(yaml: &str, origin: &Path) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_saphyr::from_str(yaml).map_err(|e| ModelError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_artifact(artifact)
    }

    /// Load a classifier from a YAML artifact on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The artifact does not exist
    /// - The artifact cannot be read
    /// - The YAML cannot be parsed
    /// - The columns do not match the model input schema
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content, path)
    }

    fn logit(&self, input: &ModelInput) -> Result<f64, ModelError> {
        let mut z = self.intercept;
        for (term, column) in self.terms.iter().zip(input.columns()) {
            match (term, column.value) {
                (Term::Numeric { mean, scale, weight }, ModelValue::Number(x)) => {
                    z += weight * (x - mean) / scale;
                }
                (Term::Categorical { levels }, ModelValue::Category(label)) => {
                    z += levels.get(label).copied().unwrap_or(0.0);
                }
                _ => {
                    return Err(ModelError::SchemaMismatch {
                        expected: self.columns.clone(),
                        found: input.names().map(str::to_string).collect(),
                    })
                }
            }
        }
        Ok(z)
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl Classifier for LogisticClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn predict_proba(&self, input: &ModelInput) -> Result<[f64; 2], ModelError> {
        let p_good = sigmoid(self.logit(input)?);
        Ok([1.0 - p_good, p_good])
    }
}
