//! Small hand-computable model used across unit tests.

use std::collections::BTreeMap;

use super::artifact::{ColumnKind, ColumnSpec, ModelArtifact};
use crate::features::{is_categorical, MODEL_COLUMNS};

/// Every weight is zero except `repayment_curr_ratio` (centred on 1.0) and
/// the `adults` age group (+0.5), so the default record with `adults`
/// scores exactly sigmoid(0.5).
pub fn sample_artifact() -> ModelArtifact {
    let columns = MODEL_COLUMNS
        .iter()
        .map(|name| {
            if is_categorical(name) {
                let mut levels = BTreeMap::new();
                if *name == "age_group" {
                    levels.insert("adults".to_string(), 0.5);
                }
                ColumnSpec {
                    name: name.to_string(),
                    kind: ColumnKind::Categorical,
                    mean: None,
                    scale: None,
                    weight: None,
                    levels: Some(levels),
                }
            } else {
                let (mean, weight) = if *name == "repayment_curr_ratio" {
                    (1.0, 1.0)
                } else {
                    (0.0, 0.0)
                };
                ColumnSpec {
                    name: name.to_string(),
                    kind: ColumnKind::Numeric,
                    mean: Some(mean),
                    scale: Some(1.0),
                    weight: Some(weight),
                    levels: None,
                }
            }
        })
        .collect();

    ModelArtifact {
        format_version: 1,
        name: Some("fixture".to_string()),
        intercept: 0.0,
        columns,
    }
}

pub const SAMPLE_ARTIFACT_YAML: &str = r#"
format_version: 1
name: fixture
intercept: 0.0
columns:
  - { name: repayment_curr_ratio, kind: numeric, mean: 1.0, scale: 1.0, weight: 1.0 }
  - { name: num_prev_loans, kind: numeric, weight: 0.0 }
  - { name: avg_repay_delay_days, kind: numeric, weight: 0.0 }
  - { name: total_firstrepaid_late, kind: numeric, weight: 0.0 }
  - { name: avg_prev_repayment_ratio, kind: numeric, weight: 0.0 }
  - { name: avg_duration_days, kind: numeric, weight: 0.0 }
  - { name: age, kind: numeric, weight: 0.0 }
  - name: age_group
    kind: categorical
    levels:
      adults: 0.5
  - { name: sqrt_late_payment_rate, kind: numeric, weight: 0.0 }
  - { name: sqrt_termdays, kind: numeric, weight: 0.0 }
  - { name: sqrt_loanamount, kind: numeric, weight: 0.0 }
  - { name: sqrt_avg_prev_interest, kind: numeric, weight: 0.0 }
  - { name: sqrt_repayment_burden, kind: numeric, weight: 0.0 }
  - { name: sqrt_repayment_efficiency, kind: numeric, weight: 0.0 }
  - { name: bank_account_type, kind: categorical }
  - { name: employment_status_clients, kind: categorical }
"#;
