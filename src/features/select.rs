use serde::Serialize;

use super::derive::FeatureVector;
use crate::applicant::RawInputRecord;

/// Columns the classifier was fit on, in training order.
pub const MODEL_COLUMNS: [&str; 16] = [
    "repayment_curr_ratio",
    "num_prev_loans",
    "avg_repay_delay_days",
    "total_firstrepaid_late",
    "avg_prev_repayment_ratio",
    "avg_duration_days",
    "age",
    "age_group",
    "sqrt_late_payment_rate",
    "sqrt_termdays",
    "sqrt_loanamount",
    "sqrt_avg_prev_interest",
    "sqrt_repayment_burden",
    "sqrt_repayment_efficiency",
    "bank_account_type",
    "employment_status_clients",
];

/// Columns in [`MODEL_COLUMNS`] that carry a category label instead of a number.
pub const CATEGORICAL_COLUMNS: [&str; 3] = ["age_group", "bank_account_type", "employment_status_clients"];

pub fn is_categorical(column: &str) -> bool {
    CATEGORICAL_COLUMNS.iter().any(|c| *c == column)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModelValue {
    Number(f64),
    Category(&'static str),
}

impl ModelValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ModelValue::Number(n) => Some(*n),
            ModelValue::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&'static str> {
        match self {
            ModelValue::Number(_) => None,
            ModelValue::Category(c) => Some(*c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelColumn {
    pub name: &'static str,
    pub value: ModelValue,
}

/// One ordered, named row handed to the classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ModelInput {
    columns: Vec<ModelColumn>,
}

impl ModelInput {
    pub fn new(columns: Vec<ModelColumn>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[ModelColumn] {
        &self.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }

    pub fn get(&self, name: &str) -> Option<ModelValue> {
        self.columns.iter().find(|c| c.name == name).map(|c| c.value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Project a record and its derived features onto [`MODEL_COLUMNS`].
///
/// `bank_name_clients`, the raw amount/term/interest/late-count values and the
/// unrooted ratios are deliberately left out.
pub fn select(record: &RawInputRecord, features: &FeatureVector) -> ModelInput {
    use ModelValue::{Category, Number};

    let column = |name: &'static str, value: ModelValue| ModelColumn { name, value };

    ModelInput::new(vec![
        column("repayment_curr_ratio", Number(record.repayment_curr_ratio)),
        column("num_prev_loans", Number(record.num_prev_loans)),
        column("avg_repay_delay_days", Number(record.avg_repay_delay_days)),
        column("total_firstrepaid_late", Number(record.total_firstrepaid_late)),
        column("avg_prev_repayment_ratio", Number(record.avg_prev_repayment_ratio)),
        column("avg_duration_days", Number(record.avg_duration_days)),
        column("age", Number(record.age as f64)),
        column("age_group", Category(record.age_group.label())),
        column("sqrt_late_payment_rate", Number(features.sqrt_late_payment_rate)),
        column("sqrt_termdays", Number(features.sqrt_termdays)),
        column("sqrt_loanamount", Number(features.sqrt_loanamount)),
        column("sqrt_avg_prev_interest", Number(features.sqrt_avg_prev_interest)),
        column("sqrt_repayment_burden", Number(features.sqrt_repayment_burden)),
        column("sqrt_repayment_efficiency", Number(features.sqrt_repayment_efficiency)),
        column("bank_account_type", Category(record.bank_account_type.label())),
        column(
            "employment_status_clients",
            Category(record.employment_status_clients.label()),
        ),
    ])
}
