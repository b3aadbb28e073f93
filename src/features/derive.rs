use serde::Serialize;

use crate::applicant::RawInputRecord;

/// Added to ratio denominators so a zero count or zero ratio never divides by zero.
pub const EPSILON: f64 = 1e-6;

/// Derived columns computed once per submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    pub late_payment_rate: f64,
    pub repayment_efficiency: f64,
    pub repayment_burden: f64,
    pub sqrt_loanamount: f64,
    pub sqrt_termdays: f64,
    pub sqrt_avg_prev_interest: f64,
    pub sqrt_repayment_burden: f64,
    pub sqrt_repayment_efficiency: f64,
    pub sqrt_late_payment_rate: f64,
}

impl FeatureVector {
    /// Column names paired with values, in derivation order.
    pub fn columns(&self) -> [(&'static str, f64); 9] {
        [
            ("late_payment_rate", self.late_payment_rate),
            ("repayment_efficiency", self.repayment_efficiency),
            ("repayment_burden", self.repayment_burden),
            ("sqrt_loanamount", self.sqrt_loanamount),
            ("sqrt_termdays", self.sqrt_termdays),
            ("sqrt_avg_prev_interest", self.sqrt_avg_prev_interest),
            ("sqrt_repayment_burden", self.sqrt_repayment_burden),
            ("sqrt_repayment_efficiency", self.sqrt_repayment_efficiency),
            ("sqrt_late_payment_rate", self.sqrt_late_payment_rate),
        ]
    }
}

/// Compute the derived feature columns for one record.
///
/// Pure and total. No validation happens here: inputs outside the declared
/// domains (negative counts, for instance) simply flow through the arithmetic.
pub fn derive(record: &RawInputRecord) -> FeatureVector {
    let late_payment_rate = record.total_firstrepaid_late / (record.num_prev_loans + EPSILON);
    let repayment_efficiency =
        record.repayment_curr_ratio / (record.avg_prev_repayment_ratio + EPSILON);
    let repayment_burden = record.loanamount / (record.termdays + EPSILON);

    FeatureVector {
        late_payment_rate,
        repayment_efficiency,
        repayment_burden,
        sqrt_loanamount: record.loanamount.sqrt(),
        sqrt_termdays: record.termdays.sqrt(),
        sqrt_avg_prev_interest: record.avg_prev_interest.sqrt(),
        sqrt_repayment_burden: repayment_burden.sqrt(),
        sqrt_repayment_efficiency: repayment_efficiency.sqrt(),
        sqrt_late_payment_rate: late_payment_rate.sqrt(),
    }
}
