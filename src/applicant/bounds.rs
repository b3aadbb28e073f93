use super::types::RawInputRecord;

/// Closed interval a numeric input is allowed to take, plus the step the
/// form uses when nudging it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl FieldBounds {
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

/// The ten numeric inputs of a [`RawInputRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    LoanAmount,
    TermDays,
    RepaymentCurrRatio,
    NumPrevLoans,
    AvgRepayDelayDays,
    TotalFirstRepaidLate,
    AvgPrevRepaymentRatio,
    AvgDurationDays,
    AvgPrevInterest,
    Age,
}

impl NumericField {
    pub const ALL: [NumericField; 10] = [
        NumericField::LoanAmount,
        NumericField::TermDays,
        NumericField::RepaymentCurrRatio,
        NumericField::NumPrevLoans,
        NumericField::AvgRepayDelayDays,
        NumericField::TotalFirstRepaidLate,
        NumericField::AvgPrevRepaymentRatio,
        NumericField::AvgDurationDays,
        NumericField::AvgPrevInterest,
        NumericField::Age,
    ];

    /// Column name used by the feature pipeline.
    pub fn column(self) -> &'static str {
        match self {
            NumericField::LoanAmount => "loanamount",
            NumericField::TermDays => "termdays",
            NumericField::RepaymentCurrRatio => "repayment_curr_ratio",
            NumericField::NumPrevLoans => "num_prev_loans",
            NumericField::AvgRepayDelayDays => "avg_repay_delay_days",
            NumericField::TotalFirstRepaidLate => "total_firstrepaid_late",
            NumericField::AvgPrevRepaymentRatio => "avg_prev_repayment_ratio",
            NumericField::AvgDurationDays => "avg_duration_days",
            NumericField::AvgPrevInterest => "avg_prev_interest",
            NumericField::Age => "age",
        }
    }

    /// Human-facing label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            NumericField::LoanAmount => "Loan Amount (₦)",
            NumericField::TermDays => "Loan Term (days)",
            NumericField::RepaymentCurrRatio => "Repayment Current Ratio",
            NumericField::NumPrevLoans => "Number of Previous Loans",
            NumericField::AvgRepayDelayDays => "Average Repay Delay (days)",
            NumericField::TotalFirstRepaidLate => "Total First Repaid Late",
            NumericField::AvgPrevRepaymentRatio => "Avg Previous Repayment Ratio",
            NumericField::AvgDurationDays => "Avg Duration of Previous Loans (days)",
            NumericField::AvgPrevInterest => "Avg Previous Interest (₦)",
            NumericField::Age => "Client Age",
        }
    }

    pub fn bounds(self) -> FieldBounds {
        let (min, max, step) = match self {
            NumericField::LoanAmount => (100.0, 1_000_000.0, 1_000.0),
            NumericField::TermDays => (10.0, 720.0, 1.0),
            NumericField::RepaymentCurrRatio => (0.0, 2.0, 0.01),
            NumericField::NumPrevLoans => (0.0, 50.0, 1.0),
            NumericField::AvgRepayDelayDays => (-50.0, 365.0, 1.0),
            NumericField::TotalFirstRepaidLate => (0.0, 50.0, 1.0),
            NumericField::AvgPrevRepaymentRatio => (0.0, 2.0, 0.01),
            NumericField::AvgDurationDays => (0.0, 720.0, 1.0),
            NumericField::AvgPrevInterest => (0.0, 100_000.0, 100.0),
            NumericField::Age => (18.0, 100.0, 1.0),
        };
        FieldBounds { min, max, step }
    }

    /// Whether the input only takes whole numbers.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            NumericField::LoanAmount | NumericField::TermDays | NumericField::Age
        )
    }

    pub fn get(self, record: &RawInputRecord) -> f64 {
        match self {
            NumericField::LoanAmount => record.loanamount,
            NumericField::TermDays => record.termdays,
            NumericField::RepaymentCurrRatio => record.repayment_curr_ratio,
            NumericField::NumPrevLoans => record.num_prev_loans,
            NumericField::AvgRepayDelayDays => record.avg_repay_delay_days,
            NumericField::TotalFirstRepaidLate => record.total_firstrepaid_late,
            NumericField::AvgPrevRepaymentRatio => record.avg_prev_repayment_ratio,
            NumericField::AvgDurationDays => record.avg_duration_days,
            NumericField::AvgPrevInterest => record.avg_prev_interest,
            NumericField::Age => record.age as f64,
        }
    }

    /// Store `value` into `record`, clamped to this field's domain.
    /// Returns the value actually stored.
    pub fn set(self, record: &mut RawInputRecord, value: f64) -> f64 {
        let mut value = self.bounds().clamp(value);
        if self.is_integer() {
            value = value.round();
        }
        match self {
            NumericField::LoanAmount => record.loanamount = value,
            NumericField::TermDays => record.termdays = value,
            NumericField::RepaymentCurrRatio => record.repayment_curr_ratio = value,
            NumericField::NumPrevLoans => record.num_prev_loans = value,
            NumericField::AvgRepayDelayDays => record.avg_repay_delay_days = value,
            NumericField::TotalFirstRepaidLate => record.total_firstrepaid_late = value,
            NumericField::AvgPrevRepaymentRatio => record.avg_prev_repayment_ratio = value,
            NumericField::AvgDurationDays => record.avg_duration_days = value,
            NumericField::AvgPrevInterest => record.avg_prev_interest = value,
            NumericField::Age => record.age = value as u32,
        }
        value
    }
}

/// A value that had to be pulled back into its domain at the input boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ClampNote {
    pub field: NumericField,
    pub requested: f64,
    pub stored: f64,
}

impl RawInputRecord {
    /// Copy of this record with every numeric field forced into its domain,
    /// together with a note for each value that changed.
    pub fn clamped(&self) -> (RawInputRecord, Vec<ClampNote>) {
        let mut out = *self;
        let mut notes = Vec::new();
        for field in NumericField::ALL {
            let requested = field.get(self);
            let stored = field.set(&mut out, requested);
            if stored != requested {
                notes.push(ClampNote {
                    field,
                    requested,
                    stored,
                });
            }
        }
        (out, notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_in_domain() {
        let record = RawInputRecord::default();
        let (clamped, notes) = record.clamped();
        assert_eq!(clamped, record);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_set_clamps_to_bounds() {
        let mut record = RawInputRecord::default();
        assert_eq!(NumericField::LoanAmount.set(&mut record, 5_000_000.0), 1_000_000.0);
        assert_eq!(record.loanamount, 1_000_000.0);
        assert_eq!(NumericField::AvgRepayDelayDays.set(&mut record, -100.0), -50.0);
        assert_eq!(NumericField::Age.set(&mut record, 12.0), 18.0);
        assert_eq!(record.age, 18);
    }

    #[test]
    fn test_integer_fields_round() {
        let mut record = RawInputRecord::default();
        assert_eq!(NumericField::TermDays.set(&mut record, 90.6), 91.0);
        assert_eq!(NumericField::Age.set(&mut record, 44.4), 44.0);
        // Fractional fields keep their precision
        assert_eq!(NumericField::RepaymentCurrRatio.set(&mut record, 1.234), 1.234);
    }

    #[test]
    fn test_nan_clamps_to_minimum() {
        let mut record = RawInputRecord::default();
        assert_eq!(NumericField::NumPrevLoans.set(&mut record, f64::NAN), 0.0);
    }

    #[test]
    fn test_clamped_reports_changes() {
        let record = RawInputRecord {
            termdays: 5.0,
            avg_prev_interest: 250_000.0,
            ..RawInputRecord::default()
        };

        let (clamped, notes) = record.clamped();
        assert_eq!(clamped.termdays, 10.0);
        assert_eq!(clamped.avg_prev_interest, 100_000.0);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].field, NumericField::TermDays);
        assert_eq!(notes[1].requested, 250_000.0);
        assert!(clamped.clamped().1.is_empty());
    }

    #[test]
    fn test_bounds_match_declared_domains() {
        let b = NumericField::LoanAmount.bounds();
        assert_eq!((b.min, b.max), (100.0, 1_000_000.0));
        let b = NumericField::AvgDurationDays.bounds();
        assert_eq!((b.min, b.max), (0.0, 720.0));
        let b = NumericField::Age.bounds();
        assert_eq!((b.min, b.max), (18.0, 100.0));
    }
}
