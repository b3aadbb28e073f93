use serde::Serialize;
use std::fmt;

pub const MIN_SCORE: f64 = 300.0;
pub const MAX_SCORE: f64 = 850.0;

/// Scores below this fall in the red band.
pub const SCORE_CUTOFF: f64 = 575.0;
pub const PROBA_CUTOFF: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Classification {
    Good,
    Bad,
}

impl Classification {
    pub fn label(self) -> &'static str {
        match self {
            Classification::Good => "Good",
            Classification::Bad => "Bad",
        }
    }

    /// Verdict line shown under the results.
    pub fn message(self) -> &'static str {
        match self {
            Classification::Good => {
                "Safe Loan: This client is likely to fulfill repayment (Good Loan)"
            }
            Classification::Bad => "Risky Loan: This client is likely to default (Bad Loan)",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fixed colour band on the credit score gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBand {
    pub from: f64,
    pub to: f64,
    pub classification: Classification,
}

/// `[300, 575)` is red, `[575, 850]` is green.
pub const SCORE_BANDS: [ScoreBand; 2] = [
    ScoreBand {
        from: MIN_SCORE,
        to: SCORE_CUTOFF,
        classification: Classification::Bad,
    },
    ScoreBand {
        from: SCORE_CUTOFF,
        to: MAX_SCORE,
        classification: Classification::Good,
    },
];

/// Band a credit score falls into on the gauge.
pub fn band_for(credit_score: f64) -> &'static ScoreBand {
    if credit_score < SCORE_CUTOFF {
        &SCORE_BANDS[0]
    } else {
        &SCORE_BANDS[1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub proba_good: f64,
    pub credit_score: f64,
    pub classification: Classification,
    /// Whole-number percentage of the way from 300 to 850; display only.
    pub progress_value: u8,
}

/// Linear rescale of P(good) onto the 300..850 credit score band.
pub fn credit_score(proba_good: f64) -> f64 {
    MIN_SCORE + (MAX_SCORE - MIN_SCORE) * proba_good
}

/// Both comparisons are kept: they agree under the linear mapping except
/// where rounding separates them.
pub fn classify(credit_score: f64, proba_good: f64) -> Classification {
    if credit_score < SCORE_CUTOFF || proba_good < PROBA_CUTOFF {
        Classification::Bad
    } else {
        Classification::Good
    }
}

pub fn progress_value(credit_score: f64) -> u8 {
    let pct = ((credit_score - MIN_SCORE) / (MAX_SCORE - MIN_SCORE) * 100.0).floor();
    pct.clamp(0.0, 100.0) as u8
}

pub fn map_score(proba_good: f64) -> Prediction {
    let credit_score = credit_score(proba_good);
    Prediction {
        proba_good,
        credit_score,
        classification: classify(credit_score, proba_good),
        progress_value: progress_value(credit_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let low = map_score(0.0);
        assert_eq!(low.credit_score, 300.0);
        assert_eq!(low.classification, Classification::Bad);
        assert_eq!(low.progress_value, 0);

        let high = map_score(1.0);
        assert_eq!(high.credit_score, 850.0);
        assert_eq!(high.classification, Classification::Good);
        assert_eq!(high.progress_value, 100);
    }

    #[test]
    fn test_half_probability_is_good() {
        let p = map_score(0.5);
        assert_eq!(p.credit_score, 575.0);
        assert_eq!(p.classification, Classification::Good);
        assert_eq!(p.progress_value, 50);
    }

    #[test]
    fn test_just_below_half_is_bad() {
        let p = map_score(0.4999);
        assert!((p.credit_score - 574.945).abs() < 1e-9);
        assert_eq!(p.classification, Classification::Bad);
        assert_eq!(p.progress_value, 49);
    }

    #[test]
    fn test_probability_clause_alone_marks_bad() {
        // Score clears the cutoff but the probability does not
        assert_eq!(classify(575.0, 0.4999999), Classification::Bad);
        // And the other way round
        assert_eq!(classify(574.9999, 0.5), Classification::Bad);
        assert_eq!(classify(575.0, 0.5), Classification::Good);
    }

    #[test]
    fn test_score_is_monotonic() {
        let mut previous = map_score(0.0).credit_score;
        for i in 1..=1000 {
            let current = map_score(i as f64 / 1000.0).credit_score;
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_progress_value_always_in_range() {
        for i in 0..=550 {
            let score = MIN_SCORE + i as f64;
            let pct = progress_value(score);
            assert!(pct <= 100);
        }
        assert_eq!(progress_value(MIN_SCORE), 0);
        assert_eq!(progress_value(MAX_SCORE), 100);
        // Truncates rather than rounds
        assert_eq!(progress_value(300.0 + 550.0 * 0.629), 62);
    }

    #[test]
    fn test_bands() {
        assert_eq!(band_for(300.0).classification, Classification::Bad);
        assert_eq!(band_for(574.99).classification, Classification::Bad);
        assert_eq!(band_for(575.0).classification, Classification::Good);
        assert_eq!(band_for(850.0).classification, Classification::Good);
        assert_eq!(SCORE_BANDS[0].to, SCORE_BANDS[1].from);
    }

    #[test]
    fn test_messages() {
        assert!(Classification::Good.message().starts_with("Safe Loan"));
        assert!(Classification::Bad.message().starts_with("Risky Loan"));
        assert_eq!(Classification::Bad.to_string(), "Bad");
    }
}
