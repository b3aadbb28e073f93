use serde::Serialize;

use crate::applicant::RawInputRecord;
use crate::features::{derive, select, FeatureVector, ModelInput};
use crate::model::{ModelError, ScoringEngine};
use crate::scoring::{map_score, Prediction};

/// Everything produced for one submission. Recomputed from scratch on every
/// submit and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub record: RawInputRecord,
    pub features: FeatureVector,
    pub model_input: ModelInput,
    pub prediction: Prediction,
}

/// Run one record through derive, select, score and map.
///
/// Called by the `score` command and by the form on every submit.
pub fn assess(engine: &ScoringEngine, record: &RawInputRecord) -> Result<Assessment, ModelError> {
    let features = derive(record);
    let model_input = select(record, &features);
    let proba_good = engine.score(&model_input)?;

    Ok(Assessment {
        record: *record,
        features,
        model_input,
        prediction: map_score(proba_good),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::{AccountType, AgeGroup, BankName, EmploymentStatus};
    use crate::model::fixtures::sample_artifact;
    use crate::model::LogisticClassifier;
    use crate::scoring::Classification;
    use std::path::Path;
    use std::sync::Arc;

    fn fixture_engine() -> ScoringEngine {
        let classifier = LogisticClassifier::from_artifact(sample_artifact()).unwrap();
        ScoringEngine::new(Arc::new(classifier)).unwrap()
    }

    fn scenario_record() -> RawInputRecord {
        RawInputRecord {
            loanamount: 50_000.0,
            termdays: 90.0,
            repayment_curr_ratio: 1.0,
            num_prev_loans: 3.0,
            avg_repay_delay_days: 10.0,
            total_firstrepaid_late: 2.0,
            avg_prev_repayment_ratio: 1.0,
            avg_duration_days: 180.0,
            avg_prev_interest: 5000.0,
            age: 30,
            age_group: AgeGroup::Adults,
            bank_name_clients: BankName::GtBank,
            bank_account_type: AccountType::Savings,
            employment_status_clients: EmploymentStatus::Permanent,
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let assessment = assess(&fixture_engine(), &scenario_record()).unwrap();

        assert!((assessment.features.repayment_burden - 555.5555).abs() < 1e-3);
        assert!((assessment.features.sqrt_loanamount - 223.6068).abs() < 1e-4);
        assert_eq!(assessment.model_input.len(), 16);

        let expected_proba = 1.0 / (1.0 + (-0.5f64).exp());
        let p = assessment.prediction;
        assert!((p.proba_good - expected_proba).abs() < 1e-12);
        assert!((p.credit_score - (300.0 + 550.0 * expected_proba)).abs() < 1e-9);
        assert_eq!(p.classification, Classification::Good);
        assert_eq!(p.progress_value, 62);
    }

    #[test]
    fn test_assessment_is_reproducible() {
        let engine = fixture_engine();
        let a = assess(&engine, &scenario_record()).unwrap();
        let b = assess(&engine, &scenario_record()).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a.prediction.credit_score.to_bits(),
            b.prediction.credit_score.to_bits()
        );
    }

    #[test]
    fn test_bank_name_does_not_change_prediction() {
        let engine = fixture_engine();
        let base = assess(&engine, &scenario_record()).unwrap();
        for bank in BankName::ALL {
            let record = RawInputRecord {
                bank_name_clients: bank,
                ..scenario_record()
            };
            let other = assess(&engine, &record).unwrap();
            assert_eq!(other.prediction, base.prediction);
        }
    }

    #[test]
    fn test_low_repayment_ratio_is_bad() {
        let record = RawInputRecord {
            repayment_curr_ratio: 0.0,
            age_group: AgeGroup::YoungAdults,
            ..scenario_record()
        };
        let assessment = assess(&fixture_engine(), &record).unwrap();
        // z = -1.0
        assert!(assessment.prediction.proba_good < 0.5);
        assert_eq!(assessment.prediction.classification, Classification::Bad);
    }

    #[test]
    fn test_shipped_model_scores_scenario() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("models/loan_default.yaml");
        let engine = ScoringEngine::load(&path).unwrap();

        let a = assess(&engine, &scenario_record()).unwrap();
        let b = assess(&engine, &scenario_record()).unwrap();
        assert_eq!(a.prediction, b.prediction);
        assert!((0.0..=1.0).contains(&a.prediction.proba_good));
        assert!((300.0..=850.0).contains(&a.prediction.credit_score));
        assert!(a.prediction.progress_value <= 100);
    }

    #[test]
    fn test_assessment_serializes() {
        let assessment = assess(&fixture_engine(), &scenario_record()).unwrap();
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["prediction"]["classification"], "Good");
        assert_eq!(json["record"]["bank_account_type"], "Savings");
        assert!(json["features"]["sqrt_termdays"].is_number());
    }
}
