pub mod mapper;

pub use mapper::{
    band_for, classify, credit_score, map_score, progress_value, Classification, Prediction,
    ScoreBand, MAX_SCORE, MIN_SCORE, PROBA_CUTOFF, SCORE_BANDS, SCORE_CUTOFF,
};
