pub mod formatter;

pub use formatter::{
    format_assessment, format_credit_score, format_features, format_json, format_probability,
    format_score_bar, should_use_colors, DISCLAIMER,
};
