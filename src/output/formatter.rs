use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::pipeline::Assessment;
use crate::scoring::{Classification, MAX_SCORE, MIN_SCORE, SCORE_CUTOFF};

pub const DISCLAIMER: &str = "This tool provides risk assessment for informational purposes only. \
Final lending decisions should consider additional factors and comply with applicable regulations.";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Width of the text gauge: 50 cells, narrower on small terminals.
fn gauge_width() -> usize {
    match get_terminal_width() {
        Some(w) if w < 70 => w.saturating_sub(20).max(10),
        _ => 50,
    }
}

/// Format a credit score the way the results panel shows it ("642")
pub fn format_credit_score(score: f64) -> String {
    format!("{:.0}", score)
}

/// Format P(good) with two decimals ("0.62")
pub fn format_probability(proba: f64) -> String {
    format!("{:.2}", proba)
}

/// Text gauge over 300..850 with a `|` at the 575 cutoff.
///
/// Cells left of the cutoff belong to the red band, cells right of it to the
/// green band; filled cells run up to the score.
pub fn format_score_bar(credit_score: f64, width: usize, use_colors: bool) -> String {
    let span = MAX_SCORE - MIN_SCORE;
    let ratio = ((credit_score - MIN_SCORE) / span).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let cutoff = (((SCORE_CUTOFF - MIN_SCORE) / span) * width as f64).round() as usize;

    let mut bar = String::new();
    for i in 0..width {
        if i == cutoff {
            bar.push('|');
        }
        let cell = if i < filled { "█" } else { "░" };
        if use_colors {
            if i < cutoff {
                bar.push_str(&cell.red().to_string());
            } else {
                bar.push_str(&cell.green().to_string());
            }
        } else {
            bar.push_str(cell);
        }
    }
    bar
}

fn colorize_status(classification: Classification, text: &str, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match classification {
        Classification::Good => text.green().bold().to_string(),
        Classification::Bad => text.red().bold().to_string(),
    }
}

/// Format the results of one assessment as a short multi-line report
pub fn format_assessment(assessment: &Assessment, use_colors: bool) -> String {
    let p = &assessment.prediction;
    let status = colorize_status(p.classification, p.classification.label(), use_colors);
    let message = colorize_status(p.classification, p.classification.message(), use_colors);

    let header = if use_colors {
        "Risk Assessment Results".bold().to_string()
    } else {
        "Risk Assessment Results".to_string()
    };

    let disclaimer = if use_colors {
        DISCLAIMER.dimmed().to_string()
    } else {
        DISCLAIMER.to_string()
    };

    format!(
        "{}\n  Credit Score: {}\n  Repayment Probability: {}\n  Loan Status: {}\n  Progress: {}%\n  300 {} 850\n\n{}\n\n{}",
        header,
        format_credit_score(p.credit_score),
        format_probability(p.proba_good),
        status,
        p.progress_value,
        format_score_bar(p.credit_score, gauge_width(), use_colors),
        message,
        disclaimer
    )
}

/// Derived features and the model input row, for verbose mode
pub fn format_features(assessment: &Assessment) -> String {
    let mut lines = vec!["Derived features:".to_string()];
    for (name, value) in assessment.features.columns() {
        lines.push(format!("  {:<28}{:.6}", name, value));
    }
    lines.push("Model input:".to_string());
    for (i, column) in assessment.model_input.columns().iter().enumerate() {
        let value = match column.value.as_number() {
            Some(n) => format!("{:.6}", n),
            None => column.value.as_category().unwrap_or_default().to_string(),
        };
        lines.push(format!("  {:>2}. {:<28}{}", i + 1, column.name, value));
    }
    lines.join("\n")
}

/// Pretty JSON for scripting
pub fn format_json(assessment: &Assessment) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(assessment)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::RawInputRecord;
    use crate::features::{derive, select};
    use crate::scoring::map_score;

    fn sample_assessment(proba_good: f64) -> Assessment {
        let record = RawInputRecord::default();
        let features = derive(&record);
        Assessment {
            record,
            features,
            model_input: select(&record, &features),
            prediction: map_score(proba_good),
        }
    }

    #[test]
    fn test_format_credit_score_rounds() {
        assert_eq!(format_credit_score(642.35), "642");
        assert_eq!(format_credit_score(574.6), "575");
    }

    #[test]
    fn test_format_probability_two_decimals() {
        assert_eq!(format_probability(0.62245), "0.62");
        assert_eq!(format_probability(1.0), "1.00");
    }

    #[test]
    fn test_format_assessment_good() {
        let result = format_assessment(&sample_assessment(0.8), false);
        assert!(result.contains("Credit Score: 740"));
        assert!(result.contains("Repayment Probability: 0.80"));
        assert!(result.contains("Loan Status: Good"));
        assert!(result.contains("Progress: 80%"));
        assert!(result.contains("Safe Loan"));
        assert!(result.contains("informational purposes only"));
    }

    #[test]
    fn test_format_assessment_bad() {
        let result = format_assessment(&sample_assessment(0.2), false);
        assert!(result.contains("Loan Status: Bad"));
        assert!(result.contains("Risky Loan"));
    }

    #[test]
    fn test_score_bar_plain() {
        let bar = format_score_bar(MAX_SCORE, 10, false);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 10);
        assert_eq!(bar.chars().filter(|c| *c == '|').count(), 1);

        let bar = format_score_bar(MIN_SCORE, 10, false);
        assert_eq!(bar.chars().filter(|c| *c == '░').count(), 10);
    }

    #[test]
    fn test_score_bar_cutoff_position() {
        // 575 sits exactly halfway across 300..850
        let bar = format_score_bar(575.0, 10, false);
        assert_eq!(bar, "█████|░░░░░");
    }

    #[test]
    fn test_format_features_lists_all_columns() {
        let result = format_features(&sample_assessment(0.5));
        assert!(result.contains("repayment_burden"));
        assert!(result.contains("16. employment_status_clients"));
        assert!(result.contains("Young adults"));
        assert!(!result.contains("bank_name_clients"));
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&sample_assessment(0.5)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["prediction"]["credit_score"], 575.0);
        assert_eq!(value["prediction"]["progress_value"], 50);
    }
}
