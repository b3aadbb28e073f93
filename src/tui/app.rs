use std::time::Instant;

use crate::applicant::{AccountType, AgeGroup, BankName, EmploymentStatus, NumericField, RawInputRecord};
use crate::assets::AssetStatus;
use crate::model::ScoringEngine;
use crate::pipeline::{assess, Assessment};
use crate::tui::theme::ThemeColors;

const FLASH_SECS: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
    Help,
}

/// One input on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Numeric(NumericField),
    AgeGroup,
    BankName,
    AccountType,
    EmploymentStatus,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Numeric(f) => f.label(),
            FormField::AgeGroup => "Age Group",
            FormField::BankName => "Bank Name",
            FormField::AccountType => "Bank Account Type",
            FormField::EmploymentStatus => "Employment Status",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, FormField::Numeric(_))
    }
}

/// Form sections and the fields each one holds, top to bottom.
pub const SECTIONS: [(&str, &[FormField]); 4] = [
    (
        "Loan Details",
        &[
            FormField::Numeric(NumericField::LoanAmount),
            FormField::Numeric(NumericField::TermDays),
            FormField::Numeric(NumericField::RepaymentCurrRatio),
            FormField::Numeric(NumericField::NumPrevLoans),
        ],
    ),
    (
        "Payment History",
        &[
            FormField::Numeric(NumericField::AvgRepayDelayDays),
            FormField::Numeric(NumericField::TotalFirstRepaidLate),
            FormField::Numeric(NumericField::AvgPrevRepaymentRatio),
            FormField::Numeric(NumericField::AvgDurationDays),
        ],
    ),
    (
        "Financial History",
        &[
            FormField::Numeric(NumericField::AvgPrevInterest),
            FormField::Numeric(NumericField::Age),
            FormField::AgeGroup,
        ],
    ),
    (
        "Banking & Employment Profile",
        &[
            FormField::BankName,
            FormField::AccountType,
            FormField::EmploymentStatus,
        ],
    ),
];

/// All form fields in display order.
pub fn form_fields() -> Vec<FormField> {
    SECTIONS.iter().flat_map(|(_, fields)| fields.iter().copied()).collect()
}

/// Step to the neighbouring variant of a closed set, wrapping at the ends.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let pos = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % all.len()
    } else {
        (pos + all.len() - 1) % all.len()
    };
    all[next]
}

/// Render a numeric input the way the form shows it.
pub fn format_numeric(field: NumericField, value: f64) -> String {
    if field.is_integer() {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

pub struct App {
    pub record: RawInputRecord,
    pub fields: Vec<FormField>,
    pub selected: usize,
    pub input_mode: InputMode,
    pub edit_buffer: String,
    pub assessment: Option<Assessment>,
    /// Inputs changed since the shown assessment was computed
    pub stale: bool,
    pub engine: ScoringEngine,
    pub asset_status: AssetStatus,
    pub theme: ThemeColors,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub verbose: bool,
}

impl App {
    pub fn new(
        engine: ScoringEngine,
        asset_status: AssetStatus,
        theme: ThemeColors,
        verbose: bool,
    ) -> Self {
        let mut app = Self {
            record: RawInputRecord::default(),
            fields: form_fields(),
            selected: 0,
            input_mode: InputMode::Normal,
            edit_buffer: String::new(),
            assessment: None,
            stale: false,
            engine,
            asset_status,
            theme,
            flash_message: None,
            should_quit: false,
            verbose,
        };
        if let Some(warning) = app.asset_status.warning() {
            app.show_flash(warning);
        }
        app
    }

    pub fn selected_field(&self) -> FormField {
        self.fields[self.selected]
    }

    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % self.fields.len();
    }

    pub fn previous_field(&mut self) {
        self.selected = if self.selected == 0 {
            self.fields.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Current value of a field as display text
    pub fn field_value(&self, field: FormField) -> String {
        match field {
            FormField::Numeric(f) => format_numeric(f, f.get(&self.record)),
            FormField::AgeGroup => self.record.age_group.to_string(),
            FormField::BankName => self.record.bank_name_clients.to_string(),
            FormField::AccountType => self.record.bank_account_type.to_string(),
            FormField::EmploymentStatus => self.record.employment_status_clients.to_string(),
        }
    }

    /// Nudge the selected field: one step for numbers, next/previous choice
    /// for categories.
    pub fn adjust_selected(&mut self, forward: bool) {
        let field = self.selected_field();
        let r = &mut self.record;
        match field {
            FormField::Numeric(f) => {
                let step = if forward { f.bounds().step } else { -f.bounds().step };
                let current = f.get(r);
                f.set(r, current + step);
            }
            FormField::AgeGroup => r.age_group = cycle(&AgeGroup::ALL, r.age_group, forward),
            FormField::BankName => {
                r.bank_name_clients = cycle(&BankName::ALL, r.bank_name_clients, forward)
            }
            FormField::AccountType => {
                r.bank_account_type = cycle(&AccountType::ALL, r.bank_account_type, forward)
            }
            FormField::EmploymentStatus => {
                r.employment_status_clients =
                    cycle(&EmploymentStatus::ALL, r.employment_status_clients, forward)
            }
        }
        self.mark_stale();
    }

    /// Enter typing mode for a numeric field; categorical fields just advance.
    pub fn start_edit(&mut self) {
        match self.selected_field() {
            FormField::Numeric(f) => {
                self.edit_buffer = format_numeric(f, f.get(&self.record));
                self.input_mode = InputMode::Editing;
            }
            _ => self.adjust_selected(true),
        }
    }

    pub fn push_edit_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' || c == '-' {
            self.edit_buffer.push(c);
        }
    }

    /// Parse the typed value and store it, clamped to the field's domain.
    pub fn confirm_edit(&mut self) {
        let FormField::Numeric(field) = self.selected_field() else {
            self.cancel_edit();
            return;
        };

        match self.edit_buffer.trim().parse::<f64>() {
            Ok(requested) if requested.is_finite() => {
                let stored = field.set(&mut self.record, requested);
                if stored != requested {
                    let bounds = field.bounds();
                    self.show_flash(format!(
                        "{} must be within {} and {}; using {}",
                        field.label(),
                        format_numeric(field, bounds.min),
                        format_numeric(field, bounds.max),
                        format_numeric(field, stored)
                    ));
                }
                self.mark_stale();
            }
            _ => self.show_flash(format!("Invalid number: '{}'", self.edit_buffer)),
        }

        self.input_mode = InputMode::Normal;
        self.edit_buffer.clear();
    }

    pub fn cancel_edit(&mut self) {
        self.input_mode = InputMode::Normal;
        self.edit_buffer.clear();
    }

    /// Run the pipeline on the current inputs.
    pub fn submit(&mut self) {
        match assess(&self.engine, &self.record) {
            Ok(assessment) => {
                if self.verbose {
                    crate::buffered_eprintln!(
                        "Assessed: score {:.2}, P(good) {:.6}, {}",
                        assessment.prediction.credit_score,
                        assessment.prediction.proba_good,
                        assessment.prediction.classification
                    );
                }
                let classification = assessment.prediction.classification;
                self.assessment = Some(assessment);
                self.stale = false;
                self.show_flash(format!("Assessed: {}", classification.message()));
            }
            Err(e) => {
                // No partial results: drop whatever was shown before
                self.assessment = None;
                self.stale = false;
                self.show_flash(format!("Error: prediction failed: {}", e));
            }
        }
    }

    /// Restore every input to its starting value.
    pub fn reset(&mut self) {
        self.record = RawInputRecord::default();
        self.mark_stale();
        self.show_flash("Inputs reset to defaults".to_string());
    }

    fn mark_stale(&mut self) {
        if self.assessment.is_some() {
            self.stale = true;
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample_artifact;
    use crate::model::LogisticClassifier;
    use crate::scoring::Classification;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn test_app() -> App {
        let classifier = LogisticClassifier::from_artifact(sample_artifact()).unwrap();
        let engine = ScoringEngine::new(Arc::new(classifier)).unwrap();
        App::new(
            engine,
            AssetStatus::Present(PathBuf::from("assets/loan_default.jpg")),
            ThemeColors::dark(),
            false,
        )
    }

    fn select_field(app: &mut App, field: FormField) {
        app.selected = app.fields.iter().position(|f| *f == field).unwrap();
    }

    #[test]
    fn test_form_has_every_input_once() {
        let fields = form_fields();
        assert_eq!(fields.len(), 14);
        for f in NumericField::ALL {
            assert_eq!(fields.iter().filter(|x| **x == FormField::Numeric(f)).count(), 1);
        }
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = test_app();
        app.previous_field();
        assert_eq!(app.selected, 13);
        app.next_field();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_adjust_numeric_clamps() {
        let mut app = test_app();
        select_field(&mut app, FormField::Numeric(NumericField::Age));
        app.record.age = 100;
        app.adjust_selected(true);
        assert_eq!(app.record.age, 100);
        app.adjust_selected(false);
        assert_eq!(app.record.age, 99);
    }

    #[test]
    fn test_adjust_categorical_cycles() {
        let mut app = test_app();
        select_field(&mut app, FormField::AccountType);
        assert_eq!(app.record.bank_account_type, AccountType::Other);
        app.adjust_selected(false);
        assert_eq!(app.record.bank_account_type, AccountType::Current);
        app.adjust_selected(true);
        app.adjust_selected(true);
        assert_eq!(app.record.bank_account_type, AccountType::Savings);
    }

    #[test]
    fn test_typed_value_is_clamped_with_flash() {
        let mut app = test_app();
        select_field(&mut app, FormField::Numeric(NumericField::TermDays));
        app.start_edit();
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.edit_buffer, "90");

        app.edit_buffer.clear();
        for c in "9999".chars() {
            app.push_edit_char(c);
        }
        app.confirm_edit();

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.record.termdays, 720.0);
        let (msg, _) = app.flash_message.clone().unwrap();
        assert!(msg.contains("must be within 10 and 720"));
    }

    #[test]
    fn test_invalid_typed_value_keeps_old_value() {
        let mut app = test_app();
        select_field(&mut app, FormField::Numeric(NumericField::NumPrevLoans));
        app.start_edit();
        app.edit_buffer = "1.2.3".to_string();
        app.confirm_edit();

        assert_eq!(app.record.num_prev_loans, 3.0);
        assert!(app.flash_message.unwrap().0.starts_with("Invalid number"));
    }

    #[test]
    fn test_edit_ignores_letters() {
        let mut app = test_app();
        app.start_edit();
        app.edit_buffer.clear();
        for c in "12a3".chars() {
            app.push_edit_char(c);
        }
        assert_eq!(app.edit_buffer, "123");
    }

    #[test]
    fn test_enter_on_category_advances() {
        let mut app = test_app();
        select_field(&mut app, FormField::AgeGroup);
        app.start_edit();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.record.age_group, AgeGroup::Adults);
    }

    #[test]
    fn test_submit_then_edit_marks_stale() {
        let mut app = test_app();
        select_field(&mut app, FormField::AgeGroup);
        app.adjust_selected(true);
        app.submit();

        let assessment = app.assessment.as_ref().unwrap();
        assert_eq!(assessment.prediction.classification, Classification::Good);
        assert!(!app.stale);

        app.adjust_selected(true);
        assert!(app.stale);

        app.submit();
        assert!(!app.stale);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut app = test_app();
        app.record.loanamount = 999_000.0;
        app.reset();
        assert_eq!(app.record, RawInputRecord::default());
    }

    #[test]
    fn test_missing_asset_flashes_warning() {
        let classifier = LogisticClassifier::from_artifact(sample_artifact()).unwrap();
        let engine = ScoringEngine::new(Arc::new(classifier)).unwrap();
        let app = App::new(
            engine,
            AssetStatus::Missing(PathBuf::from("assets/loan_default.jpg")),
            ThemeColors::dark(),
            false,
        );
        assert!(app.flash_message.unwrap().0.contains("image not found"));
    }

    #[test]
    fn test_field_value_formatting() {
        let app = test_app();
        assert_eq!(app.field_value(FormField::Numeric(NumericField::LoanAmount)), "50000");
        assert_eq!(app.field_value(FormField::Numeric(NumericField::RepaymentCurrRatio)), "1.00");
        assert_eq!(app.field_value(FormField::BankName), "GT Bank");
    }
}
