use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Gauge, Paragraph, Wrap};

use crate::output::{format_credit_score, format_probability, DISCLAIMER};
use crate::pipeline::Assessment;
use crate::scoring::{band_for, ScoreBand, MAX_SCORE, MIN_SCORE, SCORE_BANDS};
use crate::tui::app::{App, FormField, InputMode, SECTIONS};
use crate::tui::theme::ThemeColors;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.height < 10 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Title(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);

    let body = if chunks[1].width >= 90 {
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1])
    } else {
        Layout::vertical([Constraint::Fill(1), Constraint::Length(14)]).split(chunks[1])
    };
    render_form(frame, body[0], app);
    render_results(frame, body[1], app);

    render_status_bar(frame, chunks[2], app);

    match app.input_mode {
        InputMode::Editing => render_edit_popup(frame, app),
        InputMode::Help => render_help_popup(frame, &app.theme),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let left = "Loan Risk Assessment";
    let right = format!("model: {}", app.engine.model_name());
    let padding = (area.width as usize).saturating_sub(left.len() + right.chars().count());

    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(app.theme.title_color).bold()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, Style::default().fg(app.theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::bordered().title(" Applicant ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let selected = app.selected_field();
    let label_width = SECTIONS
        .iter()
        .flat_map(|(_, fields)| fields.iter())
        .map(|f| f.label().chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for (i, (title, fields)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(*title, theme.section_style)));

        for field in fields.iter() {
            let marker = if *field == selected { "> " } else { "  " };
            let value = field_display(app, *field);
            let mut line = Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    format!("{:<width$}  ", field.label(), width = label_width),
                    Style::default().fg(theme.label_color),
                ),
                Span::styled(value, Style::default().fg(theme.value_color)),
            ]);
            if *field == selected {
                line = line.style(theme.field_selected);
            }
            lines.push(line);
        }
    }

    // Keep the selected row visible on short terminals
    let selected_line = selected_line_index(selected);
    let height = inner.height as usize;
    let scroll = selected_line.saturating_sub(height.saturating_sub(1));

    frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), inner);
}

/// Value text with arrows hinting that categorical fields cycle.
fn field_display(app: &App, field: FormField) -> String {
    let value = app.field_value(field);
    if field.is_numeric() {
        value
    } else {
        format!("< {} >", value)
    }
}

/// Line of `field` in the rendered form, counting section headers and gaps.
fn selected_line_index(field: FormField) -> usize {
    let mut line = 0;
    for (i, (_, fields)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            line += 1;
        }
        line += 1;
        for f in fields.iter() {
            if *f == field {
                return line;
            }
            line += 1;
        }
    }
    line
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::bordered().title(" Prediction ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(assessment) = &app.assessment else {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Fill in the form and press p to predict.",
                Style::default().fg(app.theme.muted),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(hint, inner);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // metrics
        Constraint::Length(1), // gauge
        Constraint::Length(1), // band strip
        Constraint::Length(1), // band labels
        Constraint::Length(1),
        Constraint::Length(1), // verdict message
        Constraint::Length(1),
        Constraint::Fill(1), // disclaimer
    ])
    .split(inner);

    render_metrics(frame, chunks[0], app, assessment);
    render_gauge(frame, chunks[1], &app.theme, assessment);
    render_band_strip(frame, chunks[2], &app.theme, assessment.prediction.credit_score);
    render_band_labels(frame, chunks[3], &app.theme);

    let prediction = &assessment.prediction;
    let color = app.theme.classification_color(prediction.classification);
    let message = Paragraph::new(prediction.classification.message())
        .style(Style::default().bg(color).fg(app.theme.verdict_fg).bold())
        .alignment(Alignment::Center);
    frame.render_widget(message, chunks[5]);

    let mut footer = Vec::new();
    if app.stale {
        footer.push(Line::from(Span::styled(
            "Inputs changed since this prediction. Press p to update.",
            Style::default().fg(app.theme.stale_color),
        )));
        footer.push(Line::from(""));
    }
    footer.push(Line::from(Span::styled(
        DISCLAIMER,
        Style::default().fg(app.theme.muted).italic(),
    )));
    frame.render_widget(Paragraph::new(footer).wrap(Wrap { trim: true }), chunks[7]);
}

fn render_metrics(frame: &mut Frame, area: Rect, app: &App, assessment: &Assessment) {
    let prediction = &assessment.prediction;
    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    let metrics = [
        (
            "Credit Score",
            format_credit_score(prediction.credit_score),
            app.theme.value_color,
        ),
        (
            "Repayment Probability",
            format_probability(prediction.proba_good),
            app.theme.value_color,
        ),
        (
            "Loan Status",
            prediction.classification.label().to_string(),
            app.theme.classification_color(prediction.classification),
        ),
    ];

    for (area, (label, value, color)) in columns.iter().zip(metrics) {
        let text = Paragraph::new(vec![
            Line::from(Span::styled(label, Style::default().fg(app.theme.label_color))),
            Line::from(Span::styled(value, Style::default().fg(color).bold())),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(text, *area);
    }
}

fn render_gauge(frame: &mut Frame, area: Rect, theme: &ThemeColors, assessment: &Assessment) {
    let prediction = &assessment.prediction;
    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.classification_color(prediction.classification))
                .bg(theme.gauge_empty),
        )
        .percent(u16::from(prediction.progress_value))
        .label(format!("{}%", prediction.progress_value));
    frame.render_widget(gauge, area);
}

/// Column within `width` cells where `score` sits on the 300..850 axis.
pub fn score_column(score: f64, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let ratio = ((score - MIN_SCORE) / (MAX_SCORE - MIN_SCORE)).clamp(0.0, 1.0);
    ((ratio * f64::from(width - 1)).round() as u16).min(width - 1)
}

/// Score band covering column `col` of a strip `width` cells wide.
fn column_band(col: u16, width: u16) -> &'static ScoreBand {
    let col_score = MIN_SCORE + (MAX_SCORE - MIN_SCORE) * f64::from(col) / f64::from(width.max(2) - 1);
    band_for(col_score)
}

fn render_band_strip(frame: &mut Frame, area: Rect, theme: &ThemeColors, score: f64) {
    let width = area.width;
    let marker = score_column(score, width);

    let spans: Vec<Span> = (0..width)
        .map(|col| {
            let band = column_band(col, width);
            let color = theme.classification_color(band.classification);
            if col == marker {
                Span::styled("▼", Style::default().fg(theme.value_color).bg(color).bold())
            } else {
                Span::styled("█", Style::default().fg(color))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_band_labels(frame: &mut Frame, area: Rect, theme: &ThemeColors) {
    let width = area.width as usize;
    let mut text = vec![' '; width];
    for band in SCORE_BANDS.iter() {
        let label = format!("{:.0}", band.from);
        let start = score_column(band.from, area.width) as usize;
        for (i, c) in label.chars().enumerate() {
            if start + i < width {
                text[start + i] = c;
            }
        }
    }
    let end = format!("{:.0}", MAX_SCORE);
    let start = width.saturating_sub(end.len());
    for (i, c) in end.chars().enumerate() {
        if start + i < width {
            text[start + i] = c;
        }
    }

    let line: String = text.into_iter().collect();
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(theme.muted)),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Error") || msg.starts_with("Invalid") {
            theme.flash_error
        } else if msg.starts_with("Assessed") || msg.starts_with("Inputs reset") {
            theme.flash_success
        } else {
            theme.flash_warning
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else if let Some(warning) = app.asset_status.warning() {
        Line::from(Span::styled(warning, Style::default().fg(theme.flash_warning)))
    } else {
        let hints = [
            ("j/k", ":nav "),
            ("h/l", ":adjust "),
            ("Enter", ":edit "),
            ("p", ":predict "),
            ("r", ":reset "),
            ("?", ":help "),
            ("q", ":quit"),
        ];

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

fn render_edit_popup(frame: &mut Frame, app: &App) {
    let FormField::Numeric(field) = app.selected_field() else {
        return;
    };
    let theme = &app.theme;
    let popup_area = centered_rect_fixed(46, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(format!(" {} ", field.label()), theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(inner);

    let input = Paragraph::new(format!("{}|", app.edit_buffer));
    frame.render_widget(input, chunks[0]);

    let bounds = field.bounds();
    let help = Paragraph::new(format!(
        "Range {}..{} | Enter: set | Esc: cancel",
        crate::tui::app::format_numeric(field, bounds.min),
        crate::tui::app::format_numeric(field, bounds.max)
    ))
    .style(Style::default().fg(theme.muted));
    frame.render_widget(help, chunks[1]);
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(52, 14, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let entries = [
        ("j / Down      ", "Next field"),
        ("k / Up        ", "Previous field"),
        ("l / Right     ", "Increase value or next choice"),
        ("h / Left      ", "Decrease value or previous choice"),
        ("Enter         ", "Type a value / next choice"),
        ("p             ", "Predict"),
        ("r             ", "Reset inputs to defaults"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::NumericField;

    #[test]
    fn test_score_column_ends() {
        assert_eq!(score_column(300.0, 56), 0);
        assert_eq!(score_column(850.0, 56), 55);
        assert_eq!(score_column(1000.0, 56), 55);
        assert_eq!(score_column(575.0, 0), 0);
    }

    #[test]
    fn test_score_column_cutoff_is_midway() {
        // 575 is exactly half of the 300..850 axis
        assert_eq!(score_column(575.0, 101), 50);
    }

    #[test]
    fn test_strip_switches_band_at_cutoff() {
        use crate::scoring::Classification;

        assert_eq!(column_band(0, 101).classification, Classification::Bad);
        assert_eq!(column_band(49, 101).classification, Classification::Bad);
        assert_eq!(column_band(50, 101).classification, Classification::Good);
        assert_eq!(column_band(100, 101).classification, Classification::Good);
    }

    #[test]
    fn test_selected_line_counts_headers() {
        assert_eq!(
            selected_line_index(FormField::Numeric(NumericField::LoanAmount)),
            1
        );
        // 1 header + 4 fields, gap, header
        assert_eq!(
            selected_line_index(FormField::Numeric(NumericField::AvgRepayDelayDays)),
            7
        );
        assert_eq!(selected_line_index(FormField::EmploymentStatus), 20);
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 4);
        let rect = centered_rect_fixed(50, 10, area);
        assert_eq!(rect, Rect::new(0, 0, 20, 4));
    }
}
