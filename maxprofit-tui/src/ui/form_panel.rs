//! The four input fields and the Submit button.
//!
//! Each field takes two rows: label and value, then its feedback once the
//! form has been validated.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use maxprofit_core::FieldId;

use crate::app::{AppState, Focus};
use crate::theme;

const LABEL_WIDTH: usize = 12;

/// Rows needed for all fields plus the button.
pub const HEIGHT: u16 = FieldId::ALL.len() as u16 * 2 + 2;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();
    let state = app.form.state();

    for field in FieldId::ALL {
        let focused = app.focus == Focus::Field(field);
        let feedback = state.feedback(field);
        let value = state.value(field);

        let mut spans = vec![Span::styled(
            format!("{:<LABEL_WIDTH$}", field.label()),
            if focused { theme::accent_bold() } else { theme::muted() },
        )];
        if value.is_empty() && !focused {
            spans.push(Span::styled(placeholder(field), theme::muted()));
        } else {
            spans.push(Span::styled(
                value.to_string(),
                theme::field_value(focused, feedback.is_some()),
            ));
        }
        if focused {
            spans.push(Span::styled("▏", theme::accent()));
        }
        lines.push(Line::from(spans));

        match feedback {
            Some(msg) => lines.push(Line::from(Span::styled(
                format!("{:LABEL_WIDTH$}{msg}", ""),
                theme::negative(),
            ))),
            None => lines.push(Line::from("")),
        }
    }

    lines.push(Line::from(""));
    lines.push(submit_button(app));

    f.render_widget(Paragraph::new(lines), area);
}

fn placeholder(field: FieldId) -> &'static str {
    match field {
        FieldId::Stock => "e.g. UBER",
        FieldId::Begin | FieldId::End => "YYYY-MM-DDTHH:MM",
        FieldId::Amount => "e.g. 1000.00",
    }
}

fn submit_button(app: &AppState) -> Line<'static> {
    let focused = app.focus == Focus::Submit;
    let label = if app.form.is_in_flight() {
        "[ Submitting... ]"
    } else {
        "[ Submit ]"
    };
    let style = if app.form.is_in_flight() {
        theme::muted()
    } else if focused {
        theme::accent_bold()
    } else {
        theme::text()
    };
    Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH)),
        Span::styled(label, style),
    ])
}
