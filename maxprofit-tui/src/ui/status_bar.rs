//! Bottom status bar.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = vec![
        Span::styled(" F1:Help Ctrl-Q:Quit", theme::muted()),
        Span::raw(" | "),
        Span::styled(app.server_url.as_str(), theme::neutral()),
    ];

    if let Some(at) = app.last_completed {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("last reply {}", at.format("%H:%M:%S")),
            theme::muted(),
        ));
    }

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
