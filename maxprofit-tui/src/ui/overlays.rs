//! Help overlay.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::theme;
use crate::ui::centered_rect;

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();
    section(&mut lines, "Form");
    key(&mut lines, "Tab / Down", "Next field");
    key(&mut lines, "Shift+Tab / Up", "Previous field");
    key(&mut lines, "Backspace", "Delete last character");
    key(&mut lines, "Ctrl-U", "Clear field");
    key(&mut lines, "Enter", "Submit");
    lines.push(Line::from(""));

    section(&mut lines, "Result");
    key(&mut lines, "Esc", "Close result panel");
    key(&mut lines, "Ctrl-R", "Reset the form");
    lines.push(Line::from(""));

    section(&mut lines, "Global");
    key(&mut lines, "F1", "Toggle this help");
    key(&mut lines, "Ctrl-Q / Ctrl-C", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Input formats");
    key(&mut lines, "Dates", "YYYY-MM-DDTHH:MM, local time");
    key(&mut lines, "Amount", "1 or more, at most 2 decimals");

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>16}  "), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
