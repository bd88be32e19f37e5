//! Result panel with its header, narrative and close hint.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use maxprofit_core::response::{Fragment, RichText};
use maxprofit_core::ResultPanelState;

use crate::theme;

pub const CLOSE_HINT: &str = "[Esc] Close me";

pub fn render(f: &mut Frame, area: Rect, panel: &ResultPanelState) {
    let style = theme::variant(panel.variant);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(format!(" {} ", panel.header()))
        .title_style(style.add_modifier(Modifier::BOLD));

    let mut lines = rich_lines(&panel.message);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(CLOSE_HINT, theme::muted())));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

/// One line per paragraph, blank line between; strong fragments in bold.
pub fn rich_lines(text: &RichText) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    for (i, paragraph) in text.paragraphs().iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        let spans: Vec<Span> = paragraph
            .iter()
            .map(|fragment| match fragment {
                Fragment::Strong(s) => Span::styled(s.as_str(), theme::strong()),
                Fragment::Text(s) => Span::styled(s.as_str(), theme::text()),
            })
            .collect();
        lines.push(Line::from(spans));
    }
    lines
}
