//! Parrot/neon theme tokens.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, highlights)
//! - **Positive**: Neon green (success)
//! - **Negative**: Hot pink (failures, invalid input)
//! - **Warning**: Neon orange (retries, info results)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (hints, unfocused text)

use ratatui::style::{Color, Modifier, Style};

use maxprofit_core::Variant;

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn strong() -> Style {
    text().add_modifier(Modifier::BOLD)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Input box styling: focused fields are highlighted, invalid ones flagged.
pub fn field_value(focused: bool, invalid: bool) -> Style {
    match (focused, invalid) {
        (_, true) => negative(),
        (true, false) => accent_bold(),
        (false, false) => text(),
    }
}

/// Border and title color for a result variant.
pub fn variant(variant: Variant) -> Style {
    match variant {
        Variant::Success => positive(),
        Variant::Info => warning(),
        Variant::Error => negative(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_have_distinct_colors() {
        let colors = [Variant::Success, Variant::Info, Variant::Error].map(|v| variant(v).fg);
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn invalid_wins_over_focus() {
        assert_eq!(field_value(true, true), negative());
        assert_eq!(field_value(true, false), accent_bold());
    }
}
