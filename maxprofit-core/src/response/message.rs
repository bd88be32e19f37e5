//! Rich-text result messages and the max-profit narrative.
//!
//! Messages are built as fragments rather than markup strings, so text that
//! came from the server can never turn into markup. Renderers that need HTML
//! go through [`RichText::to_html`], which escapes every fragment.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::wire::MaxProfitPoints;

/// A run of text, optionally emphasized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fragment {
    Text(String),
    Strong(String),
}

impl Fragment {
    pub fn text(&self) -> &str {
        match self {
            Fragment::Text(t) | Fragment::Strong(t) => t,
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, Fragment::Strong(_))
    }
}

/// Paragraphs of fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    paragraphs: Vec<Vec<Fragment>>,
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single plain paragraph.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![vec![Fragment::Text(text.into())]],
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.current().push(Fragment::Text(text.into()));
        self
    }

    pub fn strong(mut self, text: impl Into<String>) -> Self {
        self.current().push(Fragment::Strong(text.into()));
        self
    }

    /// Start a new paragraph.
    pub fn paragraph(mut self) -> Self {
        self.paragraphs.push(Vec::new());
        self
    }

    pub fn paragraphs(&self) -> &[Vec<Fragment>] {
        &self.paragraphs
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(|p| p.is_empty())
    }

    /// Text with emphasis dropped; paragraphs joined by newlines.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.iter().map(Fragment::text).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// HTML rendering with every fragment escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for paragraph in &self.paragraphs {
            out.push_str("<p>");
            for fragment in paragraph {
                match fragment {
                    Fragment::Text(t) => out.push_str(&escape_html(t)),
                    Fragment::Strong(t) => {
                        out.push_str("<b>");
                        out.push_str(&escape_html(t));
                        out.push_str("</b>");
                    }
                }
            }
            out.push_str("</p>");
        }
        out
    }

    fn current(&mut self) -> &mut Vec<Fragment> {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Vec::new());
        }
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }
}

impl fmt::Display for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain_text())
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shares bought and the resulting profit for an invested amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitFigures {
    pub shares: f64,
    pub max_profit: f64,
}

impl ProfitFigures {
    pub fn compute(amount: f64, points: &MaxProfitPoints) -> Self {
        let shares = amount / points.buy_point.price;
        let max_profit = (points.sell_point.price - points.buy_point.price) * shares;
        Self { shares, max_profit }
    }
}

/// What the user asked for, echoed back in the narrative.
#[derive(Debug, Clone, Copy)]
pub struct ProfitRequestEcho<'a> {
    pub amount: f64,
    pub stock: &'a str,
    pub begin: &'a str,
    pub end: &'a str,
}

/// Two decimals with ties rounded away from zero (0.125 -> "0.13").
fn to_fixed_2(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}

/// The friendly max-profit narrative. Dates are shown exactly as the server sent them.
pub fn profit_message(points: &MaxProfitPoints, echo: ProfitRequestEcho<'_>) -> RichText {
    let figures = ProfitFigures::compute(echo.amount, points);

    RichText::new()
        .strong(format!("{}$", to_fixed_2(figures.max_profit)))
        .text(" is the maximum profit that you could have earned in the period from ")
        .strong(echo.begin)
        .text(" to ")
        .strong(echo.end)
        .text(" by trading stock ")
        .strong(echo.stock)
        .text(".")
        .paragraph()
        .text("This could have been achieved if you have bought ")
        .strong(to_fixed_2(figures.shares))
        .text(" of shares on ")
        .strong(points.buy_point.date.as_str())
        .text(" and sold them on ")
        .strong(points.sell_point.date.as_str())
}
