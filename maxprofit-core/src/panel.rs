//! Result panel state.

use serde::{Deserialize, Serialize};

use crate::response::{Outcome, RichText, Variant};

/// What the result panel shows. Dismissal only hides it; variant and message
/// stay as they were.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPanelState {
    pub visible: bool,
    pub variant: Variant,
    pub message: RichText,
}

impl ResultPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, outcome: Outcome) {
        self.variant = outcome.variant;
        self.message = outcome.message;
        self.visible = true;
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub fn header(&self) -> &'static str {
        self.variant.header()
    }
}
