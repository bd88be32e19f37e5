//! Form controller: owns the form and result panel, gates submission, and
//! applies classified replies.
//!
//! The controller does no I/O. `on_submit` hands back a [`Submission`] for
//! whoever runs requests; the reply comes back through `on_reply`.

use thiserror::Error;

use super::field::{parse_amount, FieldId};
use super::state::FormState;
use crate::panel::ResultPanelState;
use crate::request::{FetchError, ProfitQuery};
use crate::response::{classify, Outcome, ProfitRequestEcho, Reply};

/// Snapshot of the form taken when a valid submit goes out.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: u64,
    /// Mount generation the submission belongs to.
    pub generation: u64,
    pub query: ProfitQuery,
    pub stock: String,
    pub begin: String,
    pub end: String,
    pub amount: f64,
}

impl Submission {
    pub fn echo(&self) -> ProfitRequestEcho<'_> {
        ProfitRequestEcho {
            amount: self.amount,
            stock: &self.stock,
            begin: &self.begin,
            end: &self.end,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("form has invalid fields: {}", field_list(.0))]
    Invalid(Vec<FieldId>),

    #[error("a request is already in flight")]
    InFlight,
}

fn field_list(fields: &[FieldId]) -> String {
    fields.iter().map(|f| f.id()).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Default)]
pub struct FormController {
    state: FormState,
    panel: ResultPanelState,
    generation: u64,
    next_id: u64,
    in_flight: Option<u64>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn panel(&self) -> &ResultPanelState {
        &self.panel
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Change event keyed by field id string. Unknown ids are logged and ignored.
    pub fn on_field_change(&mut self, field_id: &str, value: impl Into<String>) {
        match field_id.parse::<FieldId>() {
            Ok(field) => self.set_field(field, value),
            Err(e) => tracing::error!(error = %e, "ignoring change event"),
        }
    }

    pub fn set_field(&mut self, field: FieldId, value: impl Into<String>) {
        self.state = std::mem::take(&mut self.state).with_field(field, value);
    }

    /// Validate and, if the form is valid and idle, produce a submission.
    ///
    /// The form is marked validated on every call.
    pub fn on_submit(&mut self) -> Result<Submission, SubmitRejected> {
        self.state = std::mem::take(&mut self.state).mark_validated();

        let invalid = self.state.invalid_fields();
        if !invalid.is_empty() {
            return Err(SubmitRejected::Invalid(invalid));
        }
        if let Some(id) = self.in_flight {
            tracing::debug!(in_flight = id, "submit ignored while a request is running");
            return Err(SubmitRejected::InFlight);
        }

        self.next_id += 1;
        let s = &self.state;
        let submission = Submission {
            id: self.next_id,
            generation: self.generation,
            query: ProfitQuery::from_fields(&s.stock, &s.begin_point, &s.end_point),
            stock: s.stock.clone(),
            begin: s.begin_point.clone(),
            end: s.end_point.clone(),
            amount: parse_amount(&s.amount).unwrap_or(f64::NAN),
        };
        self.in_flight = Some(submission.id);
        Ok(submission)
    }

    /// Classify a finished request and show it. Returns the outcome, or `None`
    /// when the reply belongs to an earlier mount and was dropped.
    pub fn on_reply(
        &mut self,
        submission: &Submission,
        result: Result<Reply, FetchError>,
    ) -> Option<Outcome> {
        if submission.generation != self.generation {
            tracing::debug!(
                submission = submission.id,
                generation = submission.generation,
                current = self.generation,
                "dropping reply for a form that is no longer mounted"
            );
            return None;
        }
        if self.in_flight == Some(submission.id) {
            self.in_flight = None;
        }

        let outcome = classify(&result, submission.echo());
        self.panel.show(outcome.clone());
        Some(outcome)
    }

    pub fn dismiss_result(&mut self) {
        self.panel.dismiss();
    }

    /// Reset to a freshly mounted form. Replies still in flight are dropped.
    pub fn remount(&mut self) {
        self.state = FormState::new();
        self.panel = ResultPanelState::new();
        self.in_flight = None;
        self.generation += 1;
    }
}
