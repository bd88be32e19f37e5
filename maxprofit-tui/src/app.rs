//! Application state, owned by the main thread.
//!
//! The form controller lives here; the request worker talks to it through channels.

use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use maxprofit_core::form::{FieldId, FormController, SubmitRejected};
use maxprofit_core::request::{FetchError, RetryNotice};
use maxprofit_core::Variant;

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which control has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldId),
    Submit,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Field(FieldId::Stock),
        Focus::Field(FieldId::Begin),
        Focus::Field(FieldId::End),
        Focus::Field(FieldId::Amount),
        Focus::Submit,
    ];

    pub fn index(self) -> usize {
        Self::ORDER.iter().position(|&f| f == self).unwrap_or(0)
    }

    pub fn next(self) -> Focus {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Focus {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn field(self) -> Option<FieldId> {
        match self {
            Focus::Field(field) => Some(field),
            Focus::Submit => None,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub form: FormController,
    pub focus: Focus,
    pub overlay: Overlay,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    /// Fetches sent to the worker that have not reported `Completed` yet,
    /// including ones a remount has orphaned.
    pub worker_pending: usize,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub retry: Option<RetryNotice>,
    pub last_completed: Option<NaiveDateTime>,
    pub server_url: String,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        server_url: String,
    ) -> Self {
        Self {
            running: true,
            form: FormController::new(),
            focus: Focus::Field(FieldId::Stock),
            overlay: Overlay::None,
            worker_tx,
            worker_rx,
            worker_pending: 0,
            status_message: None,
            retry: None,
            last_completed: None,
            server_url,
        }
    }

    /// Append a character to the focused field.
    pub fn type_char(&mut self, c: char) {
        if let Some(field) = self.focus.field() {
            let mut value = self.form.state().value(field).to_string();
            value.push(c);
            self.form.on_field_change(field.id(), value);
        }
    }

    /// Remove the last character of the focused field.
    pub fn backspace(&mut self) {
        if let Some(field) = self.focus.field() {
            let mut value = self.form.state().value(field).to_string();
            if value.pop().is_some() {
                self.form.on_field_change(field.id(), value);
            }
        }
    }

    pub fn clear_field(&mut self) {
        if let Some(field) = self.focus.field() {
            self.form.on_field_change(field.id(), String::new());
        }
    }

    /// Validate and, if valid, hand the submission to the worker.
    pub fn submit(&mut self) {
        match self.form.on_submit() {
            Ok(submission) => {
                let symbol = submission.stock.clone();
                if let Err(err) = self.worker_tx.send(WorkerCommand::Fetch(submission)) {
                    // The worker is gone; fail this submission like a dead network.
                    let WorkerCommand::Fetch(submission) = err.0 else {
                        return;
                    };
                    tracing::error!("request worker is not running");
                    self.form.on_reply(
                        &submission,
                        Err(FetchError::Transport("request worker is not running".into())),
                    );
                    self.set_error("Request worker is not running");
                    return;
                }
                self.worker_pending += 1;
                self.retry = None;
                self.set_status(format!("Requesting max profit for {symbol}..."));
            }
            Err(SubmitRejected::Invalid(fields)) => {
                if let Some(first) = fields.first() {
                    self.focus = Focus::Field(*first);
                }
                self.set_warning(format!("{} field(s) need attention", fields.len()));
            }
            Err(SubmitRejected::InFlight) => {
                self.set_warning("A request is already running");
            }
        }
    }

    pub fn dismiss_result(&mut self) {
        self.form.dismiss_result();
    }

    /// Start over with an empty form. Replies still on their way are dropped.
    pub fn remount(&mut self) {
        self.form.remount();
        self.focus = Focus::Field(FieldId::Stock);
        self.retry = None;
        self.set_status("Form reset");
    }

    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Retrying { submission, notice } => {
                if submission.generation != self.form.generation() {
                    return;
                }
                self.set_warning(format!(
                    "{}; retry {} in {}s",
                    notice.cause,
                    notice.attempt,
                    notice.delay.as_secs()
                ));
                self.retry = Some(notice);
            }
            WorkerResponse::Completed { submission, result } => {
                self.worker_pending = self.worker_pending.saturating_sub(1);
                let Some(outcome) = self.form.on_reply(&submission, result) else {
                    return;
                };
                self.retry = None;
                self.last_completed = Some(chrono::Local::now().naive_local());
                match outcome.variant {
                    Variant::Success => self.set_status("Request complete"),
                    Variant::Info => self.set_warning("No data for that request"),
                    Variant::Error => self.set_error("Request failed"),
                }
            }
        }
    }

    /// True when the worker has nothing left to finish, so joining it won't block.
    pub fn worker_idle(&self) -> bool {
        self.worker_pending == 0
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maxprofit_core::response::Reply;
    use std::sync::mpsc;
    use std::time::Duration;

    fn app() -> (AppState, Receiver<WorkerCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        (AppState::new(cmd_tx, resp_rx, "http://localhost:5000".into()), cmd_rx)
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            app.type_char(c);
        }
    }

    fn fill(app: &mut AppState) {
        for (field, value) in [
            (FieldId::Stock, "UBER"),
            (FieldId::Begin, "2023-11-16T10:30"),
            (FieldId::End, "2023-12-16T10:30"),
            (FieldId::Amount, "100"),
        ] {
            app.focus = Focus::Field(field);
            type_str(app, value);
        }
    }

    #[test]
    fn focus_cycle() {
        assert_eq!(Focus::Field(FieldId::Stock).next(), Focus::Field(FieldId::Begin));
        assert_eq!(Focus::Submit.next(), Focus::Field(FieldId::Stock));
        assert_eq!(Focus::Field(FieldId::Stock).prev(), Focus::Submit);
        assert_eq!(Focus::Submit.prev(), Focus::Field(FieldId::Amount));
    }

    #[test]
    fn typing_edits_focused_field() {
        let (mut app, _rx) = app();
        type_str(&mut app, "UBERX");
        app.backspace();
        assert_eq!(app.form.state().stock, "UBER");
        app.focus = Focus::Submit;
        app.type_char('z');
        assert_eq!(app.form.state().stock, "UBER");
    }

    #[test]
    fn invalid_submit_sends_nothing_and_focuses_first_bad_field() {
        let (mut app, rx) = app();
        app.focus = Focus::Submit;
        app.submit();
        assert!(rx.try_recv().is_err());
        assert_eq!(app.focus, Focus::Field(FieldId::Stock));
        assert!(app.form.state().validated);
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));
    }

    #[test]
    fn valid_submit_goes_to_worker() {
        let (mut app, rx) = app();
        fill(&mut app);
        app.submit();
        match rx.try_recv() {
            Ok(WorkerCommand::Fetch(sub)) => assert_eq!(sub.query.symbol, "UBER"),
            other => panic!("expected Fetch, got {other:?}"),
        }
        app.submit();
        assert!(rx.try_recv().is_err(), "double submit must not reach the worker");
    }

    #[test]
    fn completed_reply_shows_panel() {
        let (mut app, rx) = app();
        fill(&mut app);
        app.submit();
        let Ok(WorkerCommand::Fetch(submission)) = rx.try_recv() else {
            panic!("expected Fetch");
        };
        app.handle_worker_response(WorkerResponse::Retrying {
            submission: submission.clone(),
            notice: RetryNotice {
                attempt: 1,
                delay: Duration::from_secs(1),
                cause: "HTTP 503".into(),
            },
        });
        assert!(app.retry.is_some());

        app.handle_worker_response(WorkerResponse::Completed {
            submission,
            result: Ok(Reply::Rejected {
                status: 404,
                message: "No data found for symbol".into(),
            }),
        });
        assert!(app.retry.is_none());
        assert!(app.form.panel().visible);
        assert_eq!(app.form.panel().variant, Variant::Info);
        assert!(app.last_completed.is_some());
    }

    #[test]
    fn stale_reply_after_remount_is_ignored() {
        let (mut app, rx) = app();
        fill(&mut app);
        app.submit();
        let Ok(WorkerCommand::Fetch(submission)) = rx.try_recv() else {
            panic!("expected Fetch");
        };
        app.remount();
        app.handle_worker_response(WorkerResponse::Completed {
            submission,
            result: Err(FetchError::Transport("late".into())),
        });
        assert!(!app.form.panel().visible);
        assert!(app.last_completed.is_none());
    }

    #[test]
    fn remount_does_not_make_a_busy_worker_look_idle() {
        let (mut app, rx) = app();
        fill(&mut app);
        app.submit();
        let Ok(WorkerCommand::Fetch(submission)) = rx.try_recv() else {
            panic!("expected Fetch");
        };
        assert!(!app.worker_idle());

        app.remount();
        assert!(!app.form.is_in_flight());
        assert!(!app.worker_idle(), "worker is still running the orphaned fetch");

        app.handle_worker_response(WorkerResponse::Completed {
            submission,
            result: Err(FetchError::Transport("late".into())),
        });
        assert!(app.worker_idle());
        assert!(!app.form.panel().visible);
    }

    #[test]
    fn dead_worker_fails_the_submission() {
        let (mut app, rx) = app();
        drop(rx);
        fill(&mut app);
        app.submit();
        assert!(app.form.panel().visible);
        assert_eq!(app.form.panel().variant, Variant::Error);
        assert!(!app.form.is_in_flight());
        assert!(app.worker_idle());
    }
}
