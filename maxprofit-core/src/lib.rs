//! maxprofit core: everything behind the max-profit form that is not drawing.
//!
//! This crate holds:
//! - Field validators and the reducer-style form state
//! - The form controller (submission gate, reply handling, result panel)
//! - The profit request client (query building, retry with backoff, HTTP transport)
//! - Boundary decoding of server replies and their classification
//! - The rich-text profit message
//! - Configuration loading

pub mod config;
pub mod form;
pub mod panel;
pub mod request;
pub mod response;

pub use config::{ConfigError, ServerConfig, Settings};
pub use form::{FieldId, FormController, FormState, Submission, SubmitRejected};
pub use panel::ResultPanelState;
pub use request::{FetchError, HttpReply, ProfitClient, ProfitQuery, RetryPolicy};
pub use response::{classify, Outcome, Reply, RichText, Variant};
