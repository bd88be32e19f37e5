//! Terminal front end for the max-profit form.
//!
//! The binary in `main.rs` wires these together: a crossterm/ratatui event
//! loop on the main thread and a request worker behind `mpsc` channels.

pub mod app;
pub mod input;
pub mod logging;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::{AppState, Focus, Overlay, StatusLevel};
pub use input::handle_key;
pub use worker::{spawn_worker, WorkerCommand, WorkerResponse};
