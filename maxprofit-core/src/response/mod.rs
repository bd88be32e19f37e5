//! Server reply decoding, classification and result messages

pub mod classify;
pub mod message;
pub mod wire;

pub use classify::{classify, Outcome, Variant};
pub use message::{profit_message, Fragment, ProfitFigures, ProfitRequestEcho, RichText};
pub use wire::{ErrorBody, MaxProfitPoints, PricePoint, Reply};
