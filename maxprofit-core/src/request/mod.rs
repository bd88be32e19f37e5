//! Profit request client: query building, retry with backoff, HTTP transport

pub mod client;
pub mod query;
pub mod retry;
pub mod transport;

pub use client::{HttpReply, ProfitClient};
pub use query::ProfitQuery;
pub use retry::{retry_with_backoff, RetryNotice, RetryPolicy, Sleeper, ThreadSleeper};
pub use transport::{FetchError, RawResponse, ReqwestTransport, Transport};
