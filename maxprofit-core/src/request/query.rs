//! The max-profit query derived from form fields at submit time.

use serde::{Deserialize, Serialize};

use crate::form::field::local_epoch_seconds;

pub const MAX_PROFIT_PATH: &str = "/maxprofit";

/// `symbol`, `begin`, `end` as sent to the service.
///
/// A date that does not parse has no epoch value; it is sent as `NaN`
/// rather than rejected here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitQuery {
    pub symbol: String,
    pub begin_epoch_seconds: Option<i64>,
    pub end_epoch_seconds: Option<i64>,
}

impl ProfitQuery {
    pub fn from_fields(symbol: &str, begin: &str, end: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            begin_epoch_seconds: local_epoch_seconds(begin),
            end_epoch_seconds: local_epoch_seconds(end),
        }
    }

    pub fn path_and_query(&self) -> String {
        format!(
            "{MAX_PROFIT_PATH}?symbol={}&begin={}&end={}",
            self.symbol,
            epoch_param(self.begin_epoch_seconds),
            epoch_param(self.end_epoch_seconds),
        )
    }

    /// Full URL against a base like `http://localhost:8080`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path_and_query())
    }
}

fn epoch_param(seconds: Option<i64>) -> String {
    match seconds {
        Some(s) => s.to_string(),
        None => "NaN".to_string(),
    }
}
