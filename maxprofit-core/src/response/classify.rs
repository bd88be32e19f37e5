//! Maps a decoded reply (or a fetch failure) to what the result panel shows.

use serde::{Deserialize, Serialize};

use super::message::{profit_message, ProfitRequestEcho, RichText};
use super::wire::Reply;
use crate::request::FetchError;

pub const PARSE_RESPONSE_FAILED: &str = "Failed to parse the response returned by the server";
pub const PARSE_ERROR_FAILED: &str = "Failed to parse the error message returned by the server";
pub const SERVER_FAILED: &str = "The server failed to return a response";

/// Result classification driving the panel header and colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    Success,
    Info,
    #[default]
    Error,
}

impl Variant {
    pub fn header(self) -> &'static str {
        match self {
            Variant::Success => "Server successfully processed your request",
            Variant::Info => "No data was found",
            Variant::Error => "Fatal error",
        }
    }
}

/// A classified result: variant plus display message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub variant: Variant,
    pub message: RichText,
}

impl Outcome {
    pub fn new(variant: Variant, message: RichText) -> Self {
        Self { variant, message }
    }

    fn error(message: &str) -> Self {
        Self::new(Variant::Error, RichText::plain(message))
    }
}

/// Pure classification of a request result.
pub fn classify(result: &Result<Reply, FetchError>, echo: ProfitRequestEcho<'_>) -> Outcome {
    match result {
        Ok(Reply::Profit(points)) => Outcome::new(Variant::Success, profit_message(points, echo)),
        Ok(Reply::MalformedProfit { .. }) => Outcome::error(PARSE_RESPONSE_FAILED),
        Ok(Reply::Rejected { message, .. }) => {
            Outcome::new(Variant::Info, RichText::plain(message.as_str()))
        }
        Ok(Reply::MalformedRejection { .. }) => Outcome::error(PARSE_ERROR_FAILED),
        Ok(Reply::Failed { .. }) | Err(_) => Outcome::error(SERVER_FAILED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpReply;
    use serde_json::json;

    const ECHO: ProfitRequestEcho<'static> = ProfitRequestEcho {
        amount: 100.0,
        stock: "UBER",
        begin: "2023-01-01T09:00",
        end: "2023-07-01T09:00",
    };

    fn decoded(status: u16, body: serde_json::Value) -> Result<Reply, FetchError> {
        Ok(Reply::decode(HttpReply { status, body }))
    }

    #[test]
    fn success_builds_profit_message() {
        let outcome = classify(
            &decoded(
                200,
                json!({
                    "buyPoint": {"price": 100, "date": "2023-01-01"},
                    "sellPoint": {"price": 150, "date": "2023-06-01"}
                }),
            ),
            ECHO,
        );
        assert_eq!(outcome.variant, Variant::Success);
        let text = outcome.message.plain_text();
        assert!(text.contains("50.00$"));
        assert!(text.contains("2023-01-01"));
        assert!(text.contains("2023-06-01"));
    }

    #[test]
    fn success_with_missing_sell_point() {
        let outcome = classify(
            &decoded(200, json!({"buyPoint": {"price": 100, "date": "2023-01-01"}})),
            ECHO,
        );
        assert_eq!(outcome.variant, Variant::Error);
        assert_eq!(outcome.message.plain_text(), PARSE_RESPONSE_FAILED);
    }

    #[test]
    fn not_found_is_informational_verbatim() {
        let outcome = classify(
            &decoded(404, json!({"message": "No data found for symbol"})),
            ECHO,
        );
        assert_eq!(outcome.variant, Variant::Info);
        assert_eq!(outcome.message.plain_text(), "No data found for symbol");
    }

    #[test]
    fn bad_request_is_informational_verbatim() {
        let outcome = classify(&decoded(400, json!({"message": "begin after end"})), ECHO);
        assert_eq!(outcome.variant, Variant::Info);
        assert_eq!(outcome.message.plain_text(), "begin after end");
    }

    #[test]
    fn client_error_without_message() {
        let outcome = classify(&decoded(404, json!({})), ECHO);
        assert_eq!(outcome.variant, Variant::Error);
        assert_eq!(outcome.message.plain_text(), PARSE_ERROR_FAILED);
    }

    #[test]
    fn other_status_is_generic_failure() {
        for status in [201, 401, 429, 500, 503] {
            let outcome = classify(&decoded(status, json!({"message": "x"})), ECHO);
            assert_eq!(outcome.variant, Variant::Error);
            assert_eq!(outcome.message.plain_text(), SERVER_FAILED);
        }
    }

    #[test]
    fn fetch_error_is_generic_failure() {
        let outcome = classify(&Err(FetchError::Transport("connection refused".into())), ECHO);
        assert_eq!(outcome, Outcome::error(SERVER_FAILED));
    }

    #[test]
    fn headers_per_variant() {
        assert_eq!(Variant::Success.header(), "Server successfully processed your request");
        assert_eq!(Variant::Info.header(), "No data was found");
        assert_eq!(Variant::Error.header(), "Fatal error");
    }
}
