//! Boundary decoding of server replies.
//!
//! The server is untrusted: bodies are decoded into typed values here, once,
//! and nothing downstream looks at raw JSON again.

use serde::{Deserialize, Serialize};

use crate::request::HttpReply;

/// One side of the optimal trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: f64,
    pub date: String,
}

/// Success body: `{ "buyPoint": {...}, "sellPoint": {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxProfitPoints {
    pub buy_point: PricePoint,
    pub sell_point: PricePoint,
}

/// Client-error body: `{ "message": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// A server reply after decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// 200 with both trade points.
    Profit(MaxProfitPoints),
    /// 200 whose body does not have the expected shape.
    MalformedProfit { reason: String },
    /// 400/404 carrying a message for the user.
    Rejected { status: u16, message: String },
    /// 400/404 without a usable message.
    MalformedRejection { status: u16, reason: String },
    /// Any other status; the body is opaque.
    Failed { status: u16 },
}

impl Reply {
    pub fn decode(reply: HttpReply) -> Self {
        match reply.status {
            200 => match serde_json::from_value::<MaxProfitPoints>(reply.body) {
                Ok(points) => Reply::Profit(points),
                Err(e) => Reply::MalformedProfit {
                    reason: e.to_string(),
                },
            },
            400 | 404 => match serde_json::from_value::<ErrorBody>(reply.body) {
                Ok(body) => Reply::Rejected {
                    status: reply.status,
                    message: body.message,
                },
                Err(e) => Reply::MalformedRejection {
                    status: reply.status,
                    reason: e.to_string(),
                },
            },
            status => Reply::Failed { status },
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Reply::Profit(_) | Reply::MalformedProfit { .. } => 200,
            Reply::Rejected { status, .. }
            | Reply::MalformedRejection { status, .. }
            | Reply::Failed { status } => *status,
        }
    }
}
