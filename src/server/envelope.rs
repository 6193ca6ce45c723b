//! Request and response envelopes of the `/mcp/{service}` endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::clock::now_iso8601;
use crate::tools::Params;

pub const MISSING_METHOD_OR_PARAMS: &str = "Missing method or params in request";

/// A validated tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    pub method: String,
    pub params: Params,
}

impl RequestEnvelope {
    /// `method` must be a non-empty string and `params` an object (possibly
    /// empty). Anything else is rejected before dispatch.
    pub fn from_value(body: Value) -> Option<RequestEnvelope> {
        let mut body = match body {
            Value::Object(map) => map,
            _ => return None,
        };

        let method = match body.remove("method") {
            Some(Value::String(method)) if !method.is_empty() => method,
            _ => return None,
        };
        let params = match body.remove("params") {
            Some(Value::Object(params)) => params,
            _ => return None,
        };

        Some(RequestEnvelope { method, params })
    }
}

#[derive(Debug, Serialize)]
pub struct SuccessEnvelope {
    pub success: bool,
    pub result: Value,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

pub fn success_response(result: Value) -> Response {
    Json(SuccessEnvelope {
        success: true,
        result,
        timestamp: now_iso8601(),
    })
    .into_response()
}

/// 400 without timestamp, as validation never reaches dispatch.
pub fn bad_request_response(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorEnvelope {
            error: message.into(),
            timestamp: None,
        }),
    )
        .into_response()
}

pub fn server_error_response(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorEnvelope {
            error: message.into(),
            timestamp: Some(now_iso8601()),
        }),
    )
        .into_response()
}
