//! MEGA API error codes.

use serde_json::Value;

use crate::error::MegaError;

/// Result codes the fetch, put-nodes and delete commands can answer with.
///
/// Anything else maps to [`ApiErrorCode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    Internal = -1,
    /// Malformed command
    Args = -2,
    /// Server busy; the request may be retried
    Again = -3,
    RateLimit = -4,
    /// A node with this handle already exists
    Exist = -8,
    /// Source or target node is gone
    NotExist = -9,
    /// Target lies inside the copied subtree
    Circular = -10,
    /// No write access to the target
    AccessViolation = -11,
    /// Session id no longer valid
    Expired = -13,
    Blocked = -15,
    /// Copies count against the storage quota
    OverQuota = -16,
    TempUnavail = -17,
    Unknown = -9999,
}

impl From<i64> for ApiErrorCode {
    fn from(code: i64) -> Self {
        match code {
            -1 => ApiErrorCode::Internal,
            -2 => ApiErrorCode::Args,
            -3 => ApiErrorCode::Again,
            -4 => ApiErrorCode::RateLimit,
            -8 => ApiErrorCode::Exist,
            -9 => ApiErrorCode::NotExist,
            -10 => ApiErrorCode::Circular,
            -11 => ApiErrorCode::AccessViolation,
            -13 => ApiErrorCode::Expired,
            -15 => ApiErrorCode::Blocked,
            -16 => ApiErrorCode::OverQuota,
            -17 => ApiErrorCode::TempUnavail,
            _ => ApiErrorCode::Unknown,
        }
    }
}

impl ApiErrorCode {
    /// Human-readable description of the code.
    pub fn description(&self) -> &'static str {
        match self {
            ApiErrorCode::Internal => "Internal server error",
            ApiErrorCode::Args => "Invalid arguments",
            ApiErrorCode::Again => "Try again",
            ApiErrorCode::RateLimit => "Rate limit exceeded",
            ApiErrorCode::Exist => "Node already exists",
            ApiErrorCode::NotExist => "Node does not exist",
            ApiErrorCode::Circular => "Cannot copy a folder into itself",
            ApiErrorCode::AccessViolation => "Access violation",
            ApiErrorCode::Expired => "Session expired",
            ApiErrorCode::Blocked => "Account or node blocked",
            ApiErrorCode::OverQuota => "Storage quota exceeded",
            ApiErrorCode::TempUnavail => "Temporarily unavailable",
            ApiErrorCode::Unknown => "Unknown error",
        }
    }
}

/// Convert a negative API result code into an error.
pub(crate) fn api_error(code: i64) -> MegaError {
    MegaError::ApiError {
        code: code as i32,
        message: ApiErrorCode::from(code).description().to_string(),
    }
}

/// First non-zero code in a per-command result (scalar, array or object).
pub(crate) fn first_error_code(result: &Value) -> Option<i64> {
    match result {
        Value::Number(_) => result.as_i64().filter(|&code| code < 0),
        Value::Array(items) => items.iter().find_map(first_error_code),
        Value::Object(map) => map.values().find_map(|v| v.as_i64().filter(|&code| code < 0)),
        _ => None,
    }
}
