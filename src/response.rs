// src/response.rs

use serde::Serialize;

/// Uniform response envelope. Every operation, success or failure, returns
/// `{ok, data, message?}`; the transport layer never sees bare payloads.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data,
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            data,
            message: Some(message.into()),
        }
    }
}
