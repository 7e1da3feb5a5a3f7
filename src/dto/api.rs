//! JSON envelope shared by every API endpoint.

use serde::{Deserialize, Serialize};

/// `{"success": bool, "data": …}` wrapper around every API response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl ApiEnvelope<ApiErrorBody> {
    pub fn error(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            data: ApiErrorBody {
                message: message.into(),
                code: code.into(),
            },
        }
    }
}

/// Payload of a failed call: a user-safe message and a machine code.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: String,
}

/// Payload carrying only a message.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageBody {
    pub message: String,
}

/// Anti-forgery token handed to the page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NonceBody {
    pub nonce: String,
}
