//! The uniform error payload.

use serde::{Deserialize, Serialize};

/// Every failed request answers with this shape, regardless of status code.
///
/// `name` is a stable machine-readable identifier (`"UserExistsError"`,
/// `"UnauthorizedUserError"`, ...); `message` is for humans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub name: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}
