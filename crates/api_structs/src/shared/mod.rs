use serde::{Deserialize, Serialize};

/// Body of a successful response that only carries a message
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of an error response. The backend uses `error` for most failures and
/// `message` for some of its not found responses.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}
