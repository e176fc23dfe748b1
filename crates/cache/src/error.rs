use thiserror::Error;
use timemesh_domain::DraftError;
use timemesh_infra::GatewayError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    #[error("Invalid data provided: {0}")]
    Validation(String),
    #[error("{0}")]
    InvariantViolation(String),
    #[error("Request to the backend failed: {0}")]
    Remote(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<DraftError> for CacheError {
    fn from(e: DraftError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<GatewayError> for CacheError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::NotFound(message) => Self::NotFound(message),
            GatewayError::LastCalendar => Self::InvariantViolation(e.to_string()),
            GatewayError::Network(_)
            | GatewayError::Rejected { .. }
            | GatewayError::MalformedResponse(_) => Self::Remote(e.to_string()),
        }
    }
}
