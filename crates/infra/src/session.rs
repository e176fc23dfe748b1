use chrono_tz::Tz;
use timemesh_domain::{TimeNormalizer, ID};

/// The logged in user every gateway call is made on behalf of
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user_id: ID,
    pub email: String,
    pub timezone: Tz,
}

impl Session {
    pub fn new(token: impl Into<String>, user_id: ID, email: impl Into<String>, timezone: Tz) -> Self {
        Self {
            token: token.into(),
            user_id,
            email: email.into(),
            timezone,
        }
    }

    pub fn normalizer(&self) -> TimeNormalizer {
        TimeNormalizer::new(self.timezone)
    }
}
