use serde::{Deserialize, Serialize};
use timemesh_domain::{Calendar, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CalendarDTO {
    pub cal_id: ID,
    pub user: ID,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Emails of the users the calendar is shared with
    #[serde(default)]
    pub shared_users: Vec<String>,
}

impl CalendarDTO {
    pub fn new(calendar: Calendar) -> Self {
        Self {
            cal_id: calendar.id,
            user: calendar.owner_id,
            title: calendar.title,
            description: Some(calendar.description),
            shared_users: calendar.shared_user_emails.into_iter().collect(),
        }
    }

    pub fn into_domain(self) -> Calendar {
        let mut calendar = Calendar::new(self.cal_id, self.user, self.title);
        calendar.description = self.description.unwrap_or_default();
        for email in &self.shared_users {
            calendar.share_with(email);
        }
        calendar
    }
}
