use crate::shared::entity::{Entity, ID};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    pub id: ID,
    pub owner_id: ID,
    pub title: String,
    pub description: String,
    /// Emails of the users the calendar is shared with. Order is irrelevant.
    pub shared_user_emails: BTreeSet<String>,
}

impl Calendar {
    pub fn new(id: ID, owner_id: ID, title: impl Into<String>) -> Self {
        Self {
            id,
            owner_id,
            title: title.into(),
            description: String::new(),
            shared_user_emails: BTreeSet::new(),
        }
    }

    pub fn is_owned_by(&self, user_id: &ID) -> bool {
        self.owner_id == *user_id
    }

    pub fn is_shared_with(&self, email: &str) -> bool {
        self.shared_user_emails.contains(&email.to_lowercase())
    }

    /// Returns `false` if the calendar was already shared with `email`
    pub fn share_with(&mut self, email: &str) -> bool {
        self.shared_user_emails.insert(email.to_lowercase())
    }
}

impl Entity for Calendar {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Values of the calendar form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalendarInput {
    pub title: String,
    pub description: String,
}

impl CalendarInput {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Returns the trimmed input, or `None` if the title is blank
    pub fn validated(&self) -> Option<Self> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            title: title.to_string(),
            description: self.description.trim().to_string(),
        })
    }
}
