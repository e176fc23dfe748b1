use crate::{
    calendar::Calendar,
    shared::entity::{Entity, ID},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidInvitationState {
    #[error("An invitation can not be both accepted and declined")]
    AcceptedAndDeclined,
    #[error("The invitation has already been responded to")]
    AlreadyResponded,
}

impl InvitationStatus {
    /// Decodes the `accepted` and `declined` flags sent by the backend
    pub fn from_flags(accepted: bool, declined: bool) -> Result<Self, InvalidInvitationState> {
        match (accepted, declined) {
            (false, false) => Ok(Self::Pending),
            (true, false) => Ok(Self::Accepted),
            (false, true) => Ok(Self::Declined),
            (true, true) => Err(InvalidInvitationState::AcceptedAndDeclined),
        }
    }

    /// The `(accepted, declined)` flags
    pub fn to_flags(&self) -> (bool, bool) {
        match self {
            Self::Pending => (false, false),
            Self::Accepted => (true, false),
            Self::Declined => (false, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationAction {
    Accept,
    Decline,
}

impl InvitationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Decline => "decline",
        }
    }
}

impl Display for InvitationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("`{0}` is not a valid invitation action, expected accept or decline")]
pub struct InvalidInvitationAction(String);

impl FromStr for InvitationAction {
    type Err = InvalidInvitationAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "accept" => Ok(Self::Accept),
            "decline" => Ok(Self::Decline),
            _ => Err(InvalidInvitationAction(s.to_string())),
        }
    }
}

/// The user who sent an invitation
#[derive(Debug, Clone, PartialEq)]
pub struct InvitingUser {
    pub id: ID,
    pub email: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invitation {
    pub id: ID,
    pub calendar: Calendar,
    pub email: String,
    pub invited_by: InvitingUser,
    pub token: String,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
}

impl Entity for Invitation {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Invitation {
    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }

    /// An invitation can only be responded to once
    pub fn respond(&mut self, action: InvitationAction) -> Result<(), InvalidInvitationState> {
        if !self.is_pending() {
            return Err(InvalidInvitationState::AlreadyResponded);
        }
        self.status = match action {
            InvitationAction::Accept => InvitationStatus::Accepted,
            InvitationAction::Decline => InvitationStatus::Declined,
        };
        Ok(())
    }
}
