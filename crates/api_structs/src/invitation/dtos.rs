use crate::dtos::{CalendarDTO, UserDTO};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use timemesh_domain::{InvalidInvitationState, Invitation, InvitationStatus, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InvitationDTO {
    pub inv_id: ID,
    pub calendar: CalendarDTO,
    pub email: String,
    pub invited_by: UserDTO,
    pub token: String,
    pub accepted: bool,
    pub declined: bool,
    pub created_at: DateTime<Utc>,
}

impl InvitationDTO {
    pub fn new(invitation: Invitation) -> Self {
        let (accepted, declined) = invitation.status.to_flags();
        Self {
            inv_id: invitation.id,
            calendar: CalendarDTO::new(invitation.calendar),
            email: invitation.email,
            invited_by: UserDTO::new(invitation.invited_by),
            token: invitation.token,
            accepted,
            declined,
            created_at: invitation.created_at,
        }
    }

    /// Fails for invitations flagged as both accepted and declined
    pub fn into_domain(self) -> Result<Invitation, InvalidInvitationState> {
        Ok(Invitation {
            status: InvitationStatus::from_flags(self.accepted, self.declined)?,
            id: self.inv_id,
            calendar: self.calendar.into_domain(),
            email: self.email,
            invited_by: self.invited_by.into_domain(),
            token: self.token,
            created_at: self.created_at,
        })
    }
}
