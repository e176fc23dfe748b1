use serde::{Deserialize, Serialize};
use timemesh_domain::{InvitingUser, ID};

/// User details as returned by the auth endpoints
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UserDTO {
    #[serde(alias = "pk")]
    pub id: ID,
    pub username: String,
    pub email: String,
}

impl UserDTO {
    pub fn new(user: InvitingUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }

    pub fn into_domain(self) -> InvitingUser {
        InvitingUser {
            id: self.id,
            email: self.email,
            username: self.username,
        }
    }
}
