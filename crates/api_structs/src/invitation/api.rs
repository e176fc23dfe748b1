use crate::dtos::InvitationDTO;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use timemesh_domain::{InvitationAction, ID};

pub mod get_invitations {
    use super::*;

    pub type APIResponse = Vec<InvitationDTO>;

    /// Message of the 404 the backend answers with instead of an empty list
    pub const NO_INVITATIONS_MESSAGE: &str = "No invitations found";
}

pub mod create_invitation {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    pub struct RequestBody {
        pub email: String,
        pub cal_id: ID,
    }

    #[derive(Serialize, Deserialize, Debug)]
    pub struct APIResponse {
        pub calendar: ID,
        pub email: String,
        pub invited_by: ID,
        pub token: String,
        pub accepted: bool,
        pub declined: bool,
        pub created_at: DateTime<Utc>,
    }
}

pub mod respond_invitation {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    pub struct RequestBody {
        pub token: String,
        pub action: InvitationAction,
    }

    pub type APIResponse = crate::MessageResponse;
}
