use crate::{APIError, APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use timemesh_api_structs::*;
use timemesh_domain::InvitationAction;

#[derive(Clone)]
pub struct InvitationClient {
    base: Arc<BaseClient>,
}

pub struct CreateInvitationInput {
    pub email: String,
    pub calendar_id: ID,
}

pub struct RespondInvitationInput {
    pub token: String,
    pub action: InvitationAction,
}

impl InvitationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Invitations sent to the current user. The backend answers with a 404
    /// when there are none, which is returned as an empty list.
    pub async fn get_all(&self) -> APIResponse<get_invitations::APIResponse> {
        let res = self
            .base
            .get("invitations/".into(), StatusCode::OK)
            .await;
        match res {
            Err(APIError::NotFound(body))
                if body.text() == Some(get_invitations::NO_INVITATIONS_MESSAGE) =>
            {
                Ok(Vec::new())
            }
            res => res,
        }
    }

    pub async fn create(
        &self,
        input: CreateInvitationInput,
    ) -> APIResponse<create_invitation::APIResponse> {
        let body = create_invitation::RequestBody {
            email: input.email,
            cal_id: input.calendar_id,
        };
        self.base
            .post(body, "invitations/".into(), StatusCode::CREATED)
            .await
    }

    pub async fn respond(
        &self,
        input: RespondInvitationInput,
    ) -> APIResponse<respond_invitation::APIResponse> {
        let body = respond_invitation::RequestBody {
            token: input.token,
            action: input.action,
        };
        self.base
            .post(body, "invitations/accept/".into(), StatusCode::OK)
            .await
    }
}
