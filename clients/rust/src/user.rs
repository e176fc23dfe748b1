use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use timemesh_api_structs::*;

#[derive(Clone)]
pub struct UserClient {
    base: Arc<BaseClient>,
}

impl UserClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// The user the session token belongs to
    pub async fn me(&self) -> APIResponse<get_me::APIResponse> {
        self.base.get("auth/user/".into(), StatusCode::OK).await
    }
}
