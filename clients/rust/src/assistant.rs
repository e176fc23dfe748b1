use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use timemesh_api_structs::{dtos::ChatMessageDTO, *};
use timemesh_domain::ChatMessage;

#[derive(Clone)]
pub struct AssistantClient {
    base: Arc<BaseClient>,
}

impl AssistantClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Sends the whole transcript, the last message being the one to answer
    pub async fn send(&self, messages: Vec<ChatMessage>) -> APIResponse<send_message::APIResponse> {
        let body = send_message::RequestBody {
            messages: messages.into_iter().map(ChatMessageDTO::new).collect(),
        };
        self.base.post(body, "ai/".into(), StatusCode::OK).await
    }
}
