use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use timemesh_api_structs::*;

#[derive(Clone)]
pub struct CalendarEventClient {
    base: Arc<BaseClient>,
}

pub struct UpdateEventInput {
    pub event_id: ID,
    pub body: update_event::RequestBody,
}

impl CalendarEventClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Every event the user can see, including events of shared calendars
    pub async fn get_all(&self) -> APIResponse<get_events::APIResponse> {
        self.base.get("events/".into(), StatusCode::OK).await
    }

    pub async fn create(
        &self,
        input: create_event::RequestBody,
    ) -> APIResponse<create_event::APIResponse> {
        self.base
            .post(input, "events/".into(), StatusCode::CREATED)
            .await
    }

    pub async fn update(&self, input: UpdateEventInput) -> APIResponse<update_event::APIResponse> {
        self.base
            .put(
                input.body,
                format!("events/{}/", input.event_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, event_id: ID) -> APIResponse<()> {
        self.base.delete(format!("events/{}/", event_id)).await
    }
}
