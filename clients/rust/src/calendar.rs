use crate::{APIResponse, BaseClient, ID};
use reqwest::{
    multipart::{Form, Part},
    StatusCode,
};
use std::sync::Arc;
use timemesh_api_structs::*;

#[derive(Clone)]
pub struct CalendarClient {
    base: Arc<BaseClient>,
}

pub struct CreateCalendarInput {
    pub title: String,
    pub description: String,
}

pub struct UpdateCalendarInput {
    pub calendar_id: ID,
    pub title: String,
    pub description: String,
}

pub struct ImportCalendarInput {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl CalendarClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_all(&self) -> APIResponse<get_calendars::APIResponse> {
        self.base.get("calendars/".into(), StatusCode::OK).await
    }

    /// Calendars other users have shared with the current user
    pub async fn get_shared(&self) -> APIResponse<get_shared_calendars::APIResponse> {
        self.base
            .get("calendars/shared/".into(), StatusCode::OK)
            .await
    }

    pub async fn create(
        &self,
        input: CreateCalendarInput,
    ) -> APIResponse<create_calendar::APIResponse> {
        let body = create_calendar::RequestBody {
            title: input.title,
            description: input.description,
        };
        self.base
            .post(body, "calendars/".into(), StatusCode::CREATED)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateCalendarInput,
    ) -> APIResponse<update_calendar::APIResponse> {
        let body = update_calendar::RequestBody {
            title: input.title,
            description: input.description,
        };
        self.base
            .put(
                body,
                format!("calendars/{}/", input.calendar_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, calendar_id: ID) -> APIResponse<()> {
        self.base
            .delete(format!("calendars/{}/", calendar_id))
            .await
    }

    pub async fn import(&self, input: ImportCalendarInput) -> APIResponse<()> {
        let part = Part::bytes(input.content).file_name(input.file_name);
        let form = Form::new().part(import_calendar::FILE_PART, part);
        self.base
            .post_multipart(form, "calendars/import/".into())
            .await
    }

    /// Returns the exported calendar file as is
    pub async fn export(&self, calendar_ids: Vec<ID>) -> APIResponse<Vec<u8>> {
        let body = export_calendar::RequestBody {
            cal_ids: calendar_ids,
        };
        self.base
            .post_for_bytes(body, "calendars/export/".into(), StatusCode::OK)
            .await
    }
}
