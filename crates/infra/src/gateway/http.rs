use super::{AssistantReply, GatewayError, ISyncGateway};
use crate::session::Session;
use timemesh_api_structs::delete_calendar::LAST_CALENDAR_ERROR;
use timemesh_domain::{
    Calendar, CalendarEvent, CalendarInput, ChatMessage, Collection, CollectionSet,
    EventDefinition, Invitation, InvitationAction, TimeNormalizer, ID,
};
use timemesh_sdk::{
    APIError, CalendarEventDTO, CreateCalendarInput, CreateInvitationInput, EventBodyDTO,
    ImportCalendarInput, RespondInvitationInput, TimeMeshSDK, UpdateCalendarInput,
    UpdateEventInput,
};
use tracing::warn;

/// `ISyncGateway` talking to the TimeMesh REST api
pub struct HttpSyncGateway {
    sdk: TimeMeshSDK,
    normalizer: TimeNormalizer,
}

impl HttpSyncGateway {
    pub fn new(backend_url: String, session: &Session) -> Self {
        Self {
            sdk: TimeMeshSDK::new(backend_url, session.token.clone()),
            normalizer: session.normalizer(),
        }
    }

    fn to_event(&self, dto: CalendarEventDTO) -> CalendarEvent {
        dto.into_domain(&self.normalizer)
    }
}

impl From<APIError> for GatewayError {
    fn from(e: APIError) -> Self {
        if e.reason() == Some(LAST_CALENDAR_ERROR) {
            return Self::LastCalendar;
        }
        match e {
            APIError::Network => Self::Network(e.to_string()),
            APIError::MalformedResponse => Self::MalformedResponse(e.to_string()),
            APIError::Unauthorized => Self::Rejected {
                status: 401,
                message: e.to_string(),
            },
            APIError::NotFound(body) => {
                Self::NotFound(body.text().unwrap_or("Not found").to_string())
            }
            APIError::UnexpectedStatusCode { status, body } => Self::Rejected {
                status: status.as_u16(),
                message: body.text().unwrap_or_else(|| status.as_str()).to_string(),
            },
        }
    }
}

#[async_trait::async_trait]
impl ISyncGateway for HttpSyncGateway {
    async fn get_events(&self) -> Result<Vec<CalendarEvent>, GatewayError> {
        let events = self.sdk.event.get_all().await?;
        Ok(events.into_iter().map(|e| self.to_event(e)).collect())
    }

    async fn get_calendars(&self) -> Result<Vec<Calendar>, GatewayError> {
        let calendars = self.sdk.calendar.get_all().await?;
        Ok(calendars.into_iter().map(|c| c.into_domain()).collect())
    }

    async fn get_shared_calendars(&self) -> Result<Vec<Calendar>, GatewayError> {
        let calendars = self.sdk.calendar.get_shared().await?;
        Ok(calendars.into_iter().map(|c| c.into_domain()).collect())
    }

    async fn get_invitations(&self) -> Result<Vec<Invitation>, GatewayError> {
        self.sdk
            .invitation
            .get_all()
            .await?
            .into_iter()
            .map(|dto| {
                dto.into_domain()
                    .map_err(|e| GatewayError::MalformedResponse(e.to_string()))
            })
            .collect()
    }

    async fn create_event(&self, event: &EventDefinition) -> Result<CalendarEvent, GatewayError> {
        let created = self.sdk.event.create(EventBodyDTO::new(event)).await?;
        Ok(self.to_event(created))
    }

    async fn update_event(
        &self,
        event_id: &ID,
        event: &EventDefinition,
    ) -> Result<CalendarEvent, GatewayError> {
        let input = UpdateEventInput {
            event_id: *event_id,
            body: EventBodyDTO::new(event),
        };
        let updated = self.sdk.event.update(input).await?;
        Ok(self.to_event(updated))
    }

    async fn delete_event(&self, event_id: &ID) -> Result<(), GatewayError> {
        Ok(self.sdk.event.delete(*event_id).await?)
    }

    async fn create_calendar(&self, calendar: &CalendarInput) -> Result<Calendar, GatewayError> {
        let input = CreateCalendarInput {
            title: calendar.title.clone(),
            description: calendar.description.clone(),
        };
        let res = self.sdk.calendar.create(input).await?;
        Ok(res.calendar.into_domain())
    }

    async fn update_calendar(
        &self,
        calendar_id: &ID,
        calendar: &CalendarInput,
    ) -> Result<Calendar, GatewayError> {
        let input = UpdateCalendarInput {
            calendar_id: *calendar_id,
            title: calendar.title.clone(),
            description: calendar.description.clone(),
        };
        let res = self.sdk.calendar.update(input).await?;
        Ok(res.calendar.into_domain())
    }

    async fn delete_calendar(&self, calendar_id: &ID) -> Result<(), GatewayError> {
        Ok(self.sdk.calendar.delete(*calendar_id).await?)
    }

    async fn import_calendar(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<(), GatewayError> {
        let input = ImportCalendarInput {
            file_name: file_name.to_string(),
            content,
        };
        Ok(self.sdk.calendar.import(input).await?)
    }

    async fn export_calendar(&self, calendar_ids: &[ID]) -> Result<Vec<u8>, GatewayError> {
        Ok(self.sdk.calendar.export(calendar_ids.to_vec()).await?)
    }

    async fn invite(&self, calendar_id: &ID, email: &str) -> Result<(), GatewayError> {
        let input = CreateInvitationInput {
            email: email.to_string(),
            calendar_id: *calendar_id,
        };
        self.sdk.invitation.create(input).await?;
        Ok(())
    }

    async fn respond_to_invitation(
        &self,
        token: &str,
        action: InvitationAction,
    ) -> Result<(), GatewayError> {
        let input = RespondInvitationInput {
            token: token.to_string(),
            action,
        };
        self.sdk.invitation.respond(input).await?;
        Ok(())
    }

    async fn send_assistant_message(
        &self,
        transcript: &[ChatMessage],
    ) -> Result<AssistantReply, GatewayError> {
        let res = self.sdk.assistant.send(transcript.to_vec()).await?;
        let update = res
            .update
            .iter()
            .filter_map(|name| match name.parse::<Collection>() {
                Ok(collection) => Some(collection),
                Err(e) => {
                    warn!("Ignoring assistant update: {}", e);
                    None
                }
            })
            .collect::<CollectionSet>();
        Ok(AssistantReply {
            message: res.message,
            update,
        })
    }
}
