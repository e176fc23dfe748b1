mod http;
mod inmemory;

pub use http::HttpSyncGateway;
pub use inmemory::{ImportedFile, InMemoryBackend, InMemorySyncGateway};

use thiserror::Error;
use timemesh_domain::{
    Calendar, CalendarEvent, CalendarInput, ChatMessage, CollectionSet, EventDefinition,
    Invitation, InvitationAction, ID,
};

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Unable to reach the backend: {0}")]
    Network(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Cannot delete the last calendar")]
    LastCalendar,
    #[error("The backend rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("The backend sent a malformed response: {0}")]
    MalformedResponse(String),
}

/// Answer of the assistant together with the collections it changed on the
/// backend while answering
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    pub message: String,
    pub update: CollectionSet,
}

/// The boundary to the remote persistence api. Every call is made on behalf
/// of the session the gateway was created with.
#[async_trait::async_trait]
pub trait ISyncGateway: Send + Sync {
    async fn get_events(&self) -> Result<Vec<CalendarEvent>, GatewayError>;
    async fn get_calendars(&self) -> Result<Vec<Calendar>, GatewayError>;
    async fn get_shared_calendars(&self) -> Result<Vec<Calendar>, GatewayError>;
    async fn get_invitations(&self) -> Result<Vec<Invitation>, GatewayError>;

    /// Returns the canonical event including its occurrence dates
    async fn create_event(&self, event: &EventDefinition) -> Result<CalendarEvent, GatewayError>;
    async fn update_event(
        &self,
        event_id: &ID,
        event: &EventDefinition,
    ) -> Result<CalendarEvent, GatewayError>;
    async fn delete_event(&self, event_id: &ID) -> Result<(), GatewayError>;

    async fn create_calendar(&self, calendar: &CalendarInput) -> Result<Calendar, GatewayError>;
    async fn update_calendar(
        &self,
        calendar_id: &ID,
        calendar: &CalendarInput,
    ) -> Result<Calendar, GatewayError>;
    /// Fails with `GatewayError::LastCalendar` for the only calendar of a user
    async fn delete_calendar(&self, calendar_id: &ID) -> Result<(), GatewayError>;
    async fn import_calendar(&self, file_name: &str, content: Vec<u8>)
        -> Result<(), GatewayError>;
    async fn export_calendar(&self, calendar_ids: &[ID]) -> Result<Vec<u8>, GatewayError>;

    /// Invites `email` to a calendar of the session user
    async fn invite(&self, calendar_id: &ID, email: &str) -> Result<(), GatewayError>;
    async fn respond_to_invitation(
        &self,
        token: &str,
        action: InvitationAction,
    ) -> Result<(), GatewayError>;

    async fn send_assistant_message(
        &self,
        transcript: &[ChatMessage],
    ) -> Result<AssistantReply, GatewayError>;
}
