mod assistant;
mod base;
mod calendar;
mod event;
mod invitation;
mod user;

use assistant::AssistantClient;
pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use calendar::CalendarClient;
pub use calendar::{CreateCalendarInput, ImportCalendarInput, UpdateCalendarInput};
use event::CalendarEventClient;
pub use event::UpdateEventInput;
use invitation::InvitationClient;
pub use invitation::{CreateInvitationInput, RespondInvitationInput};
use std::sync::Arc;
pub use timemesh_api_structs::dtos::*;
pub use timemesh_api_structs::ErrorBody;
pub use timemesh_domain::{ChatMessage, Collection, InvitationAction, ID};
use user::UserClient;

/// TimeMesh SDK
///
/// The SDK contains methods for interacting with the TimeMesh backend API.
/// Every request is authenticated with the session token.
#[derive(Clone)]
pub struct TimeMeshSDK {
    pub assistant: AssistantClient,
    pub calendar: CalendarClient,
    pub event: CalendarEventClient,
    pub invitation: InvitationClient,
    pub user: UserClient,
}

impl TimeMeshSDK {
    pub fn new<T: Into<String>>(address: String, token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_token(token.into());
        let base = Arc::new(base);
        let assistant = AssistantClient::new(base.clone());
        let calendar = CalendarClient::new(base.clone());
        let event = CalendarEventClient::new(base.clone());
        let invitation = InvitationClient::new(base.clone());
        let user = UserClient::new(base);

        Self {
            assistant,
            calendar,
            event,
            invitation,
            user,
        }
    }
}
