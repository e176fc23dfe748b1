use crate::{
    assistant::SendAssistantMessageUseCase,
    calendar::{
        CreateCalendarUseCase, DeleteCalendarUseCase, ExportCalendarUseCase,
        ImportCalendarUseCase, ShareCalendarUseCase, UpdateCalendarUseCase,
    },
    context::CacheContext,
    error::CacheError,
    event::{CreateEventUseCase, DeleteEventUseCase, UpdateEventUseCase},
    invitation::RespondInvitationUseCase,
    load::LoadCollectionsUseCase,
    shared::usecase::execute,
    state::CacheChange,
};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use timemesh_domain::{
    Calendar, CalendarEvent, CalendarInput, ChatMessage, CollectionSet, EventDraft, Invitation,
    InvitationAction, Occurrence, TimeNormalizer, ID,
};
use timemesh_infra::TimeMeshContext;
use tokio::sync::broadcast;

/// The authoritative local copy of the events, calendars, shared calendars
/// and invitations of the session user.
///
/// Every mutation is confirmed by the backend before it is applied locally,
/// a failed mutation leaves the cache untouched.
pub struct EventCache {
    ctx: CacheContext,
}

impl EventCache {
    pub fn new(infra: TimeMeshContext) -> Self {
        Self {
            ctx: CacheContext::new(infra),
        }
    }

    pub fn normalizer(&self) -> TimeNormalizer {
        self.ctx.normalizer()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheChange> {
        self.ctx.subscribe()
    }

    /// Replaces every collection with the state of the backend
    pub async fn load(&self) -> Result<(), CacheError> {
        execute(LoadCollectionsUseCase::all(), &self.ctx).await?;
        Ok(())
    }

    pub async fn load_collections(&self, collections: CollectionSet) -> Result<(), CacheError> {
        execute(LoadCollectionsUseCase { collections }, &self.ctx).await?;
        Ok(())
    }

    /// Returns the anchor occurrence of the created event
    pub async fn add_event(&self, draft: EventDraft) -> Result<Occurrence, CacheError> {
        execute(CreateEventUseCase { draft }, &self.ctx).await
    }

    /// Returns the anchor occurrence of the updated event
    pub async fn update_event(&self, draft: EventDraft) -> Result<Occurrence, CacheError> {
        execute(UpdateEventUseCase { draft }, &self.ctx).await
    }

    pub async fn delete_event(&self, event_id: &ID) -> Result<(), CacheError> {
        execute(
            DeleteEventUseCase {
                event_id: *event_id,
            },
            &self.ctx,
        )
        .await?;
        Ok(())
    }

    pub async fn add_calendar(&self, input: CalendarInput) -> Result<Calendar, CacheError> {
        execute(CreateCalendarUseCase { input }, &self.ctx).await
    }

    pub async fn update_calendar(
        &self,
        calendar_id: &ID,
        input: CalendarInput,
    ) -> Result<Calendar, CacheError> {
        execute(
            UpdateCalendarUseCase {
                calendar_id: *calendar_id,
                input,
            },
            &self.ctx,
        )
        .await
    }

    pub async fn delete_calendar(&self, calendar_id: &ID) -> Result<(), CacheError> {
        execute(
            DeleteCalendarUseCase {
                calendar_id: *calendar_id,
            },
            &self.ctx,
        )
        .await?;
        Ok(())
    }

    pub async fn share_calendar(&self, calendar_id: &ID, email: &str) -> Result<(), CacheError> {
        execute(
            ShareCalendarUseCase {
                calendar_id: *calendar_id,
                email: email.to_string(),
            },
            &self.ctx,
        )
        .await
    }

    pub async fn import_calendar(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<(), CacheError> {
        execute(
            ImportCalendarUseCase {
                file_name: file_name.to_string(),
                content,
            },
            &self.ctx,
        )
        .await
    }

    pub async fn export_calendar(&self, calendar_ids: &[ID]) -> Result<Vec<u8>, CacheError> {
        execute(
            ExportCalendarUseCase {
                calendar_ids: calendar_ids.to_vec(),
            },
            &self.ctx,
        )
        .await
    }

    /// Fails with `CacheError::Remote` when the answer was accepted by the
    /// backend but refreshing events and shared calendars afterwards was not
    pub async fn respond_to_invitation(
        &self,
        token: &str,
        action: InvitationAction,
    ) -> Result<(), CacheError> {
        execute(
            RespondInvitationUseCase {
                token: token.to_string(),
                action,
            },
            &self.ctx,
        )
        .await?;
        Ok(())
    }

    /// Returns the answer of the assistant. The answer is also kept in the
    /// transcript when only refreshing the collections it changed fails.
    pub async fn send_assistant_message(&self, content: &str) -> Result<String, CacheError> {
        let reply = execute(
            SendAssistantMessageUseCase {
                content: content.to_string(),
            },
            &self.ctx,
        )
        .await?;
        Ok(reply.message)
    }

    pub fn events(&self) -> Vec<Occurrence> {
        self.ctx.state().events.clone()
    }

    pub fn base_events(&self) -> Vec<CalendarEvent> {
        self.ctx.state().base_events.clone()
    }

    pub fn base_event(&self, event_id: &ID) -> Option<CalendarEvent> {
        self.ctx
            .state()
            .base_events
            .iter()
            .find(|e| e.id == *event_id)
            .cloned()
    }

    pub fn occurrences_of(&self, event_id: &ID) -> Vec<Occurrence> {
        self.ctx
            .state()
            .events
            .iter()
            .filter(|o| o.base_id == *event_id)
            .cloned()
            .collect()
    }

    /// Draft editing the series the occurrence belongs to
    pub fn edit_draft(&self, occurrence: &Occurrence) -> Option<EventDraft> {
        let base = self.base_event(&occurrence.base_id)?;
        Some(EventDraft::edit_occurrence(
            occurrence,
            &base,
            &self.normalizer(),
        ))
    }

    /// Occurrences overlapping `[from, to)`, sorted by start
    pub fn agenda(&self, from: &DateTime<Utc>, to: &DateTime<Utc>) -> Vec<Occurrence> {
        self.ctx
            .state()
            .events
            .iter()
            .filter(|o| o.overlaps(from, to))
            .cloned()
            .sorted_by_key(|o| (o.start, o.occurrence_id.clone()))
            .collect()
    }

    pub fn calendars(&self) -> Vec<Calendar> {
        self.ctx.state().calendars.clone()
    }

    pub fn shared_calendars(&self) -> Vec<Calendar> {
        self.ctx.state().shared_calendars.clone()
    }

    pub fn invitations(&self) -> Vec<Invitation> {
        self.ctx.state().invitations.clone()
    }

    pub fn pending_invitations(&self) -> Vec<Invitation> {
        self.ctx
            .state()
            .invitations
            .iter()
            .filter(|i| i.is_pending())
            .cloned()
            .collect()
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.ctx.state().transcript.messages().to_vec()
    }
}
