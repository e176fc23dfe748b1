mod recurrence;
mod store;

use super::{AssistantReply, GatewayError, ISyncGateway};
use crate::{session::Session, system::ISys};
use chrono::{Duration, DurationRound};
use chrono_tz::Tz;
use recurrence::{occurrence_dates, to_rrule, ICS_UTC_FORMAT};
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc, Mutex,
};
use store::*;
use timemesh_api_structs::delete_calendar::LAST_CALENDAR_ERROR;
use timemesh_domain::{
    Calendar, CalendarEvent, CalendarInput, ChatMessage, ChatRole, Collection, CollectionSet,
    EventDefinition, Invitation, InvitationAction, InvitationStatus, InvitingUser,
    RecurrenceRule, TimeNormalizer, ID,
};
use timemesh_utils::create_invitation_token;
use tracing::debug;

/// Phrases that make the assistant generate events
const GENERATE_EVENT_KEYWORDS: [&str; 4] = [
    "generate events",
    "create schedule",
    "plan events",
    "generate more events",
];
const GENERATED_CALENDAR_TITLE: &str = "SMART";

/// A file received by the import endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Simulates the TimeMesh backend for tests and offline use. State is shared
/// between the gateways of every user, so that invitations sent by one user
/// can be answered by another.
pub struct InMemoryBackend {
    users: Mutex<Vec<InvitingUser>>,
    calendars: Mutex<Vec<Calendar>>,
    events: Mutex<Vec<CalendarEvent>>,
    invitations: Mutex<Vec<Invitation>>,
    imported_files: Mutex<Vec<ImportedFile>>,
    /// Calls left to succeed and the error the next one fails with
    failure: Mutex<Option<(usize, GatewayError)>>,
    next_id: AtomicI64,
    sys: Arc<dyn ISys>,
}

impl InMemoryBackend {
    pub fn new(sys: Arc<dyn ISys>) -> Arc<Self> {
        Arc::new(Self {
            users: Mutex::new(Vec::new()),
            calendars: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
            invitations: Mutex::new(Vec::new()),
            imported_files: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            next_id: AtomicI64::new(1),
            sys,
        })
    }

    fn generate_id(&self) -> ID {
        ID::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Keeps generated ids clear of ids inserted explicitly
    fn reserve_id(&self, id: &ID) {
        self.next_id.fetch_max(id.as_i64() + 1, Ordering::SeqCst);
    }

    pub fn register_user(&self, email: &str, username: &str) -> InvitingUser {
        let user = InvitingUser {
            id: self.generate_id(),
            email: email.to_lowercase(),
            username: username.to_string(),
        };
        insert(&user, &self.users);
        user
    }

    /// Stores a calendar as is, keeping its id
    pub fn insert_calendar(&self, calendar: Calendar) {
        self.reserve_id(&calendar.id);
        insert(&calendar, &self.calendars);
    }

    /// Stores an event as is, keeping its id and occurrence dates
    pub fn insert_event(&self, event: CalendarEvent) {
        self.reserve_id(&event.id);
        insert(&event, &self.events);
    }

    /// Makes the next gateway call, from any user, fail with `error`
    pub fn fail_next(&self, error: GatewayError) {
        self.fail_after(0, error);
    }

    /// Lets `calls` gateway calls succeed and fails the one after with `error`
    pub fn fail_after(&self, calls: usize, error: GatewayError) {
        *self
            .failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some((calls, error));
    }

    fn take_failure(&self) -> Result<(), GatewayError> {
        let mut failure = self
            .failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match failure.take() {
            Some((0, error)) => Err(error),
            Some((calls, error)) => {
                *failure = Some((calls - 1, error));
                Ok(())
            }
            None => Ok(()),
        }
    }

    pub fn imported_files(&self) -> Vec<ImportedFile> {
        find_by(&self.imported_files, |_| true)
    }

    pub fn gateway(self: &Arc<Self>, session: &Session) -> InMemorySyncGateway {
        InMemorySyncGateway {
            backend: self.clone(),
            user_id: session.user_id,
            email: session.email.to_lowercase(),
            timezone: session.timezone,
        }
    }
}

/// `ISyncGateway` backed by an `InMemoryBackend`, acting as one user
pub struct InMemorySyncGateway {
    backend: Arc<InMemoryBackend>,
    user_id: ID,
    email: String,
    timezone: Tz,
}

fn not_found(message: &str) -> GatewayError {
    GatewayError::NotFound(message.to_string())
}

fn bad_request(message: &str) -> GatewayError {
    GatewayError::Rejected {
        status: 400,
        message: message.to_string(),
    }
}

impl InMemorySyncGateway {
    fn normalizer(&self) -> TimeNormalizer {
        TimeNormalizer::new(self.timezone)
    }

    fn can_view(&self, calendar: &Calendar) -> bool {
        calendar.is_owned_by(&self.user_id) || calendar.is_shared_with(&self.email)
    }

    fn visible_calendar(&self, calendar_id: &ID) -> Option<Calendar> {
        find(calendar_id, &self.backend.calendars).filter(|c| self.can_view(c))
    }

    fn owned_calendar(&self, calendar_id: &ID) -> Option<Calendar> {
        find(calendar_id, &self.backend.calendars).filter(|c| c.is_owned_by(&self.user_id))
    }

    fn me(&self) -> InvitingUser {
        find_by(&self.backend.users, |u| u.id == self.user_id)
            .into_iter()
            .next()
            .unwrap_or_else(|| InvitingUser {
                id: self.user_id,
                email: self.email.clone(),
                username: self.email.clone(),
            })
    }

    /// Builds the canonical event the way the backend stores it
    fn materialize(&self, id: ID, definition: &EventDefinition) -> CalendarEvent {
        let normalizer = self.normalizer();
        let mut event = CalendarEvent::new(
            id,
            definition.calendar_id,
            definition.title.clone(),
            definition.start,
            definition.end,
        );
        event.user_id = Some(self.user_id);
        event.description = definition.description.clone();
        event.color = definition.color;
        if !event.set_recurrence(definition.rule.clone(), &normalizer) {
            event.set_recurrence(
                RecurrenceRule {
                    until: None,
                    ..definition.rule.clone()
                },
                &normalizer,
            );
        }
        let dates = occurrence_dates(&event.start(), event.rule(), self.timezone);
        event.set_occurrence_dates(dates);
        event
    }

    fn generate_events(&self) -> CalendarEvent {
        let calendar = Calendar::new(
            self.backend.generate_id(),
            self.user_id,
            GENERATED_CALENDAR_TITLE,
        );
        insert(&calendar, &self.backend.calendars);

        let now = self.backend.sys.now();
        let start = now
            .duration_trunc(Duration::hours(1))
            .unwrap_or(now)
            + Duration::days(1);
        let definition = EventDefinition {
            calendar_id: calendar.id,
            title: "Focus time".into(),
            description: None,
            color: Default::default(),
            start,
            end: start + Duration::hours(1),
            rule: RecurrenceRule::none(),
        };
        let event = self.materialize(self.backend.generate_id(), &definition);
        insert(&event, &self.backend.events);
        event
    }

    fn to_ics(&self, calendars: &[Calendar]) -> String {
        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            "PRODID:-//TimeMesh//EN".to_string(),
        ];
        let events = find_by(&self.backend.events, |e| {
            calendars.iter().any(|c| c.id == e.calendar_id)
        });
        for event in events {
            lines.push("BEGIN:VEVENT".into());
            lines.push(format!("UID:{}@timemesh", event.id));
            lines.push(format!("SUMMARY:{}", event.title));
            lines.push(format!("DTSTART:{}", event.start().format(ICS_UTC_FORMAT)));
            lines.push(format!("DTEND:{}", event.end().format(ICS_UTC_FORMAT)));
            if let Some(rrule) = to_rrule(event.rule()) {
                lines.push(format!("RRULE:{}", rrule));
            }
            lines.push("END:VEVENT".into());
        }
        lines.push("END:VCALENDAR".into());
        lines.join("\r\n") + "\r\n"
    }
}

#[async_trait::async_trait]
impl ISyncGateway for InMemorySyncGateway {
    async fn get_events(&self) -> Result<Vec<CalendarEvent>, GatewayError> {
        self.backend.take_failure()?;
        let calendars = find_by(&self.backend.calendars, |c| self.can_view(c));
        Ok(find_by(&self.backend.events, |e| {
            calendars.iter().any(|c| c.id == e.calendar_id)
        }))
    }

    async fn get_calendars(&self) -> Result<Vec<Calendar>, GatewayError> {
        self.backend.take_failure()?;
        Ok(find_by(&self.backend.calendars, |c| {
            c.is_owned_by(&self.user_id)
        }))
    }

    async fn get_shared_calendars(&self) -> Result<Vec<Calendar>, GatewayError> {
        self.backend.take_failure()?;
        Ok(find_by(&self.backend.calendars, |c| {
            !c.is_owned_by(&self.user_id) && c.is_shared_with(&self.email)
        }))
    }

    async fn get_invitations(&self) -> Result<Vec<Invitation>, GatewayError> {
        self.backend.take_failure()?;
        let invitations = find_by(&self.backend.invitations, |i| {
            i.email.eq_ignore_ascii_case(&self.email)
        });
        // The embedded calendar reflects its current state
        Ok(invitations
            .into_iter()
            .map(|mut invitation| {
                if let Some(calendar) = find(&invitation.calendar.id, &self.backend.calendars) {
                    invitation.calendar = calendar;
                }
                invitation
            })
            .collect())
    }

    async fn create_event(&self, event: &EventDefinition) -> Result<CalendarEvent, GatewayError> {
        self.backend.take_failure()?;
        self.visible_calendar(&event.calendar_id)
            .ok_or_else(|| not_found("Calendar not found"))?;

        let event = self.materialize(self.backend.generate_id(), event);
        insert(&event, &self.backend.events);
        debug!("Created event {} in calendar {}", event.id, event.calendar_id);
        Ok(event)
    }

    async fn update_event(
        &self,
        event_id: &ID,
        event: &EventDefinition,
    ) -> Result<CalendarEvent, GatewayError> {
        self.backend.take_failure()?;
        let existing = find(event_id, &self.backend.events)
            .filter(|e| self.visible_calendar(&e.calendar_id).is_some())
            .ok_or_else(|| not_found("Event not found"))?;
        self.visible_calendar(&event.calendar_id)
            .ok_or_else(|| not_found("Calendar not found"))?;

        let mut updated = self.materialize(existing.id, event);
        updated.user_id = existing.user_id;
        save(&updated, &self.backend.events);
        Ok(updated)
    }

    async fn delete_event(&self, event_id: &ID) -> Result<(), GatewayError> {
        self.backend.take_failure()?;
        find(event_id, &self.backend.events)
            .filter(|e| self.visible_calendar(&e.calendar_id).is_some())
            .ok_or_else(|| not_found("Event not found"))?;
        delete(event_id, &self.backend.events);
        Ok(())
    }

    async fn create_calendar(&self, calendar: &CalendarInput) -> Result<Calendar, GatewayError> {
        self.backend.take_failure()?;
        let input = calendar
            .validated()
            .ok_or_else(|| bad_request("title is required"))?;
        let mut created = Calendar::new(self.backend.generate_id(), self.user_id, input.title);
        created.description = input.description;
        insert(&created, &self.backend.calendars);
        Ok(created)
    }

    async fn update_calendar(
        &self,
        calendar_id: &ID,
        calendar: &CalendarInput,
    ) -> Result<Calendar, GatewayError> {
        self.backend.take_failure()?;
        let mut existing = self
            .owned_calendar(calendar_id)
            .ok_or_else(|| not_found("Calendar not found"))?;
        let input = calendar
            .validated()
            .ok_or_else(|| bad_request("title is required"))?;
        existing.title = input.title;
        existing.description = input.description;
        save(&existing, &self.backend.calendars);
        Ok(existing)
    }

    async fn delete_calendar(&self, calendar_id: &ID) -> Result<(), GatewayError> {
        self.backend.take_failure()?;
        self.owned_calendar(calendar_id)
            .ok_or_else(|| not_found("Calendar not found"))?;
        let owned = count_by(&self.backend.calendars, |c| c.is_owned_by(&self.user_id));
        if owned <= 1 {
            debug!("{}: {}", LAST_CALENDAR_ERROR, calendar_id);
            return Err(GatewayError::LastCalendar);
        }

        delete(calendar_id, &self.backend.calendars);
        find_and_delete_by(&self.backend.events, |e| e.calendar_id == *calendar_id);
        find_and_delete_by(&self.backend.invitations, |i| {
            i.calendar.id == *calendar_id
        });
        Ok(())
    }

    async fn import_calendar(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<(), GatewayError> {
        self.backend.take_failure()?;
        if content.is_empty() {
            return Err(bad_request("No file was uploaded"));
        }
        insert(
            &ImportedFile {
                file_name: file_name.to_string(),
                content,
            },
            &self.backend.imported_files,
        );
        Ok(())
    }

    async fn export_calendar(&self, calendar_ids: &[ID]) -> Result<Vec<u8>, GatewayError> {
        self.backend.take_failure()?;
        let calendars = calendar_ids
            .iter()
            .map(|id| {
                self.visible_calendar(id)
                    .ok_or_else(|| not_found("Calendar not found"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.to_ics(&calendars).into_bytes())
    }

    async fn invite(&self, calendar_id: &ID, email: &str) -> Result<(), GatewayError> {
        self.backend.take_failure()?;
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(bad_request("Email and calendar ID are required"));
        }
        let calendar = self
            .owned_calendar(calendar_id)
            .ok_or_else(|| not_found("Calendar not found"))?;
        let exists = count_by(&self.backend.invitations, |i| {
            i.calendar.id == calendar.id && i.email == email
        }) > 0;
        if exists {
            return Err(bad_request("Invitation already exists"));
        }

        let invitation = Invitation {
            id: self.backend.generate_id(),
            calendar,
            email,
            invited_by: self.me(),
            token: create_invitation_token(),
            status: InvitationStatus::Pending,
            created_at: self.backend.sys.now(),
        };
        insert(&invitation, &self.backend.invitations);
        Ok(())
    }

    async fn respond_to_invitation(
        &self,
        token: &str,
        action: InvitationAction,
    ) -> Result<(), GatewayError> {
        self.backend.take_failure()?;
        let mut invitation = find_by(&self.backend.invitations, |i| {
            i.token == token && i.email.eq_ignore_ascii_case(&self.email)
        })
        .into_iter()
        .next()
        .ok_or_else(|| not_found("Invitation not found"))?;

        invitation
            .respond(action)
            .map_err(|_| bad_request("Invitation has already been responded to"))?;
        if action == InvitationAction::Accept {
            let email = invitation.email.clone();
            update_many(
                &self.backend.calendars,
                |c| c.id == invitation.calendar.id,
                |c| {
                    c.share_with(&email);
                },
            );
        }
        save(&invitation, &self.backend.invitations);
        Ok(())
    }

    async fn send_assistant_message(
        &self,
        transcript: &[ChatMessage],
    ) -> Result<AssistantReply, GatewayError> {
        self.backend.take_failure()?;
        let last = transcript
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .ok_or_else(|| bad_request("No message to answer"))?;

        let content = last.content.to_lowercase();
        if GENERATE_EVENT_KEYWORDS.iter().any(|k| content.contains(k)) {
            self.generate_events();
            return Ok(AssistantReply {
                message: format!(
                    "Your events have been successfully generated please check the calendar named \"{}\"",
                    GENERATED_CALENDAR_TITLE
                ),
                update: CollectionSet::empty()
                    .with(Collection::Calendars)
                    .with(Collection::Events),
            });
        }

        Ok(AssistantReply {
            message: "I can help you plan your week. Ask me to generate events.".into(),
            update: CollectionSet::empty(),
        })
    }
}
