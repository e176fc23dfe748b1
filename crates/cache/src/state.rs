use timemesh_domain::{
    expand_all, Calendar, CalendarEvent, CollectionSet, Invitation, Occurrence,
    Transcript, ID,
};
use tracing::debug;

/// Published after every successful mutation of the cache
#[derive(Debug, Clone, PartialEq)]
pub enum CacheChange {
    EventsChanged { base_id: ID },
    EventRemoved { base_id: ID },
    CalendarsChanged,
    CalendarRemoved { id: ID },
    InvitationsChanged,
    Reloaded(CollectionSet),
    /// A mutation was applied but refreshing the collections it touched
    /// failed, so they are stale until the next successful load
    ReloadFailed(CollectionSet),
}

/// The local collections. `events` is always the expansion of
/// `base_events`.
#[derive(Debug, Clone)]
pub struct CacheState {
    pub base_events: Vec<CalendarEvent>,
    pub events: Vec<Occurrence>,
    pub calendars: Vec<Calendar>,
    pub shared_calendars: Vec<Calendar>,
    pub invitations: Vec<Invitation>,
    pub transcript: Transcript,
}

impl CacheState {
    pub fn new(transcript_char_limit: usize) -> Self {
        Self {
            base_events: Vec::new(),
            events: Vec::new(),
            calendars: Vec::new(),
            shared_calendars: Vec::new(),
            invitations: Vec::new(),
            transcript: Transcript::new(transcript_char_limit),
        }
    }

    pub fn replace_events(&mut self, events: Vec<CalendarEvent>) {
        self.events = expand_all(&events);
        self.base_events = events;
    }

    /// Inserts or replaces a base event together with every occurrence derived
    /// from it. Returns the anchor occurrence.
    pub fn upsert_event(&mut self, event: CalendarEvent) -> Occurrence {
        self.remove_event(&event.id);
        let occurrences = event.expand();
        debug!(
            "Merging event {} with {} occurrences",
            event.id,
            occurrences.len()
        );
        let anchor = Occurrence::anchor(&event);
        self.events.extend(occurrences);
        self.base_events.push(event);
        anchor
    }

    /// Removes the base event and all of its occurrences. Returns the number
    /// of removed occurrences.
    pub fn remove_event(&mut self, base_id: &ID) -> usize {
        let before = self.events.len();
        self.base_events.retain(|e| e.id != *base_id);
        self.events.retain(|o| o.base_id != *base_id);
        before - self.events.len()
    }

    pub fn upsert_calendar(&mut self, calendar: Calendar) {
        match self.calendars.iter_mut().find(|c| c.id == calendar.id) {
            Some(existing) => *existing = calendar,
            None => self.calendars.push(calendar),
        }
    }

    /// Removes the calendar and every event in it
    pub fn remove_calendar(&mut self, calendar_id: &ID) {
        self.calendars.retain(|c| c.id != *calendar_id);
        self.shared_calendars.retain(|c| c.id != *calendar_id);
        self.base_events.retain(|e| e.calendar_id != *calendar_id);
        self.events.retain(|o| o.calendar_id != *calendar_id);
    }

    pub fn remove_invitation(&mut self, token: &str) -> Option<Invitation> {
        let index = self.invitations.iter().position(|i| i.token == token)?;
        Some(self.invitations.remove(index))
    }
}
