use crate::{
    color::Color,
    date::to_storage_string,
    event::CalendarEvent,
    shared::entity::ID,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of an `Occurrence`. The anchor is identified by the id of its
/// base event, a derived instance by the base id and its start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OccurrenceId(String);

impl OccurrenceId {
    fn anchor(base_id: &ID) -> Self {
        Self(base_id.to_string())
    }

    fn instance(base_id: &ID, start: &DateTime<Utc>) -> Self {
        Self(format!("{}_{}", base_id, to_storage_string(start)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OccurrenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One renderable appearance of a `CalendarEvent`. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub occurrence_id: OccurrenceId,
    pub base_id: ID,
    pub calendar_id: ID,
    pub title: String,
    pub color: Color,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_recurring_instance: bool,
    pub origin_start: DateTime<Utc>,
    pub origin_end: DateTime<Utc>,
}

impl Occurrence {
    /// The occurrence sitting exactly on the base event's own schedule
    pub fn anchor(event: &CalendarEvent) -> Self {
        Self {
            occurrence_id: OccurrenceId::anchor(&event.id),
            base_id: event.id,
            calendar_id: event.calendar_id,
            title: event.title.clone(),
            color: event.color,
            start: event.start(),
            end: event.end(),
            is_recurring_instance: false,
            origin_start: event.start(),
            origin_end: event.end(),
        }
    }

    pub(crate) fn recurring_instance(
        event: &CalendarEvent,
        start: DateTime<Utc>,
        duration: Duration,
    ) -> Self {
        Self {
            occurrence_id: OccurrenceId::instance(&event.id, &start),
            start,
            end: start + duration,
            is_recurring_instance: true,
            ..Self::anchor(event)
        }
    }

    /// Whether the occurrence intersects the half open window `[from, to)`.
    /// Zero length occurrences count when they start inside the window.
    pub fn overlaps(&self, from: &DateTime<Utc>, to: &DateTime<Utc>) -> bool {
        let end = std::cmp::max(self.start, self.end);
        self.start < *to && (end > *from || self.start >= *from)
    }
}

/// Expands every event, keeping the input order of the events
pub fn expand_all<'a>(events: impl IntoIterator<Item = &'a CalendarEvent>) -> Vec<Occurrence> {
    events.into_iter().flat_map(CalendarEvent::expand).collect()
}
