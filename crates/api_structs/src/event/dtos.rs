use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use timemesh_domain::{
    date::to_storage_string, CalendarEvent, Color, EventDefinition, Recurrence, RecurrenceRule,
    TimeNormalizer, WeekdaySet, ID,
};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CalendarEventDTO {
    pub id: ID,
    pub cal_id: ID,
    #[serde(default)]
    pub user: Option<ID>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub bg_color: Color,
    #[serde(default)]
    pub repeat_type: Recurrence,
    #[serde(default)]
    pub repeat_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub repeat_days: WeekdaySet,
    /// Future recurrences after `start`, computed by the backend
    #[serde(default)]
    pub occurrences: Vec<DateTime<Utc>>,
}

impl CalendarEventDTO {
    pub fn new(event: CalendarEvent) -> Self {
        Self {
            id: event.id,
            cal_id: event.calendar_id,
            user: event.user_id,
            start: event.start(),
            end: event.end(),
            repeat_type: event.recurrence(),
            repeat_until: event.recurrence_end(),
            repeat_days: event.active_weekdays(),
            occurrences: event.occurrence_dates().to_vec(),
            title: event.title,
            description: event.description,
            bg_color: event.color,
        }
    }

    /// Weekly rules are anchored on the weekday of `start` in the timezone of
    /// `normalizer`. A stale recurrence end lying before `start` is dropped.
    pub fn into_domain(self, normalizer: &TimeNormalizer) -> CalendarEvent {
        let mut event = CalendarEvent::new(self.id, self.cal_id, self.title, self.start, self.end);
        event.user_id = self.user;
        event.description = self.description;
        event.color = self.bg_color;

        let rule = RecurrenceRule::new(self.repeat_type, self.repeat_until, self.repeat_days);
        if !event.set_recurrence(rule.clone(), normalizer) {
            event.set_recurrence(RecurrenceRule { until: None, ..rule }, normalizer);
        }
        event.set_occurrence_dates(self.occurrences);
        event
    }
}

/// Event fields as sent to the backend. Instants use the storage form.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EventBodyDTO {
    pub cal_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start: String,
    pub end: String,
    pub bg_color: Color,
    pub repeat_type: Recurrence,
    pub repeat_until: Option<String>,
    pub repeat_days: WeekdaySet,
}

impl EventBodyDTO {
    pub fn new(definition: &EventDefinition) -> Self {
        Self {
            cal_id: definition.calendar_id,
            title: definition.title.clone(),
            description: definition.description.clone(),
            start: to_storage_string(&definition.start),
            end: to_storage_string(&definition.end),
            bg_color: definition.color,
            repeat_type: definition.rule.recurrence,
            repeat_until: definition.rule.until.as_ref().map(to_storage_string),
            repeat_days: definition.rule.weekdays,
        }
    }

    /// `None` if one of the instants is not RFC 3339
    pub fn into_domain(self) -> Option<EventDefinition> {
        let until = match self.repeat_until {
            Some(until) => Some(parse_instant(&until)?),
            None => None,
        };
        Some(EventDefinition {
            calendar_id: self.cal_id,
            title: self.title,
            description: self.description,
            color: self.bg_color,
            start: parse_instant(&self.start)?,
            end: parse_instant(&self.end)?,
            rule: RecurrenceRule::new(self.repeat_type, until, self.repeat_days),
        })
    }
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}
