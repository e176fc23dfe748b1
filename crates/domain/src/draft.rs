use crate::{
    color::Color,
    date::{is_end_after_start, InvalidLocalDateTime, TimeNormalizer},
    event::CalendarEvent,
    occurrence::Occurrence,
    shared::entity::ID,
    shared::recurrence::{Recurrence, RecurrenceRule, WeekdaySet},
};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Raw values of the event form. Times are wall-clock strings in the
/// viewer's timezone.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventFields {
    pub calendar_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start: String,
    pub end: String,
    pub color: Color,
    pub recurrence: Recurrence,
    pub recurrence_end: Option<String>,
    pub active_weekdays: WeekdaySet,
}

/// An event that is either about to be created or an edit of an existing one
#[derive(Debug, Clone, PartialEq)]
pub enum EventDraft {
    New(EventFields),
    Edit { id: ID, fields: EventFields },
}

/// A validated draft with absolute instants, ready to be sent to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct EventDefinition {
    pub calendar_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub color: Color,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub rule: RecurrenceRule,
}

#[derive(Error, Debug, PartialEq)]
pub enum DraftError {
    #[error("The {0} field is required")]
    MissingField(&'static str),
    #[error("Invalid {field}: {source}")]
    InvalidDateTime {
        field: &'static str,
        source: InvalidLocalDateTime,
    },
    #[error("The event can not end before it starts")]
    EndBeforeStart,
    #[error("The recurrence can not end before the event starts")]
    RecurrenceEndBeforeStart,
}

impl EventFields {
    /// Pre-fills the form with an existing event
    pub fn from_event(event: &CalendarEvent, normalizer: &TimeNormalizer) -> Self {
        Self {
            calendar_id: event.calendar_id,
            title: event.title.clone(),
            description: event.description.clone(),
            start: normalizer.to_local_input_string(&event.start()),
            end: normalizer.to_local_input_string(&event.end()),
            color: event.color,
            recurrence: event.recurrence(),
            recurrence_end: event
                .recurrence_end()
                .map(|until| normalizer.to_local_until_string(&until)),
            active_weekdays: event.active_weekdays(),
        }
    }

    pub fn validate(&self, normalizer: &TimeNormalizer) -> Result<EventDefinition, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::MissingField("title"));
        }
        let start = parse_required(normalizer, "start", &self.start)?;
        let end = parse_required(normalizer, "end", &self.end)?;
        if !is_end_after_start(&start, &end) {
            return Err(DraftError::EndBeforeStart);
        }

        let until = match self.recurrence_end.as_deref().map(str::trim) {
            Some(until) if !until.is_empty() && self.recurrence.is_recurring() => Some(
                normalizer
                    .to_absolute_until(until)
                    .map_err(|source| DraftError::InvalidDateTime {
                        field: "recurrence end",
                        source,
                    })?,
            ),
            _ => None,
        };
        let rule = RecurrenceRule::new(self.recurrence, until, self.active_weekdays);
        if !rule.is_valid(&start) {
            return Err(DraftError::RecurrenceEndBeforeStart);
        }

        Ok(EventDefinition {
            calendar_id: self.calendar_id,
            title: title.to_string(),
            description: self
                .description
                .as_ref()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            color: self.color,
            start,
            end,
            rule: rule.normalized(normalizer.weekday_of(&start)),
        })
    }
}

fn parse_required(
    normalizer: &TimeNormalizer,
    field: &'static str,
    value: &str,
) -> Result<DateTime<Utc>, DraftError> {
    normalizer.to_absolute(value).map_err(|source| match source {
        InvalidLocalDateTime::Empty => DraftError::MissingField(field),
        source => DraftError::InvalidDateTime { field, source },
    })
}

impl EventDraft {
    /// Opens the series an occurrence belongs to. The base event's own
    /// schedule is used even when a derived instance was clicked.
    pub fn edit_occurrence(
        occurrence: &Occurrence,
        base: &CalendarEvent,
        normalizer: &TimeNormalizer,
    ) -> Self {
        let mut fields = EventFields::from_event(base, normalizer);
        fields.start = normalizer.to_local_input_string(&occurrence.origin_start);
        fields.end = normalizer.to_local_input_string(&occurrence.origin_end);
        Self::Edit {
            id: occurrence.base_id,
            fields,
        }
    }

    pub fn id(&self) -> Option<ID> {
        match self {
            Self::New(_) => None,
            Self::Edit { id, .. } => Some(*id),
        }
    }

    pub fn fields(&self) -> &EventFields {
        match self {
            Self::New(fields) => fields,
            Self::Edit { fields, .. } => fields,
        }
    }
}
