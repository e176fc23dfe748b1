use crate::{
    color::Color,
    date::TimeNormalizer,
    occurrence::Occurrence,
    shared::entity::{Entity, ID},
    shared::recurrence::{Recurrence, RecurrenceRule, WeekdaySet},
};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

/// The canonical, persisted definition of an event. A recurring event is
/// stored once together with the occurrence dates the backend materialized
/// for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: ID,
    pub calendar_id: ID,
    pub user_id: Option<ID>,
    pub title: String,
    pub description: Option<String>,
    pub color: Color,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    rule: RecurrenceRule,
    occurrence_dates: Vec<DateTime<Utc>>,
}

impl Entity for CalendarEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl CalendarEvent {
    /// Creates a non recurring event
    pub fn new(
        id: ID,
        calendar_id: ID,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            calendar_id,
            user_id: None,
            title: title.into(),
            description: None,
            color: Default::default(),
            start,
            end,
            rule: RecurrenceRule::none(),
            occurrence_dates: Vec::new(),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Can be negative for malformed events where `end < start`
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn recurrence(&self) -> Recurrence {
        self.rule.recurrence
    }

    pub fn recurrence_end(&self) -> Option<DateTime<Utc>> {
        self.rule.until
    }

    pub fn active_weekdays(&self) -> WeekdaySet {
        self.rule.weekdays
    }

    pub fn rule(&self) -> &RecurrenceRule {
        &self.rule
    }

    pub fn occurrence_dates(&self) -> &[DateTime<Utc>] {
        &self.occurrence_dates
    }

    /// Moves the event. A weekly rule is re-anchored so that it keeps
    /// containing the weekday of the new start.
    pub fn reschedule(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        normalizer: &TimeNormalizer,
    ) {
        self.start = start;
        self.end = end;
        self.rule = self.rule.clone().normalized(normalizer.weekday_of(&start));
    }

    /// Returns `false` and leaves the event untouched if the rule ends before
    /// the event starts.
    pub fn set_recurrence(&mut self, rule: RecurrenceRule, normalizer: &TimeNormalizer) -> bool {
        if !rule.is_valid(&self.start) {
            return false;
        }
        self.rule = rule.normalized(normalizer.weekday_of(&self.start));
        if !self.rule.recurrence.is_recurring() {
            self.occurrence_dates.clear();
        }
        true
    }

    /// Occurrence dates are only kept for recurring events. A date listed
    /// more than once is kept at its first position only, each date gives
    /// exactly one occurrence id.
    pub fn set_occurrence_dates(&mut self, mut dates: Vec<DateTime<Utc>>) {
        if self.rule.recurrence.is_recurring() {
            let mut seen = HashSet::with_capacity(dates.len());
            dates.retain(|date| seen.insert(*date));
            self.occurrence_dates = dates;
        } else {
            self.occurrence_dates.clear();
        }
    }

    /// Expands the event into renderable occurrences. The anchor occurrence
    /// always comes first, followed by one occurrence per materialized date in
    /// the order the backend supplied them.
    pub fn expand(&self) -> Vec<Occurrence> {
        let mut occurrences = Vec::with_capacity(1 + self.occurrence_dates.len());
        occurrences.push(Occurrence::anchor(self));

        if !self.rule.recurrence.is_recurring() || self.occurrence_dates.is_empty() {
            return occurrences;
        }

        // Stale data can have end < start, the negative duration is kept as is
        let duration = self.duration();
        occurrences.extend(
            self.occurrence_dates
                .iter()
                .map(|date| Occurrence::recurring_instance(self, *date, duration)),
        );

        occurrences
    }
}
