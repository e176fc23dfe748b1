use chrono::{DateTime, Utc, Weekday};
use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// How a `CalendarEvent` repeats. The backend calls this `repeat_type`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recurrence {
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Default for Recurrence {
    fn default() -> Self {
        Self::None
    }
}

impl Recurrence {
    pub fn is_recurring(&self) -> bool {
        *self != Self::None
    }

    /// The RFC 5545 `FREQ` value, `None` for non recurring events
    pub fn rrule_frequency(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Daily => Some("DAILY"),
            Self::Weekly => Some("WEEKLY"),
            Self::Monthly => Some("MONTHLY"),
            Self::Yearly => Some("YEARLY"),
        }
    }
}

/// The `{recurrence, recurrence end, active weekdays}` triple describing how a
/// `CalendarEvent` repeats.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecurrenceRule {
    pub recurrence: Recurrence,
    pub until: Option<DateTime<Utc>>,
    pub weekdays: WeekdaySet,
}

impl RecurrenceRule {
    pub fn none() -> Self {
        Default::default()
    }

    pub fn new(recurrence: Recurrence, until: Option<DateTime<Utc>>, weekdays: WeekdaySet) -> Self {
        Self {
            recurrence,
            until,
            weekdays,
        }
    }

    pub fn is_valid(&self, start: &DateTime<Utc>) -> bool {
        match self.until {
            Some(until) if self.recurrence.is_recurring() => until >= *start,
            _ => true,
        }
    }

    /// Drops the parts of the rule that have no meaning for its frequency.
    /// A weekly rule always contains `anchor_day`.
    pub(crate) fn normalized(mut self, anchor_day: Weekday) -> Self {
        match self.recurrence {
            Recurrence::None => {
                self.until = None;
                self.weekdays.clear();
            }
            Recurrence::Weekly => {
                self.weekdays.insert(anchor_day);
            }
            _ => self.weekdays.clear(),
        }
        self
    }
}

/// Set of weekdays a weekly `CalendarEvent` is active on.
///
/// Stored as a bitmask with monday as bit 0 so that iteration order is always
/// monday to sunday, independent of insertion order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn single(day: Weekday) -> Self {
        let mut set = Self::new();
        set.insert(day);
        set
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    /// Returns `true` if the day was not already present
    pub fn insert(&mut self, day: Weekday) -> bool {
        let present = self.contains(day);
        self.0 |= Self::bit(day);
        !present
    }

    pub fn remove(&mut self, day: Weekday) -> bool {
        let present = self.contains(day);
        self.0 &= !Self::bit(day);
        present
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_WEEKDAYS
            .iter()
            .copied()
            .filter(move |day| self.contains(*day))
    }

    /// Comma separated RFC 5545 `BYDAY` value, e.g. `MO,WE`
    pub fn to_byday(&self) -> String {
        self.iter()
            .map(weekday_to_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn str_to_weekday(d: &str) -> Result<Weekday, InvalidWeekDayError> {
    match d.to_uppercase().as_str() {
        "MO" => Ok(Weekday::Mon),
        "TU" => Ok(Weekday::Tue),
        "WE" => Ok(Weekday::Wed),
        "TH" => Ok(Weekday::Thu),
        "FR" => Ok(Weekday::Fri),
        "SA" => Ok(Weekday::Sat),
        "SU" => Ok(Weekday::Sun),
        _ => Err(InvalidWeekDayError::InvalidWeekdayIdentifier(d.to_string())),
    }
}

fn weekday_to_str(wday: Weekday) -> &'static str {
    match wday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

#[derive(Error, Debug)]
pub enum InvalidWeekDayError {
    #[error("Invalid weekday specified: {0}")]
    InvalidWeekdayIdentifier(String),
}

impl FromStr for WeekdaySet {
    type Err = InvalidWeekDayError;

    fn from_str(days: &str) -> Result<Self, Self::Err> {
        days.split(',')
            .map(str::trim)
            .filter(|day| !day.is_empty())
            .map(str_to_weekday)
            .collect()
    }
}

impl Display for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_byday())
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter().map(weekday_to_str))
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct WeekdaySetVisitor;

        impl<'de> Visitor<'de> for WeekdaySetVisitor {
            type Value = WeekdaySet;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A list of weekdays like [\"MO\", \"WE\"] or \"MO,WE\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<WeekdaySet, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<WeekdaySet>()
                    .map_err(|_| E::custom(format!("Malformed weekdays: {}", value)))
            }

            fn visit_unit<E>(self) -> Result<WeekdaySet, E>
            where
                E: serde::de::Error,
            {
                Ok(WeekdaySet::new())
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<WeekdaySet, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut set = WeekdaySet::new();
                while let Some(day) = seq.next_element::<String>()? {
                    let day = str_to_weekday(&day).map_err(serde::de::Error::custom)?;
                    set.insert(day);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_any(WeekdaySetVisitor)
    }
}
