use chrono::{prelude::*, SecondsFormat};
use chrono_tz::{Tz, UTC};
use thiserror::Error;

/// Formats accepted from local datetime inputs, most specific first
const LOCAL_INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";
const LOCAL_INPUT_OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const LOCAL_INPUT_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DISPLAY_FORMAT: &str = "%a %d %b %Y %H:%M";

#[derive(Error, Debug, PartialEq)]
pub enum InvalidLocalDateTime {
    #[error("No datetime was provided")]
    Empty,
    #[error("`{0}` is not a valid datetime")]
    Malformed(String),
    #[error("`{0}` does not exist in timezone {1}")]
    NonExistent(String, Tz),
}

/// Converts between the wall-clock strings used by datetime inputs and the
/// absolute instants that are stored and transmitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeNormalizer {
    timezone: Tz,
}

impl TimeNormalizer {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Interprets `local` in the viewer's timezone.
    ///
    /// Strings that already carry an explicit offset are taken as-is. When a
    /// wall-clock time is ambiguous (the repeated hour when clocks fall back)
    /// the earliest instant is used, while times that are skipped when clocks
    /// spring forward are rejected.
    pub fn to_absolute(&self, local: &str) -> Result<DateTime<Utc>, InvalidLocalDateTime> {
        let local = local.trim();
        if local.is_empty() {
            return Err(InvalidLocalDateTime::Empty);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(local) {
            return Ok(dt.with_timezone(&Utc));
        }

        let naive = LOCAL_INPUT_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(local, format).ok())
            .ok_or_else(|| InvalidLocalDateTime::Malformed(local.to_string()))?;

        self.timezone
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| InvalidLocalDateTime::NonExistent(local.to_string(), self.timezone))
    }

    /// Like `to_absolute`, but a bare `YYYY-MM-DD` date means the last second
    /// of that day. Used for recurrence end dates.
    pub fn to_absolute_until(&self, local: &str) -> Result<DateTime<Utc>, InvalidLocalDateTime> {
        match NaiveDate::parse_from_str(local.trim(), DATE_ONLY_FORMAT) {
            Ok(date) => {
                let naive = date
                    .and_hms_opt(23, 59, 59)
                    .ok_or_else(|| InvalidLocalDateTime::Malformed(local.to_string()))?;
                self.timezone
                    .from_local_datetime(&naive)
                    .latest()
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok_or_else(|| {
                        InvalidLocalDateTime::NonExistent(local.to_string(), self.timezone)
                    })
            }
            Err(_) => self.to_absolute(local),
        }
    }

    /// Value suitable for re-populating a local datetime input, minute precision
    pub fn to_local_input_string(&self, instant: &DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.timezone)
            .format(LOCAL_INPUT_OUTPUT_FORMAT)
            .to_string()
    }

    /// Inverse of `to_absolute_until`. The last second of a day becomes a bare
    /// date and seconds are kept, so re-saving a form never moves the end.
    pub fn to_local_until_string(&self, instant: &DateTime<Utc>) -> String {
        let local = instant.with_timezone(&self.timezone);
        let format = if (local.hour(), local.minute(), local.second()) == (23, 59, 59) {
            DATE_ONLY_FORMAT
        } else if local.second() != 0 {
            LOCAL_INPUT_SECONDS_FORMAT
        } else {
            LOCAL_INPUT_OUTPUT_FORMAT
        };
        local.format(format).to_string()
    }

    pub fn format_for_display(&self, instant: &DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.timezone)
            .format(DISPLAY_FORMAT)
            .to_string()
    }

    pub fn weekday_of(&self, instant: &DateTime<Utc>) -> Weekday {
        instant.with_timezone(&self.timezone).weekday()
    }
}

impl Default for TimeNormalizer {
    fn default() -> Self {
        Self::new(UTC)
    }
}

/// The form an instant is transmitted in, e.g. `2024-03-04T09:00:00.000Z`
pub fn to_storage_string(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Zero duration events are allowed
pub fn is_end_after_start(start: &DateTime<Utc>, end: &DateTime<Utc>) -> bool {
    end >= start
}
