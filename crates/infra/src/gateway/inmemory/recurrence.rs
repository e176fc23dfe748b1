use chrono::{DateTime, Utc};
use chrono_tz::{Tz, UTC};
use rrule::RRuleSet;
use timemesh_domain::{Recurrence, RecurrenceRule};
use tracing::warn;

/// The backend never materializes more occurrences than this per event
pub const MAX_OCCURRENCES: u16 = 365;

const ICS_LOCAL_FORMAT: &str = "%Y%m%dT%H%M%S";
pub const ICS_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// The RFC 5545 `RRULE` value of a rule, `None` for non recurring rules
pub fn to_rrule(rule: &RecurrenceRule) -> Option<String> {
    let frequency = rule.recurrence.rrule_frequency()?;
    let mut parts = vec![format!("FREQ={}", frequency)];
    if rule.recurrence == Recurrence::Weekly && !rule.weekdays.is_empty() {
        parts.push(format!("BYDAY={}", rule.weekdays.to_byday()));
    }
    if let Some(until) = rule.until {
        parts.push(format!("UNTIL={}", until.format(ICS_UTC_FORMAT)));
    }
    Some(parts.join(";"))
}

fn dtstart(start: &DateTime<Utc>, timezone: Tz) -> String {
    if timezone == UTC {
        format!("DTSTART:{}", start.format(ICS_UTC_FORMAT))
    } else {
        format!(
            "DTSTART;TZID={}:{}",
            timezone.name(),
            start.with_timezone(&timezone).format(ICS_LOCAL_FORMAT)
        )
    }
}

/// Future recurrences strictly after `start`. The rule is evaluated on the
/// wall clock of `timezone` so that weekdays and DST shifts match what the
/// user sees.
pub fn occurrence_dates(
    start: &DateTime<Utc>,
    rule: &RecurrenceRule,
    timezone: Tz,
) -> Vec<DateTime<Utc>> {
    let rrule = match to_rrule(rule) {
        Some(rrule) => rrule,
        None => return Vec::new(),
    };
    let rrule_str = format!("{}\nRRULE:{}", dtstart(start, timezone), rrule);

    let rrule_set: RRuleSet = match rrule_str.parse() {
        Ok(set) => set,
        Err(e) => {
            warn!("Failed to parse RRULE `{}`: {}", rrule_str, e);
            return Vec::new();
        }
    };

    // DTSTART itself is part of the set, one extra date keeps the cap exact
    rrule_set
        .all(MAX_OCCURRENCES + 1)
        .dates
        .into_iter()
        .map(|date| date.with_timezone(&Utc))
        .filter(|date| date > start)
        .take(MAX_OCCURRENCES as usize)
        .collect()
}
