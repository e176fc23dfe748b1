use chrono_tz::{Tz, UTC};
use tracing::{info, warn};

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/api";
const DEFAULT_AGENDA_DAYS: i64 = 7;
const DEFAULT_TRANSCRIPT_LIMIT: usize = 15_000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Address of the TimeMesh REST api, including the `/api` prefix
    pub backend_url: String,
    /// Token used to authenticate every request. Obtaining one is done by the
    /// login flow of the web app.
    pub token: Option<String>,
    /// Timezone local datetime inputs are interpreted in
    pub timezone: Tz,
    /// Number of days shown by the agenda
    pub agenda_days: i64,
    /// Maximum number of characters of the assistant transcript sent to
    /// the backend. The oldest messages are dropped first.
    pub transcript_char_limit: usize,
}

impl Config {
    pub fn new() -> Self {
        let backend_url = match std::env::var("TIMEMESH_BACKEND_URL") {
            Ok(url) => url,
            Err(_) => {
                info!(
                    "Did not find TIMEMESH_BACKEND_URL environment variable. Falling back to: {}",
                    DEFAULT_BACKEND_URL
                );
                DEFAULT_BACKEND_URL.to_string()
            }
        };
        let token = std::env::var("TIMEMESH_TOKEN").ok();
        let timezone = match std::env::var("TIMEMESH_TIMEZONE") {
            Ok(timezone) => match timezone.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given TIMEMESH_TIMEZONE: {} is not a valid IANA timezone, falling back to UTC.",
                        timezone
                    );
                    UTC
                }
            },
            Err(_) => UTC,
        };

        Self {
            backend_url,
            token,
            timezone,
            agenda_days: parse_env("TIMEMESH_AGENDA_DAYS", DEFAULT_AGENDA_DAYS),
            transcript_char_limit: parse_env("TIMEMESH_TRANSCRIPT_LIMIT", DEFAULT_TRANSCRIPT_LIMIT),
        }
    }
}

fn parse_env<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            token: None,
            timezone: UTC,
            agenda_days: DEFAULT_AGENDA_DAYS,
            transcript_char_limit: DEFAULT_TRANSCRIPT_LIMIT,
        }
    }
}
