use crate::dtos::CalendarDTO;
use serde::{Deserialize, Serialize};
use timemesh_domain::{Calendar, ID};

#[derive(Deserialize, Serialize, Debug)]
pub struct CalendarResponse {
    pub calendar: CalendarDTO,
}

impl CalendarResponse {
    pub fn new(calendar: Calendar) -> Self {
        Self {
            calendar: CalendarDTO::new(calendar),
        }
    }
}

pub mod get_calendars {
    use super::*;

    pub type APIResponse = Vec<CalendarDTO>;
}

pub mod get_shared_calendars {
    use super::*;

    pub type APIResponse = Vec<CalendarDTO>;
}

pub mod create_calendar {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    pub struct RequestBody {
        pub title: String,
        pub description: String,
    }

    pub type APIResponse = CalendarResponse;
}

pub mod update_calendar {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub cal_id: ID,
    }

    pub type RequestBody = super::create_calendar::RequestBody;

    pub type APIResponse = CalendarResponse;
}

pub mod delete_calendar {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub cal_id: ID,
    }

    /// Error the backend answers with when asked to delete the only calendar
    /// of a user
    pub const LAST_CALENDAR_ERROR: &str = "Cannot delete the last calendar";
}

pub mod import_calendar {
    /// Name of the multipart part carrying the ics file
    pub const FILE_PART: &str = "file";
}

pub mod export_calendar {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    pub struct RequestBody {
        pub cal_ids: Vec<ID>,
    }
}
