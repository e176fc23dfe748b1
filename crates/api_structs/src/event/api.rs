use crate::dtos::{CalendarEventDTO, EventBodyDTO};
use serde::{Deserialize, Serialize};
use timemesh_domain::ID;

pub mod get_events {
    use super::*;

    pub type APIResponse = Vec<CalendarEventDTO>;
}

pub mod create_event {
    use super::*;

    pub type RequestBody = EventBodyDTO;

    pub type APIResponse = CalendarEventDTO;
}

pub mod update_event {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type RequestBody = EventBodyDTO;

    pub type APIResponse = CalendarEventDTO;
}

pub mod delete_event {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }
}
