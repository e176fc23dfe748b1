mod assistant;
mod calendar;
mod event;
mod invitation;
mod shared;
mod user;

pub mod dtos {
    pub use crate::assistant::dtos::*;
    pub use crate::calendar::dtos::*;
    pub use crate::event::dtos::*;
    pub use crate::invitation::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::assistant::api::*;
pub use crate::calendar::api::*;
pub use crate::event::api::*;
pub use crate::invitation::api::*;
pub use crate::shared::{ErrorBody, MessageResponse};
pub use crate::user::api::*;
