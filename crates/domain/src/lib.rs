mod calendar;
mod chat;
mod collection;
mod color;
pub mod date;
mod draft;
mod event;
mod invitation;
mod occurrence;
mod shared;

pub use calendar::{Calendar, CalendarInput};
pub use chat::{ChatMessage, ChatRole, Transcript};
pub use collection::{Collection, CollectionSet, UnknownCollectionError, ALL_COLLECTIONS};
pub use color::{Color, InvalidColorError, PALETTE};
pub use date::{InvalidLocalDateTime, TimeNormalizer};
pub use draft::{DraftError, EventDefinition, EventDraft, EventFields};
pub use event::CalendarEvent;
pub use invitation::{
    InvalidInvitationAction, InvalidInvitationState, Invitation, InvitationAction,
    InvitationStatus, InvitingUser,
};
pub use occurrence::{expand_all, Occurrence, OccurrenceId};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::recurrence::{InvalidWeekDayError, Recurrence, RecurrenceRule, WeekdaySet};
