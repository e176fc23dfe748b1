mod create_event;
mod delete_event;
mod subscribers;
mod update_event;

pub use create_event::CreateEventUseCase;
pub use delete_event::DeleteEventUseCase;
pub use update_event::UpdateEventUseCase;
