mod create_calendar;
mod delete_calendar;
mod export_calendar;
mod import_calendar;
mod share_calendar;
mod subscribers;
mod update_calendar;

pub use create_calendar::CreateCalendarUseCase;
pub use delete_calendar::DeleteCalendarUseCase;
pub use export_calendar::ExportCalendarUseCase;
pub use import_calendar::ImportCalendarUseCase;
pub use share_calendar::ShareCalendarUseCase;
pub use update_calendar::UpdateCalendarUseCase;
