use crate::{context::CacheContext, error::CacheError, shared::usecase::UseCase};
use timemesh_domain::ID;

#[derive(Debug)]
pub struct ExportCalendarUseCase {
    pub calendar_ids: Vec<ID>,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ExportCalendarUseCase {
    /// The ics file
    type Response = Vec<u8>;

    type Errors = CacheError;

    async fn execute(&mut self, ctx: &CacheContext) -> Result<Self::Response, Self::Errors> {
        if self.calendar_ids.is_empty() {
            return Err(CacheError::Validation(
                "Select at least one calendar to export".into(),
            ));
        }
        Ok(ctx
            .infra
            .gateway
            .export_calendar(&self.calendar_ids)
            .await?)
    }
}
