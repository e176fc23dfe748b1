use super::subscribers::PublishOnCalendarSaved;
use crate::{
    context::CacheContext,
    error::CacheError,
    shared::usecase::{Subscriber, UseCase},
};
use timemesh_domain::{Calendar, CalendarInput, ID};

#[derive(Debug)]
pub struct UpdateCalendarUseCase {
    pub calendar_id: ID,
    pub input: CalendarInput,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateCalendarUseCase {
    type Response = Calendar;

    type Errors = CacheError;

    async fn execute(&mut self, ctx: &CacheContext) -> Result<Self::Response, Self::Errors> {
        let input = self
            .input
            .validated()
            .ok_or_else(|| CacheError::Validation("The calendar needs a title".into()))?;

        let calendar = ctx
            .infra
            .gateway
            .update_calendar(&self.calendar_id, &input)
            .await?;

        ctx.state().upsert_calendar(calendar.clone());
        Ok(calendar)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(PublishOnCalendarSaved)]
    }
}
