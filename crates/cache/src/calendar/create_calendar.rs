use super::subscribers::PublishOnCalendarSaved;
use crate::{
    context::CacheContext,
    error::CacheError,
    shared::usecase::{Subscriber, UseCase},
};
use timemesh_domain::{Calendar, CalendarInput};

#[derive(Debug)]
pub struct CreateCalendarUseCase {
    pub input: CalendarInput,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateCalendarUseCase {
    type Response = Calendar;

    type Errors = CacheError;

    async fn execute(&mut self, ctx: &CacheContext) -> Result<Self::Response, Self::Errors> {
        let input = self
            .input
            .validated()
            .ok_or_else(|| CacheError::Validation("The calendar needs a title".into()))?;

        let calendar = ctx.infra.gateway.create_calendar(&input).await?;

        ctx.state().upsert_calendar(calendar.clone());
        Ok(calendar)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(PublishOnCalendarSaved)]
    }
}
