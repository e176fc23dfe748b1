use super::subscribers::PublishOnCalendarRemoved;
use crate::{
    context::CacheContext,
    error::CacheError,
    shared::usecase::{Subscriber, UseCase},
};
use timemesh_domain::ID;

#[derive(Debug)]
pub struct DeleteCalendarUseCase {
    pub calendar_id: ID,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteCalendarUseCase {
    type Response = ID;

    type Errors = CacheError;

    async fn execute(&mut self, ctx: &CacheContext) -> Result<Self::Response, Self::Errors> {
        ctx.infra
            .gateway
            .delete_calendar(&self.calendar_id)
            .await?;

        ctx.state().remove_calendar(&self.calendar_id);
        Ok(self.calendar_id)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(PublishOnCalendarRemoved)]
    }
}
