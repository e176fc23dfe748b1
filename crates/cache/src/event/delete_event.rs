use super::subscribers::PublishOnEventRemoved;
use crate::{
    context::CacheContext,
    error::CacheError,
    shared::usecase::{Subscriber, UseCase},
};
use timemesh_domain::ID;

#[derive(Debug)]
pub struct DeleteEventUseCase {
    pub event_id: ID,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteEventUseCase {
    /// Id of the removed base event
    type Response = ID;

    type Errors = CacheError;

    async fn execute(&mut self, ctx: &CacheContext) -> Result<Self::Response, Self::Errors> {
        ctx.infra.gateway.delete_event(&self.event_id).await?;

        ctx.state().remove_event(&self.event_id);
        Ok(self.event_id)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(PublishOnEventRemoved)]
    }
}
