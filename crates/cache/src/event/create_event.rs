use super::subscribers::PublishOnEventSaved;
use crate::{
    context::CacheContext,
    error::CacheError,
    shared::usecase::{Subscriber, UseCase},
};
use timemesh_domain::{EventDraft, Occurrence};

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub draft: EventDraft,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = Occurrence;

    type Errors = CacheError;

    async fn execute(&mut self, ctx: &CacheContext) -> Result<Self::Response, Self::Errors> {
        let fields = match &self.draft {
            EventDraft::New(fields) => fields,
            EventDraft::Edit { id, .. } => {
                return Err(CacheError::Validation(format!(
                    "The event with id: {} already exists, it can only be updated",
                    id
                )))
            }
        };
        let definition = fields.validate(&ctx.normalizer())?;

        let event = ctx.infra.gateway.create_event(&definition).await?;

        Ok(ctx.state().upsert_event(event))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(PublishOnEventSaved)]
    }
}
