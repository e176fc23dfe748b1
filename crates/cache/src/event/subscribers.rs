use super::{CreateEventUseCase, DeleteEventUseCase, UpdateEventUseCase};
use crate::{context::CacheContext, shared::usecase::Subscriber, state::CacheChange};
use timemesh_domain::{Occurrence, ID};

pub struct PublishOnEventSaved;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateEventUseCase> for PublishOnEventSaved {
    async fn notify(&self, e: &Occurrence, ctx: &CacheContext) {
        ctx.publish(CacheChange::EventsChanged { base_id: e.base_id });
    }
}

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateEventUseCase> for PublishOnEventSaved {
    async fn notify(&self, e: &Occurrence, ctx: &CacheContext) {
        ctx.publish(CacheChange::EventsChanged { base_id: e.base_id });
    }
}

pub struct PublishOnEventRemoved;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteEventUseCase> for PublishOnEventRemoved {
    async fn notify(&self, base_id: &ID, ctx: &CacheContext) {
        ctx.publish(CacheChange::EventRemoved { base_id: *base_id });
    }
}
