use super::{CreateCalendarUseCase, DeleteCalendarUseCase, UpdateCalendarUseCase};
use crate::{context::CacheContext, shared::usecase::Subscriber, state::CacheChange};
use timemesh_domain::{Calendar, ID};

pub struct PublishOnCalendarSaved;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateCalendarUseCase> for PublishOnCalendarSaved {
    async fn notify(&self, _: &Calendar, ctx: &CacheContext) {
        ctx.publish(CacheChange::CalendarsChanged);
    }
}

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateCalendarUseCase> for PublishOnCalendarSaved {
    async fn notify(&self, _: &Calendar, ctx: &CacheContext) {
        ctx.publish(CacheChange::CalendarsChanged);
    }
}

pub struct PublishOnCalendarRemoved;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteCalendarUseCase> for PublishOnCalendarRemoved {
    async fn notify(&self, id: &ID, ctx: &CacheContext) {
        ctx.publish(CacheChange::CalendarRemoved { id: *id });
    }
}
