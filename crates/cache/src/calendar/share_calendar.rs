use crate::{context::CacheContext, error::CacheError, shared::usecase::UseCase};
use timemesh_domain::ID;

/// Invites another user to a calendar. The local collections only change
/// once the invitee accepts, on their side.
#[derive(Debug)]
pub struct ShareCalendarUseCase {
    pub calendar_id: ID,
    pub email: String,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ShareCalendarUseCase {
    type Response = ();

    type Errors = CacheError;

    async fn execute(&mut self, ctx: &CacheContext) -> Result<Self::Response, Self::Errors> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(CacheError::Validation(format!(
                "`{}` is not a valid email",
                self.email
            )));
        }

        Ok(ctx.infra.gateway.invite(&self.calendar_id, email).await?)
    }
}
