use crate::{
    context::CacheContext,
    error::CacheError,
    load::reload_after_mutation,
    shared::usecase::UseCase,
    state::CacheChange,
};
use timemesh_domain::{Collection, CollectionSet, InvitationAction};

/// Answers an invitation. An accepted invitation can surface events of a
/// calendar the cache has never seen, so events and shared calendars are
/// refreshed afterwards. When only the refresh fails the invitation stays
/// answered and the error is returned.
#[derive(Debug)]
pub struct RespondInvitationUseCase {
    pub token: String,
    pub action: InvitationAction,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RespondInvitationUseCase {
    type Response = InvitationAction;

    type Errors = CacheError;

    async fn execute(&mut self, ctx: &CacheContext) -> Result<Self::Response, Self::Errors> {
        if self.token.trim().is_empty() {
            return Err(CacheError::Validation("The invitation token is missing".into()));
        }
        ctx.infra
            .gateway
            .respond_to_invitation(&self.token, self.action)
            .await?;

        ctx.state().remove_invitation(&self.token);
        ctx.publish(CacheChange::InvitationsChanged);

        let touched = CollectionSet::empty()
            .with(Collection::Events)
            .with(Collection::SharedCalendars);
        reload_after_mutation(touched, ctx).await?;
        Ok(self.action)
    }
}
