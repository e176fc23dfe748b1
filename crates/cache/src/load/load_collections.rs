use crate::{
    context::CacheContext,
    error::CacheError,
    shared::usecase::{execute, Subscriber, UseCase},
    state::CacheChange,
};
use futures::try_join;
use timemesh_domain::{Collection, CollectionSet};
use tracing::debug;

/// Fetches the given collections concurrently and replaces them locally.
/// Nothing is replaced unless every fetch succeeds.
#[derive(Debug)]
pub struct LoadCollectionsUseCase {
    pub collections: CollectionSet,
}

impl LoadCollectionsUseCase {
    pub fn all() -> Self {
        Self {
            collections: CollectionSet::all(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for LoadCollectionsUseCase {
    type Response = CollectionSet;

    type Errors = CacheError;

    async fn execute(&mut self, ctx: &CacheContext) -> Result<Self::Response, Self::Errors> {
        let gateway = &ctx.infra.gateway;
        let wanted = self.collections;

        let events = async {
            if wanted.contains(Collection::Events) {
                gateway.get_events().await.map(Some)
            } else {
                Ok(None)
            }
        };
        let calendars = async {
            if wanted.contains(Collection::Calendars) {
                gateway.get_calendars().await.map(Some)
            } else {
                Ok(None)
            }
        };
        let shared_calendars = async {
            if wanted.contains(Collection::SharedCalendars) {
                gateway.get_shared_calendars().await.map(Some)
            } else {
                Ok(None)
            }
        };
        let invitations = async {
            if wanted.contains(Collection::Invitations) {
                gateway.get_invitations().await.map(Some)
            } else {
                Ok(None)
            }
        };
        let (events, calendars, shared_calendars, invitations) =
            try_join!(events, calendars, shared_calendars, invitations)?;

        let mut state = ctx.state();
        if let Some(events) = events {
            debug!("Loaded {} events", events.len());
            state.replace_events(events);
        }
        if let Some(calendars) = calendars {
            state.calendars = calendars;
        }
        if let Some(shared_calendars) = shared_calendars {
            state.shared_calendars = shared_calendars;
        }
        if let Some(invitations) = invitations {
            state.invitations = invitations;
        }
        Ok(wanted)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(PublishOnReloaded)]
    }
}

/// Refreshes the collections the backend changed as a consequence of a
/// mutation that is already applied locally. A failure is published as
/// `ReloadFailed` and returned as `CacheError::Remote`.
pub async fn reload_after_mutation(
    collections: CollectionSet,
    ctx: &CacheContext,
) -> Result<(), CacheError> {
    match execute(LoadCollectionsUseCase { collections }, ctx).await {
        Ok(_) => Ok(()),
        Err(e) => {
            ctx.publish(CacheChange::ReloadFailed(collections));
            Err(CacheError::Remote(format!(
                "The change was saved but the cache could not be refreshed: {}",
                e
            )))
        }
    }
}

pub struct PublishOnReloaded;

#[async_trait::async_trait(?Send)]
impl Subscriber<LoadCollectionsUseCase> for PublishOnReloaded {
    async fn notify(&self, collections: &CollectionSet, ctx: &CacheContext) {
        ctx.publish(CacheChange::Reloaded(*collections));
    }
}
