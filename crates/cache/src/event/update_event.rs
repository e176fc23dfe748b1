use super::subscribers::PublishOnEventSaved;
use crate::{
    context::CacheContext,
    error::CacheError,
    shared::usecase::{Subscriber, UseCase},
};
use timemesh_domain::{EventDraft, Occurrence};

#[derive(Debug)]
pub struct UpdateEventUseCase {
    pub draft: EventDraft,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEventUseCase {
    type Response = Occurrence;

    type Errors = CacheError;

    async fn execute(&mut self, ctx: &CacheContext) -> Result<Self::Response, Self::Errors> {
        let (event_id, fields) = match &self.draft {
            EventDraft::Edit { id, fields } => (id, fields),
            EventDraft::New(_) => {
                return Err(CacheError::Validation(
                    "The event has not been created yet".into(),
                ))
            }
        };
        let definition = fields.validate(&ctx.normalizer())?;

        let event = ctx
            .infra
            .gateway
            .update_event(event_id, &definition)
            .await?;

        Ok(ctx.state().upsert_event(event))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(PublishOnEventSaved)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{shared::usecase::execute, test_helpers::setup};
    use timemesh_domain::{EventFields, Recurrence, ID};

    fn fields() -> EventFields {
        EventFields {
            calendar_id: ID::new(7),
            title: "Standup".into(),
            start: "2024-03-04T09:00".into(),
            end: "2024-03-04T09:15".into(),
            recurrence: Recurrence::Weekly,
            recurrence_end: Some("2024-03-25".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn replaces_every_occurrence_of_the_series() {
        let s = setup();
        let anchor = execute(
            super::super::CreateEventUseCase {
                draft: EventDraft::New(fields()),
            },
            &s.ctx,
        )
        .await
        .unwrap();
        assert_eq!(s.ctx.state().events.len(), 4);

        let mut single = fields();
        single.recurrence = Recurrence::None;
        single.title = "Kickoff".into();
        let updated = execute(
            UpdateEventUseCase {
                draft: EventDraft::Edit {
                    id: anchor.base_id,
                    fields: single,
                },
            },
            &s.ctx,
        )
        .await
        .unwrap();
        assert_eq!(updated.base_id, anchor.base_id);

        let state = s.ctx.state();
        assert_eq!(state.events, vec![updated]);
        assert_eq!(state.base_events.len(), 1);
        assert_eq!(state.base_events[0].title, "Kickoff");
    }

    #[tokio::test]
    async fn unknown_event_leaves_state_untouched() {
        let s = setup();
        let res = execute(
            UpdateEventUseCase {
                draft: EventDraft::Edit {
                    id: ID::new(999),
                    fields: fields(),
                },
            },
            &s.ctx,
        )
        .await;
        assert!(matches!(res, Err(CacheError::NotFound(_))));
        assert!(s.ctx.state().events.is_empty());
    }
}
