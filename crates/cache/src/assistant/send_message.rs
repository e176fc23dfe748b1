use crate::{
    context::CacheContext, error::CacheError, load::reload_after_mutation,
    shared::usecase::UseCase,
};
use timemesh_domain::ChatMessage;
use timemesh_infra::AssistantReply;
use tracing::info;

/// Sends the transcript with a new user message to the assistant. The
/// transcript only changes once the assistant has answered, then the
/// collections the assistant changed on the backend are refreshed.
///
/// The transcript is read before the request and written back after it, so
/// of two messages in flight at the same time only the exchange answered
/// last is kept.
#[derive(Debug)]
pub struct SendAssistantMessageUseCase {
    pub content: String,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendAssistantMessageUseCase {
    type Response = AssistantReply;

    type Errors = CacheError;

    async fn execute(&mut self, ctx: &CacheContext) -> Result<Self::Response, Self::Errors> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(CacheError::Validation("The message is empty".into()));
        }

        let mut transcript = ctx.state().transcript.clone();
        transcript.push(ChatMessage::user(content));

        let reply = ctx
            .infra
            .gateway
            .send_assistant_message(transcript.messages())
            .await?;

        transcript.push(ChatMessage::assistant(reply.message.clone()));
        ctx.state().transcript = transcript;

        if !reply.update.is_empty() {
            info!("Assistant updated {:?}, reloading", reply.update);
            reload_after_mutation(reply.update, ctx).await?;
        }
        Ok(reply)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{shared::usecase::execute, state::CacheChange, test_helpers::setup};
    use timemesh_domain::{ChatRole, Collection};
    use timemesh_infra::GatewayError;

    #[tokio::test]
    async fn generated_events_are_loaded() {
        let s = setup();
        let reply = execute(
            SendAssistantMessageUseCase {
                content: "Generate events for next week".into(),
            },
            &s.ctx,
        )
        .await
        .unwrap();
        assert!(reply.message.contains("SMART"));

        let state = s.ctx.state();
        assert_eq!(state.events.len(), 1);
        assert!(state.calendars.iter().any(|c| c.title == "SMART"));
        let roles = state
            .transcript
            .messages()
            .iter()
            .map(|m| m.role)
            .collect::<Vec<_>>();
        assert_eq!(roles, vec![ChatRole::User, ChatRole::Assistant]);
    }

    #[tokio::test]
    async fn failure_leaves_transcript_unchanged() {
        let s = setup();
        s.backend.fail_next(GatewayError::Network("offline".into()));
        let res = execute(
            SendAssistantMessageUseCase {
                content: "hello".into(),
            },
            &s.ctx,
        )
        .await;
        assert!(matches!(res, Err(CacheError::Remote(_))));
        assert!(s.ctx.state().transcript.messages().is_empty());

        let reply = execute(
            SendAssistantMessageUseCase {
                content: "hello".into(),
            },
            &s.ctx,
        )
        .await
        .unwrap();
        assert!(reply.update.is_empty());
        assert_eq!(s.ctx.state().transcript.messages().len(), 2);
        assert!(s.ctx.state().events.is_empty());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_answer() {
        let s = setup();
        let mut changes = s.ctx.subscribe();
        s.backend.fail_after(1, GatewayError::Network("offline".into()));

        let res = execute(
            SendAssistantMessageUseCase {
                content: "Generate events for next week".into(),
            },
            &s.ctx,
        )
        .await;
        assert!(matches!(res, Err(CacheError::Remote(_))));

        let state = s.ctx.state();
        assert_eq!(state.transcript.messages().len(), 2);
        assert!(state.events.is_empty());
        match changes.try_recv().unwrap() {
            CacheChange::ReloadFailed(collections) => {
                assert!(collections.contains(Collection::Events));
                assert!(collections.contains(Collection::Calendars));
            }
            change => panic!("Unexpected change: {:?}", change),
        }
    }
}
