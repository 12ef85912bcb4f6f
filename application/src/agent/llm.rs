use super::ConversationAgent;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use async_trait::async_trait;
use crew_domain::{Message, ModelSettings, Participant, Transcript, preview};
use std::sync::Arc;
use tracing::debug;

/// Agent backed by a chat-completion model
///
/// The transcript is rendered from this participant's point of view: its own
/// messages become assistant messages, everything else becomes a user message
/// tagged with the speaker's name.
pub struct LlmAgent<G: LlmGateway> {
    participant: Participant,
    gateway: Arc<G>,
    settings: ModelSettings,
}

impl<G: LlmGateway> LlmAgent<G> {
    pub fn new(participant: Participant, gateway: Arc<G>, settings: ModelSettings) -> Self {
        Self {
            participant,
            gateway,
            settings,
        }
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// Build the chat messages sent to the model
    pub fn render_messages(&self, transcript: &Transcript) -> Vec<Message> {
        let mut messages = Vec::with_capacity(transcript.len() + 1);
        if !self.participant.directive().trim().is_empty() {
            messages.push(Message::system(self.participant.directive()));
        }
        for turn in transcript.turns() {
            if turn.is_message() && turn.speaker() == self.participant.name() {
                messages.push(Message::assistant(turn.content()));
            } else {
                messages.push(Message::user(turn.content()).with_name(turn.speaker()));
            }
        }
        messages
    }
}

#[async_trait]
impl<G: LlmGateway> ConversationAgent for LlmAgent<G> {
    fn participant(&self) -> &Participant {
        &self.participant
    }

    async fn produce(&self, transcript: &Transcript) -> Result<String, GatewayError> {
        let messages = self.render_messages(transcript);
        debug!(
            "{} asking {} with {} messages",
            self.participant.name(),
            self.settings.model(),
            messages.len()
        );
        let reply = self.gateway.complete(&self.settings, &messages).await?;
        debug!("{} replied: {}", self.participant.name(), preview(&reply, 80));
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crew_domain::{MessageRole, Role, TurnKind};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct RecordingGateway {
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        seen: Mutex<Vec<Vec<Message>>>,
    }

    impl RecordingGateway {
        fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for RecordingGateway {
        async fn complete(
            &self,
            _settings: &ModelSettings,
            messages: &[Message],
        ) -> Result<String, GatewayError> {
            self.seen.lock().unwrap().push(messages.to_vec());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("no more replies".to_string())))
        }
    }

    fn transcript() -> Transcript {
        let mut t = Transcript::new();
        t.append("UserProxyAgent", "Write a calculator", TurnKind::Message);
        t.append("CodeAssistant", "```python\nprint(1)\n```", TurnKind::Message);
        t.append("UserProxyAgent", "exitcode: 0", TurnKind::ExecutionResult);
        t
    }

    #[test]
    fn test_render_messages_from_generator_view() {
        let gateway = Arc::new(RecordingGateway::new(vec![]));
        let agent = LlmAgent::new(
            Participant::for_role(Role::Generator),
            gateway,
            ModelSettings::default(),
        );

        let messages = agent.render_messages(&transcript());
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].name.as_deref(), Some("UserProxyAgent"));
        assert_eq!(messages[2].role, MessageRole::Assistant);
        assert_eq!(messages[3].role, MessageRole::User);
    }

    #[test]
    fn test_own_execution_result_is_a_user_message() {
        let gateway = Arc::new(RecordingGateway::new(vec![]));
        let agent = LlmAgent::new(
            Participant::for_role(Role::Coordinator).with_directive(""),
            gateway,
            ModelSettings::default(),
        );

        let messages = agent.render_messages(&transcript());
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, MessageRole::Assistant);
        assert_eq!(messages[2].role, MessageRole::User);
    }

    #[tokio::test]
    async fn test_produce_passes_transcript_to_gateway() {
        let gateway = Arc::new(RecordingGateway::new(vec![Ok("Looks good".to_string())]));
        let agent = LlmAgent::new(
            Participant::for_role(Role::Reviewer),
            Arc::clone(&gateway),
            ModelSettings::default(),
        );

        let reply = agent.produce(&transcript()).await.unwrap();
        assert_eq!(reply, "Looks good");
        assert_eq!(gateway.seen.lock().unwrap()[0].len(), 4);
    }

    #[tokio::test]
    async fn test_produce_propagates_gateway_error() {
        let gateway = Arc::new(RecordingGateway::new(vec![Err(
            GatewayError::AuthenticationFailed("bad key".to_string()),
        )]));
        let agent = LlmAgent::new(
            Participant::for_role(Role::Tester),
            gateway,
            ModelSettings::default(),
        );

        let err = agent.produce(&transcript()).await.unwrap_err();
        assert!(matches!(err, GatewayError::AuthenticationFailed(_)));
    }
}
