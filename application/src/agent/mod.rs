//! Conversation agents
//!
//! A [`ConversationAgent`] pairs a [`Participant`] with the opaque step that
//! produces its next contribution. Variants are chosen statically:
//!
//! - [`LlmAgent`]: asks a language model through the [`LlmGateway`](crate::ports::llm_gateway::LlmGateway) port
//! - [`ScriptedAgent`]: replays canned replies (offline demo and tests)

mod llm;
mod scripted;

pub use llm::LlmAgent;
pub use scripted::ScriptedAgent;

use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;
use crew_domain::{Participant, Transcript};

/// A participant that can contribute turns to a conversation
#[async_trait]
pub trait ConversationAgent: Send + Sync {
    fn participant(&self) -> &Participant;

    /// Produce the next contribution given the transcript so far
    ///
    /// Errors are never swallowed: the coordinator aborts the run with them.
    async fn produce(&self, transcript: &Transcript) -> Result<String, GatewayError>;

    fn name(&self) -> &str {
        self.participant().name()
    }

    /// Whether code artifacts in this agent's messages are executed
    fn can_execute(&self) -> bool {
        self.participant().can_execute()
    }
}

#[async_trait]
impl<A: ConversationAgent + ?Sized> ConversationAgent for Box<A> {
    fn participant(&self) -> &Participant {
        (**self).participant()
    }

    async fn produce(&self, transcript: &Transcript) -> Result<String, GatewayError> {
        (**self).produce(transcript).await
    }
}

#[async_trait]
impl<A: ConversationAgent + ?Sized> ConversationAgent for std::sync::Arc<A> {
    fn participant(&self) -> &Participant {
        (**self).participant()
    }

    async fn produce(&self, transcript: &Transcript) -> Result<String, GatewayError> {
        (**self).produce(transcript).await
    }
}
