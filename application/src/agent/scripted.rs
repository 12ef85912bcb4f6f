use super::ConversationAgent;
use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;
use crew_domain::{Participant, Transcript};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Agent that replays canned replies in order
///
/// Once the script runs out the fallback reply is used; without a fallback
/// `produce` fails, which aborts the conversation.
pub struct ScriptedAgent {
    participant: Participant,
    script: Mutex<VecDeque<Result<String, GatewayError>>>,
    fallback: Option<String>,
    observed: Mutex<Vec<usize>>,
}

impl ScriptedAgent {
    pub fn new<I, S>(participant: Participant, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_results(participant, replies.into_iter().map(|r| Ok(r.into())))
    }

    pub fn from_results(
        participant: Participant,
        results: impl IntoIterator<Item = Result<String, GatewayError>>,
    ) -> Self {
        Self {
            participant,
            script: Mutex::new(results.into_iter().collect()),
            fallback: None,
            observed: Mutex::new(Vec::new()),
        }
    }

    /// An agent whose first call fails with `error`
    pub fn failing(participant: Participant, error: GatewayError) -> Self {
        Self::from_results(participant, [Err(error)])
    }

    pub fn with_fallback(mut self, reply: impl Into<String>) -> Self {
        self.fallback = Some(reply.into());
        self
    }

    /// Transcript length seen by each call, in call order
    pub fn observed_lengths(&self) -> Vec<usize> {
        self.observed.lock().map(|o| o.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ConversationAgent for ScriptedAgent {
    fn participant(&self) -> &Participant {
        &self.participant
    }

    async fn produce(&self, transcript: &Transcript) -> Result<String, GatewayError> {
        if let Ok(mut observed) = self.observed.lock() {
            observed.push(transcript.len());
        }
        let next = self
            .script
            .lock()
            .map_err(|_| GatewayError::Other("script lock poisoned".to_string()))?
            .pop_front();
        match (next, &self.fallback) {
            (Some(result), _) => result,
            (None, Some(fallback)) => Ok(fallback.clone()),
            (None, None) => Err(GatewayError::Other(format!(
                "script exhausted for {}",
                self.participant.name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crew_domain::{Role, TurnKind};

    #[tokio::test]
    async fn test_replays_in_order_then_fails() {
        let agent = ScriptedAgent::new(Participant::for_role(Role::Generator), ["one", "two"]);
        let t = Transcript::new();
        assert_eq!(agent.produce(&t).await.unwrap(), "one");
        assert_eq!(agent.produce(&t).await.unwrap(), "two");
        assert!(matches!(
            agent.produce(&t).await,
            Err(GatewayError::Other(_))
        ));
        assert_eq!(agent.observed_lengths().len(), 3);
    }

    #[tokio::test]
    async fn test_fallback_after_script() {
        let agent = ScriptedAgent::new(Participant::for_role(Role::Reviewer), ["first"])
            .with_fallback("again");
        let mut t = Transcript::new();
        agent.produce(&t).await.unwrap();
        t.append("X", "task", TurnKind::Message);
        assert_eq!(agent.produce(&t).await.unwrap(), "again");
        assert_eq!(agent.observed_lengths(), vec![0, 1]);
    }

    #[tokio::test]
    async fn test_failing_agent() {
        let agent = ScriptedAgent::failing(
            Participant::for_role(Role::Tester),
            GatewayError::RateLimited {
                message: "slow down".to_string(),
                retry_after: Some(1),
            },
        );
        let err = agent.produce(&Transcript::new()).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::RateLimited {
                retry_after: Some(1),
                ..
            }
        ));
    }
}
