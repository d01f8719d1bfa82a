use crate::agent::AgentClient;
use crate::session::{ChatSession, SendOutcome};

#[derive(Debug, Clone, Default)]
pub struct ChatView {
    pub session: ChatSession,
    pub sending: bool,
}

impl ChatView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn send(&mut self, agent: &dyn AgentClient, text: &str) -> anyhow::Result<SendOutcome> {
        self.sending = true;
        let outcome = self.session.send(agent, text).await;
        self.sending = false;
        outcome
    }
}
