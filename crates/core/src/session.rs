use crate::agent::{AgentClient, MAX_MESSAGE_CHARS};
use crate::demo;
use crate::domain::chat::ChatMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No conversation token yet.
    New,
    /// Every request carries the token issued by the agent.
    Threaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Replied,
    /// The request failed and an apology was appended instead.
    Failed,
}

/// One in-memory conversation with the agent. The history only ever grows.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    thread_id: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    pub fn state(&self) -> SessionState {
        match self.thread_id {
            Some(_) => SessionState::Threaded,
            None => SessionState::New,
        }
    }

    /// Sends `text` and appends the reply. Only invalid input is an error;
    /// agent failures are answered with an apology message.
    pub async fn send(&mut self, agent: &dyn AgentClient, text: &str) -> anyhow::Result<SendOutcome> {
        let text = text.trim();
        anyhow::ensure!(!text.is_empty(), "message must be non-empty");
        anyhow::ensure!(
            text.chars().count() <= MAX_MESSAGE_CHARS,
            "message must be at most {MAX_MESSAGE_CHARS} characters"
        );

        self.messages.push(ChatMessage::user(text));

        match agent.chat(text, self.thread_id.as_deref()).await {
            Ok(reply) => {
                if let Some(issued) = reply.thread_id {
                    if self.thread_id.is_none() {
                        tracing::debug!(thread_id = %issued, "conversation token attached");
                        self.thread_id = Some(issued);
                    } else if self.thread_id.as_deref() != Some(issued.as_str()) {
                        tracing::debug!(%issued, "ignoring different conversation token");
                    }
                }
                self.messages.push(ChatMessage::assistant(reply.text));
                Ok(SendOutcome::Replied)
            }
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "chat request failed; answering with apology");
                self.messages.push(ChatMessage::assistant(demo::CHAT_APOLOGY));
                Ok(SendOutcome::Failed)
            }
        }
    }
}
