use crate::agent::AgentClient;
use crate::domain::analysis::AnalysisRecord;
use crate::domain::contract::{ChatReply, HealthResponse};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Agent double that replays scripted chat replies and records every call.
#[derive(Default)]
pub struct ScriptedAgent {
    chat_replies: Mutex<VecDeque<anyhow::Result<ChatReply>>>,
    analyses: Mutex<VecDeque<anyhow::Result<AnalysisRecord>>>,
    pub chat_calls: Mutex<Vec<(String, Option<String>)>>,
    pub analyze_calls: Mutex<Vec<String>>,
}

impl ScriptedAgent {
    pub fn reply(self, text: &str, thread_id: Option<&str>) -> Self {
        self.chat_replies.lock().unwrap().push_back(Ok(ChatReply {
            text: text.to_string(),
            thread_id: thread_id.map(str::to_string),
        }));
        self
    }

    pub fn fail_chat(self, msg: &str) -> Self {
        self.chat_replies
            .lock()
            .unwrap()
            .push_back(Err(anyhow::anyhow!(msg.to_string())));
        self
    }

    pub fn analysis(self, record: AnalysisRecord) -> Self {
        self.analyses.lock().unwrap().push_back(Ok(record));
        self
    }

    pub fn fail_analysis(self, msg: &str) -> Self {
        self.analyses
            .lock()
            .unwrap()
            .push_back(Err(anyhow::anyhow!(msg.to_string())));
        self
    }

    pub fn chat_threads(&self) -> Vec<Option<String>> {
        self.chat_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, t)| t.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl AgentClient for ScriptedAgent {
    async fn chat(&self, message: &str, thread_id: Option<&str>) -> anyhow::Result<ChatReply> {
        self.chat_calls
            .lock()
            .unwrap()
            .push((message.to_string(), thread_id.map(str::to_string)));
        self.chat_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no scripted chat reply")))
    }

    async fn analyze(&self, symbol: &str) -> anyhow::Result<AnalysisRecord> {
        self.analyze_calls.lock().unwrap().push(symbol.to_string());
        self.analyses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no scripted analysis")))
    }

    async fn health(&self) -> anyhow::Result<HealthResponse> {
        Ok(HealthResponse {
            status: "healthy".to_string(),
            service: None,
            version: None,
        })
    }
}
