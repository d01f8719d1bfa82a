//! Wire shapes of the agent API.

use anyhow::{bail, ensure};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const STATUS_SUCCESS: &str = "success";
pub const DEFAULT_ANALYSIS_TYPE: &str = "warren_buffett";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub status: String,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A successful conversational exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub thread_id: Option<String>,
}

impl ChatResponse {
    pub fn validate_and_into_reply(self) -> anyhow::Result<ChatReply> {
        if self.status != STATUS_SUCCESS {
            bail!(
                "agent chat status={}: {}",
                self.status,
                self.error.as_deref().unwrap_or("no error detail")
            );
        }

        let text = self.response.map(|s| s.trim().to_string()).unwrap_or_default();
        ensure!(!text.is_empty(), "agent chat response is empty");

        let thread_id = self
            .thread_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(ChatReply { text, thread_id })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub symbol: String,
    pub analysis_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub status: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub result: Option<AnalysisPayload>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Analysis fields as the agent emits them. Numbers may arrive as strings and
/// sub-scores either nested under `criteria_scores` or flattened as
/// `<criterion>_score`, so most fields stay loosely typed here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisPayload {
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub score: Option<Value>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub reasoning: Option<Value>,
    #[serde(default)]
    pub risks: Option<Value>,
    #[serde(default)]
    pub criteria_scores: Option<BTreeMap<String, Value>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
