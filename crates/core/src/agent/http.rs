use crate::agent::error::{AgentDiagnosticsError, FailureKind};
use crate::agent::{normalize_symbol, AgentClient};
use crate::analysis;
use crate::config::Settings;
use crate::domain::analysis::AnalysisRecord;
use crate::domain::contract::{
    AnalyzeRequest, AnalyzeResponse, ChatReply, ChatRequest, ChatResponse, HealthResponse,
    DEFAULT_ANALYSIS_TYPE, STATUS_SUCCESS,
};
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::time::Duration;

const CHAT_PATH: &str = "/agent/chat";
const ANALYZE_PATH: &str = "/agent/analyze";
const HEALTH_PATH: &str = "/agent/health";

#[derive(Debug, Clone)]
pub struct HttpAgentClient {
    http: reqwest::Client,
    base_url: String,
    analysis_type: String,
}

impl HttpAgentClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build agent http client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            analysis_type: DEFAULT_ANALYSIS_TYPE.to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::new(settings.agent_base_url.clone(), settings.agent_timeout)
    }

    pub fn with_analysis_type(mut self, analysis_type: impl Into<String>) -> Self {
        self.analysis_type = analysis_type.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        req: reqwest::RequestBuilder,
    ) -> anyhow::Result<R> {
        let res = req.send().await.map_err(|e| {
            AgentDiagnosticsError::new(endpoint, FailureKind::Transport, format!("request failed: {e}"))
        })?;

        let status = res.status();
        let text = res.text().await.map_err(|e| {
            AgentDiagnosticsError::new(
                endpoint,
                FailureKind::Transport,
                format!("failed to read response body: {e}"),
            )
        })?;

        if !status.is_success() {
            return Err(
                AgentDiagnosticsError::new(endpoint, FailureKind::Status, format!("status={status}"))
                    .with_raw(text)
                    .into(),
            );
        }

        match serde_json::from_str::<R>(&text) {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(AgentDiagnosticsError::new(
                endpoint,
                FailureKind::Malformed,
                format!("failed to decode response: {e}"),
            )
            .with_raw(text)
            .into()),
        }
    }
}

fn body_failure(endpoint: &'static str, status: &str, err: anyhow::Error) -> anyhow::Error {
    let kind = if status == STATUS_SUCCESS {
        FailureKind::Malformed
    } else {
        FailureKind::Status
    };
    AgentDiagnosticsError::new(endpoint, kind, format!("{err:#}")).into()
}

#[async_trait::async_trait]
impl AgentClient for HttpAgentClient {
    async fn chat(&self, message: &str, thread_id: Option<&str>) -> anyhow::Result<ChatReply> {
        let body = ChatRequest {
            message: message.to_string(),
            thread_id: thread_id.map(str::to_string),
        };

        let parsed: ChatResponse = self
            .execute(CHAT_PATH, self.http.post(self.url(CHAT_PATH)).json(&body))
            .await?;
        let status = parsed.status.clone();
        let reply = parsed
            .validate_and_into_reply()
            .map_err(|e| body_failure(CHAT_PATH, &status, e))?;

        tracing::debug!(
            thread_id = reply.thread_id.as_deref().unwrap_or(""),
            response_len = reply.text.len(),
            "agent chat reply"
        );
        Ok(reply)
    }

    async fn analyze(&self, symbol: &str) -> anyhow::Result<AnalysisRecord> {
        let symbol = normalize_symbol(symbol)?;
        let body = AnalyzeRequest {
            symbol: symbol.clone(),
            analysis_type: self.analysis_type.clone(),
        };

        let parsed: AnalyzeResponse = self
            .execute(ANALYZE_PATH, self.http.post(self.url(ANALYZE_PATH)).json(&body))
            .await?;
        let status = parsed.status.clone();
        let record = analysis::read_analysis(&symbol, parsed)
            .map_err(|e| body_failure(ANALYZE_PATH, &status, e))?;

        tracing::debug!(
            %symbol,
            score = record.score,
            recommendation = %record.recommendation,
            "agent analysis"
        );
        Ok(record)
    }

    async fn health(&self) -> anyhow::Result<HealthResponse> {
        self.execute(HEALTH_PATH, self.http.get(self.url(HEALTH_PATH)))
            .await
    }
}
