//! Hand-off of buy suggestions to a third-party execution endpoint. The
//! endpoint confirms nothing beyond its HTTP status.

use crate::agent::error::{AgentDiagnosticsError, FailureKind};
use crate::agent::normalize_symbol;
use crate::config::Settings;
use crate::domain::analysis::Recommendation;
use crate::domain::quote::Position;
use anyhow::{bail, Context};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

const ENDPOINT: &str = "invest";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    Short,
    Long,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentSuggestion {
    pub symbol: String,
    pub qty: u32,
    pub term: Term,
}

impl InvestmentSuggestion {
    /// One share of every analyzed position the agent rates a buy: long term
    /// for Strong Buy, short term for Buy.
    pub fn from_position(position: &Position) -> Option<Self> {
        let analysis = position.analysis.as_ref()?;
        let term = match analysis.recommendation {
            Recommendation::StrongBuy => Term::Long,
            Recommendation::Buy => Term::Short,
            _ => return None,
        };
        Some(Self {
            symbol: position.symbol().to_string(),
            qty: 1,
            term,
        })
    }
}

/// Parses `SYMBOL:QTY[:TERM]`, e.g. `KO:10:long`. Term defaults to long.
impl FromStr for InvestmentSuggestion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let symbol = normalize_symbol(parts.next().unwrap_or_default())?;
        let qty = parts
            .next()
            .context("missing quantity (expected SYMBOL:QTY[:TERM])")?
            .trim()
            .parse::<u32>()
            .with_context(|| format!("invalid quantity in {s}"))?;
        anyhow::ensure!(qty > 0, "quantity must be positive (got {qty})");

        let term = match parts.next().map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            None | Some("long") => Term::Long,
            Some("short") => Term::Short,
            Some(other) => bail!("unknown term {other} (expected short or long)"),
        };
        anyhow::ensure!(parts.next().is_none(), "too many fields in {s}");

        Ok(Self { symbol, qty, term })
    }
}

#[derive(Debug, Clone)]
pub struct InvestmentClient {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl InvestmentClient {
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("failed to build investment http client")?;

        Ok(Self {
            http,
            url: url.into(),
            api_key,
        })
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let url = settings.require_invest_api_url()?.to_string();
        Self::new(url, settings.invest_api_key.clone())
    }

    fn headers(&self) -> anyhow::Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            headers.insert("x-api-key", HeaderValue::from_str(api_key)?);
        }
        Ok(headers)
    }

    pub async fn submit(&self, suggestions: &[InvestmentSuggestion]) -> anyhow::Result<()> {
        anyhow::ensure!(!suggestions.is_empty(), "no suggestions to submit");

        let res = self
            .http
            .post(&self.url)
            .headers(self.headers()?)
            .json(suggestions)
            .send()
            .await
            .map_err(|e| {
                AgentDiagnosticsError::new(ENDPOINT, FailureKind::Transport, format!("request failed: {e}"))
            })?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(
                AgentDiagnosticsError::new(ENDPOINT, FailureKind::Status, format!("status={status}"))
                    .with_raw(text)
                    .into(),
            );
        }

        tracing::info!(count = suggestions.len(), %status, "investment suggestions submitted");
        Ok(())
    }
}
