//! Per-view state. Views are mutated only through `&mut self` on the task
//! that drives them; every derived figure is recomputed on read.

pub mod chat;
pub mod dashboard;
pub mod markets;

use crate::agent::error::failure_kind;
use crate::agent::AgentClient;
use crate::demo;
use crate::domain::quote::{Position, StockQuote};
use crate::parse::{extract_symbols, SymbolCap};
use crate::synth;

pub use chat::ChatView;
pub use dashboard::DashboardView;
pub use markets::MarketsView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Symbols came from the agent; numbers are synthesized.
    Live,
    /// The fixed demo dataset.
    Demo,
}

/// One data category of a view: idle → loading → populated (live or demo).
#[derive(Debug, Clone)]
pub struct Loadable<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub source: Option<DataSource>,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            source: None,
        }
    }
}

impl<T> Loadable<T> {
    pub fn begin(&mut self) {
        self.loading = true;
    }

    pub fn settle(&mut self, items: Vec<T>, source: DataSource) {
        self.items = items;
        self.source = Some(source);
        self.loading = false;
    }

    pub fn is_demo(&self) -> bool {
        self.source == Some(DataSource::Demo)
    }
}

async fn symbols_from_agent(
    agent: &dyn AgentClient,
    prompt: &str,
    cap: SymbolCap,
) -> Option<Vec<String>> {
    match agent.chat(prompt, None).await {
        Ok(reply) => {
            let symbols = extract_symbols(&reply.text, cap);
            if symbols.is_empty() {
                tracing::warn!(?cap, "agent reply named no symbols; using demo data");
                None
            } else {
                Some(symbols)
            }
        }
        Err(err) => {
            tracing::warn!(
                kind = ?failure_kind(&err),
                error = %format!("{err:#}"),
                "agent request failed; using demo data"
            );
            None
        }
    }
}

pub(crate) async fn load_quotes(
    agent: &dyn AgentClient,
    prompt: &str,
    cap: SymbolCap,
) -> (Vec<StockQuote>, DataSource) {
    match symbols_from_agent(agent, prompt, cap).await {
        Some(symbols) => (synth::quotes(&symbols), DataSource::Live),
        None => (demo::stocks(), DataSource::Demo),
    }
}

pub(crate) async fn load_positions(
    agent: &dyn AgentClient,
    prompt: &str,
) -> (Vec<Position>, DataSource) {
    match symbols_from_agent(agent, prompt, SymbolCap::Positions).await {
        Some(symbols) => (synth::positions(&symbols), DataSource::Live),
        None => (demo::positions(), DataSource::Demo),
    }
}
