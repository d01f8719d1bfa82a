use crate::agent::AgentClient;
use crate::domain::quote::StockQuote;
use crate::parse::SymbolCap;
use crate::prompts;
use crate::view::{load_quotes, Loadable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarketBreadth {
    pub advancing: usize,
    pub declining: usize,
    pub unchanged: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MarketsView {
    pub trending: Loadable<StockQuote>,
    pub results: Loadable<StockQuote>,
    query: Option<String>,
    selected: Option<String>,
}

impl MarketsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.trending.loading || self.results.loading
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub async fn load_trending(&mut self, agent: &dyn AgentClient) {
        self.trending.begin();
        let (quotes, source) = load_quotes(agent, prompts::TRENDING, SymbolCap::Search).await;
        self.trending.settle(quotes, source);
        self.reconcile_selection();
    }

    /// Asks the agent for stocks matching `query`. Only a blank query is an
    /// error; failed lookups fall back to the demo list.
    pub async fn search(&mut self, agent: &dyn AgentClient, query: &str) -> anyhow::Result<()> {
        let query = query.trim();
        anyhow::ensure!(!query.is_empty(), "search query must be non-empty");

        self.query = Some(query.to_string());
        self.results.begin();
        let (quotes, source) = load_quotes(agent, &prompts::search(query), SymbolCap::Search).await;
        self.results.settle(quotes, source);
        self.reconcile_selection();

        tracing::info!(%query, results = self.results.items.len(), demo = self.results.is_demo(), "market search");
        Ok(())
    }

    fn all_quotes(&self) -> impl Iterator<Item = &StockQuote> {
        self.results.items.iter().chain(self.trending.items.iter())
    }

    pub fn select(&mut self, symbol: &str) -> bool {
        let found = self.all_quotes().any(|q| q.symbol.eq_ignore_ascii_case(symbol));
        if found {
            self.selected = Some(symbol.to_ascii_uppercase());
        }
        found
    }

    /// Search results shadow trending quotes for the same symbol.
    pub fn selected(&self) -> Option<&StockQuote> {
        let symbol = self.selected.as_deref()?;
        self.all_quotes().find(|q| q.symbol == symbol)
    }

    pub fn breadth(&self) -> MarketBreadth {
        self.trending
            .items
            .iter()
            .fold(MarketBreadth::default(), |mut acc, q| {
                if q.change > 0.0 {
                    acc.advancing += 1;
                } else if q.change < 0.0 {
                    acc.declining += 1;
                } else {
                    acc.unchanged += 1;
                }
                acc
            })
    }

    fn reconcile_selection(&mut self) {
        if self.selected().is_none() {
            self.selected = None;
        }
    }
}
