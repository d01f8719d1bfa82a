use crate::agent::error::failure_kind;
use crate::agent::AgentClient;
use crate::demo;
use crate::domain::quote::{PortfolioSummary, Position, StockQuote};
use crate::invest::InvestmentSuggestion;
use crate::parse::SymbolCap;
use crate::prompts;
use crate::view::{load_positions, load_quotes, Loadable};
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    pub top_picks: Loadable<StockQuote>,
    pub positions: Loadable<Position>,
    pub analyzing: bool,
    selected: Option<String>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.top_picks.loading || self.positions.loading || self.analyzing
    }

    pub async fn load_top_picks(&mut self, agent: &dyn AgentClient) {
        self.top_picks.begin();
        let (quotes, source) = load_quotes(agent, prompts::TOP_PICKS, SymbolCap::TopPicks).await;
        self.top_picks.settle(quotes, source);
    }

    pub async fn load_positions(&mut self, agent: &dyn AgentClient) {
        self.positions.begin();
        let (positions, source) = load_positions(agent, prompts::POSITIONS).await;
        self.positions.settle(positions, source);
        self.reconcile_selection();
    }

    /// Issues both requests at once and applies the results after both settle.
    pub async fn load_all(&mut self, agent: &dyn AgentClient) {
        self.top_picks.begin();
        self.positions.begin();

        let ((quotes, quotes_source), (positions, positions_source)) = tokio::join!(
            load_quotes(agent, prompts::TOP_PICKS, SymbolCap::TopPicks),
            load_positions(agent, prompts::POSITIONS),
        );

        self.top_picks.settle(quotes, quotes_source);
        self.positions.settle(positions, positions_source);
        self.reconcile_selection();

        tracing::info!(
            top_picks = self.top_picks.items.len(),
            positions = self.positions.items.len(),
            top_picks_demo = self.top_picks.is_demo(),
            positions_demo = self.positions.is_demo(),
            "dashboard loaded"
        );
    }

    /// Analyzes positions one at a time, pausing `delay` between requests.
    /// A failed analysis gets a neutral placeholder record. Returns how many
    /// analyses came back from the agent.
    pub async fn analyze_positions(&mut self, agent: &dyn AgentClient, delay: Duration) -> usize {
        self.analyzing = true;
        let mut analyzed = 0;

        for i in 0..self.positions.items.len() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let position = &mut self.positions.items[i];
            position.loading = true;
            let symbol = position.symbol().to_string();

            let record = match agent.analyze(&symbol).await {
                Ok(record) => {
                    analyzed += 1;
                    record
                }
                Err(err) => {
                    tracing::warn!(
                        %symbol,
                        kind = ?failure_kind(&err),
                        error = %format!("{err:#}"),
                        "position analysis failed; attaching placeholder"
                    );
                    demo::analysis(&symbol)
                }
            };

            let position = &mut self.positions.items[i];
            position.analysis = Some(record);
            position.loading = false;
        }

        self.analyzing = false;
        analyzed
    }

    pub fn select(&mut self, symbol: &str) -> bool {
        let found = self
            .positions
            .items
            .iter()
            .any(|p| p.symbol().eq_ignore_ascii_case(symbol));
        if found {
            self.selected = Some(symbol.to_ascii_uppercase());
        }
        found
    }

    pub fn selected(&self) -> Option<&Position> {
        let symbol = self.selected.as_deref()?;
        self.positions.items.iter().find(|p| p.symbol() == symbol)
    }

    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary::from_positions(&self.positions.items)
    }

    pub fn investment_suggestions(&self) -> Vec<InvestmentSuggestion> {
        self.positions
            .items
            .iter()
            .filter_map(InvestmentSuggestion::from_position)
            .collect()
    }

    fn reconcile_selection(&mut self) {
        if self.selected().is_none() {
            self.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{AnalysisRecord, CriteriaScores, Recommendation};
    use crate::invest::Term;
    use crate::testing::ScriptedAgent;
    use crate::view::DataSource;

    fn record(symbol: &str, score: u8, recommendation: Recommendation) -> AnalysisRecord {
        AnalysisRecord {
            symbol: symbol.to_string(),
            score,
            criteria: CriteriaScores::uniform(score),
            recommendation,
            summary: None,
            reasoning: "because".to_string(),
            risks: vec![],
        }
    }

    #[tokio::test]
    async fn load_all_populates_both_categories() {
        let agent = ScriptedAgent::default()
            .reply("Consider KO, AAPL and MSFT.", None)
            .reply("Consider KO, AAPL and MSFT.", None);
        let mut view = DashboardView::new();

        view.load_all(&agent).await;

        assert!(!view.is_loading());
        assert_eq!(view.top_picks.source, Some(DataSource::Live));
        assert_eq!(view.positions.source, Some(DataSource::Live));
        assert_eq!(agent.chat_calls.lock().unwrap().len(), 2);
        let held: Vec<&str> = view.positions.items.iter().map(|p| p.symbol()).collect();
        assert_eq!(held, vec!["KO", "AAPL", "MSFT"]);
        assert_eq!(view.positions.items[0].size, 100.0);
        assert_eq!(view.top_picks.items.len(), 3);
    }

    #[tokio::test]
    async fn failures_fall_back_to_demo_data() {
        let agent = ScriptedAgent::default().fail_chat("down").fail_chat("down");
        let mut view = DashboardView::new();

        view.load_all(&agent).await;

        assert!(view.top_picks.is_demo());
        assert!(view.positions.is_demo());
        assert_eq!(view.positions.items.len(), 3);
        let summary = view.summary();
        let expected: f64 = view.positions.items.iter().map(|p| p.quote.price * p.size).sum();
        assert_eq!(summary.total_value, expected);
    }

    #[tokio::test]
    async fn total_value_tracks_positions_after_reload() {
        let agent = ScriptedAgent::default()
            .reply("AAPL KO", None)
            .reply("MSFT GOOGL TSLA AMZN", None);
        let mut view = DashboardView::new();

        view.load_positions(&agent).await;
        let first: f64 = view.positions.items.iter().map(|p| p.quote.price * p.size).sum();
        assert_eq!(view.summary().total_value, first);

        view.load_positions(&agent).await;
        assert_eq!(view.positions.items.len(), 4);
        let second: f64 = view.positions.items.iter().map(|p| p.quote.price * p.size).sum();
        assert_eq!(view.summary().total_value, second);
    }

    #[tokio::test]
    async fn analysis_is_serialized_and_failures_get_placeholders() {
        let agent = ScriptedAgent::default()
            .fail_chat("down")
            .analysis(record("AAPL", 85, Recommendation::StrongBuy))
            .fail_analysis("500")
            .analysis(record("KO", 70, Recommendation::Buy));
        let mut view = DashboardView::new();
        view.load_positions(&agent).await;

        let analyzed = view.analyze_positions(&agent, Duration::ZERO).await;

        assert_eq!(analyzed, 2);
        assert!(!view.analyzing);
        assert_eq!(
            *agent.analyze_calls.lock().unwrap(),
            vec!["AAPL".to_string(), "BRK-B".to_string(), "KO".to_string()]
        );
        let brk = &view.positions.items[1];
        assert!(!brk.loading);
        assert_eq!(brk.analysis.as_ref().unwrap().recommendation, Recommendation::Hold);

        let suggestions = view.investment_suggestions();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].symbol, "AAPL");
        assert_eq!(suggestions[0].term, Term::Long);
        assert_eq!(suggestions[1].term, Term::Short);
    }

    #[tokio::test(start_paused = true)]
    async fn analysis_waits_between_requests() {
        let agent = ScriptedAgent::default()
            .fail_chat("down")
            .fail_analysis("x")
            .fail_analysis("x")
            .fail_analysis("x");
        let mut view = DashboardView::new();
        view.load_positions(&agent).await;

        let started = tokio::time::Instant::now();
        view.analyze_positions(&agent, Duration::from_millis(500)).await;

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1000), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(1500), "elapsed {elapsed:?}");
    }

    #[tokio::test]
    async fn selection_follows_reloads() {
        let agent = ScriptedAgent::default()
            .reply("AAPL and KO", None)
            .reply("MSFT only", None);
        let mut view = DashboardView::new();
        view.load_positions(&agent).await;

        assert!(view.select("ko"));
        assert_eq!(view.selected().unwrap().symbol(), "KO");
        assert!(!view.select("NOPE"));
        assert_eq!(view.selected().unwrap().symbol(), "KO");

        view.load_positions(&agent).await;
        assert!(view.selected().is_none());
    }
}
