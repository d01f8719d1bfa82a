//! Fixed stand-in data shown whenever the agent cannot be reached or its
//! reply yields nothing usable.

use crate::analysis::default_risks;
use crate::domain::analysis::{AnalysisRecord, CriteriaScores, Recommendation};
use crate::domain::quote::{Position, StockQuote};

pub const CHAT_APOLOGY: &str =
    "I apologize, but I'm having trouble connecting to the analysis service right now. \
     Please try again in a moment.";

pub fn stocks() -> Vec<StockQuote> {
    vec![
        StockQuote {
            symbol: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            price: 175.43,
            change: 2.15,
            change_percent: 1.24,
            market_cap: Some(2.75e12),
            pe_ratio: Some(28.5),
            dividend_yield: Some(0.52),
        },
        StockQuote {
            symbol: "BRK-B".to_string(),
            name: "Berkshire Hathaway Inc. Class B".to_string(),
            price: 352.18,
            change: -1.27,
            change_percent: -0.36,
            market_cap: Some(7.8e11),
            pe_ratio: Some(9.1),
            dividend_yield: None,
        },
        StockQuote {
            symbol: "KO".to_string(),
            name: "The Coca-Cola Company".to_string(),
            price: 59.84,
            change: 0.42,
            change_percent: 0.71,
            market_cap: Some(2.58e11),
            pe_ratio: Some(24.3),
            dividend_yield: Some(3.07),
        },
    ]
}

pub fn positions() -> Vec<Position> {
    let sizes = [50.0, 25.0, 100.0];
    stocks()
        .into_iter()
        .zip(sizes)
        .map(|(quote, size)| Position::new(quote, size))
        .collect()
}

/// Neutral record attached when a per-position analysis request fails.
pub fn analysis(symbol: &str) -> AnalysisRecord {
    AnalysisRecord {
        symbol: symbol.to_string(),
        score: 50,
        criteria: CriteriaScores::uniform(50),
        recommendation: Recommendation::Hold,
        summary: None,
        reasoning: format!("Analysis for {symbol} is temporarily unavailable."),
        risks: default_risks(),
    }
}
