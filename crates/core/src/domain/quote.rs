use crate::domain::analysis::AnalysisRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub quote: StockQuote,
    /// Share count.
    pub size: f64,
    pub analysis: Option<AnalysisRecord>,
    #[serde(skip)]
    pub loading: bool,
}

impl Position {
    pub fn new(quote: StockQuote, size: f64) -> Self {
        Self {
            quote,
            size,
            analysis: None,
            loading: false,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.quote.symbol
    }

    pub fn value(&self) -> f64 {
        self.quote.price * self.size
    }

    /// Day change in money terms.
    pub fn day_change(&self) -> f64 {
        self.quote.change * self.size
    }
}

/// Aggregates over a set of positions. Recomputed from scratch on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_change: f64,
    pub total_change_percent: f64,
}

impl PortfolioSummary {
    pub fn from_positions(positions: &[Position]) -> Self {
        let total_value: f64 = positions.iter().map(Position::value).sum();
        let total_change: f64 = positions.iter().map(Position::day_change).sum();
        let base = total_value - total_change;
        let total_change_percent = if base == 0.0 {
            0.0
        } else {
            total_change / base * 100.0
        };

        Self {
            total_value,
            total_change,
            total_change_percent,
        }
    }
}
