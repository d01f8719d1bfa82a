pub mod error;
pub mod http;

use crate::domain::analysis::AnalysisRecord;
use crate::domain::contract::{ChatReply, HealthResponse};

pub const MAX_MESSAGE_CHARS: usize = 1000;
pub const MAX_SYMBOL_CHARS: usize = 10;

/// The remote investment agent.
#[async_trait::async_trait]
pub trait AgentClient: Send + Sync {
    async fn chat(&self, message: &str, thread_id: Option<&str>) -> anyhow::Result<ChatReply>;

    async fn analyze(&self, symbol: &str) -> anyhow::Result<AnalysisRecord>;

    async fn health(&self) -> anyhow::Result<HealthResponse>;
}

/// Trims and upper-cases a symbol, rejecting ones the agent would refuse.
pub fn normalize_symbol(symbol: &str) -> anyhow::Result<String> {
    let symbol = symbol.trim().to_ascii_uppercase();
    anyhow::ensure!(!symbol.is_empty(), "symbol must be non-empty");
    anyhow::ensure!(
        symbol.chars().count() <= MAX_SYMBOL_CHARS,
        "symbol must be at most {MAX_SYMBOL_CHARS} characters (got {symbol})"
    );
    Ok(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_symbol_uppercases() {
        assert_eq!(normalize_symbol(" brk-b ").unwrap(), "BRK-B");
    }

    #[test]
    fn normalize_symbol_rejects_blank_and_long() {
        assert!(normalize_symbol("   ").is_err());
        assert!(normalize_symbol("ABCDEFGHIJK").is_err());
    }
}
