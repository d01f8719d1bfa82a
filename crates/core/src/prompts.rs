//! Messages the views send to the conversational endpoint to get lists of
//! symbols out of the agent.

pub const TOP_PICKS: &str = "What are your top 5 stock picks right now based on value investing \
principles? Please mention each company by its ticker symbol.";

pub const POSITIONS: &str = "Suggest a diversified long-term portfolio of up to 10 stocks. \
List each holding by its ticker symbol.";

pub const TRENDING: &str = "Which stocks are the most notable market movers today? \
Reply with their ticker symbols.";

pub fn search(query: &str) -> String {
    format!(
        "Find stocks related to \"{}\". List up to 8 matches by ticker symbol.",
        query.trim()
    )
}
