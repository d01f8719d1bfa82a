use omaha_core::domain::analysis::AnalysisRecord;
use omaha_core::domain::chat::{ChatMessage, Role};
use omaha_core::domain::quote::{PortfolioSummary, Position, StockQuote};
use omaha_core::view::markets::MarketBreadth;
use omaha_core::view::{DataSource, Loadable};

fn compact(v: f64) -> String {
    let abs = v.abs();
    if abs >= 1e12 {
        format!("{:.2}T", v / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", v / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", v / 1e6)
    } else {
        format!("{v:.0}")
    }
}

fn opt(v: Option<f64>, f: impl Fn(f64) -> String) -> String {
    v.map(f).unwrap_or_else(|| "-".to_string())
}

pub fn heading<T>(title: &str, slot: &Loadable<T>) -> String {
    match slot.source {
        Some(DataSource::Demo) => format!("{title} (demo data)"),
        _ => title.to_string(),
    }
}

pub fn quotes(title: &str, slot: &Loadable<StockQuote>) -> String {
    let mut out = format!("== {} ==\n", heading(title, slot));
    out.push_str(&format!(
        "{:<8} {:<32} {:>10} {:>9} {:>8} {:>9} {:>7} {:>6}\n",
        "SYMBOL", "NAME", "PRICE", "CHANGE", "CHG%", "MKT CAP", "P/E", "DIV%"
    ));
    for q in &slot.items {
        out.push_str(&format!(
            "{:<8} {:<32} {:>10.2} {:>+9.2} {:>+7.2}% {:>9} {:>7} {:>6}\n",
            q.symbol,
            q.name,
            q.price,
            q.change,
            q.change_percent,
            opt(q.market_cap, compact),
            opt(q.pe_ratio, |v| format!("{v:.1}")),
            opt(q.dividend_yield, |v| format!("{v:.2}")),
        ));
    }
    out
}

pub fn positions(slot: &Loadable<Position>, summary: &PortfolioSummary) -> String {
    let mut out = format!("== {} ==\n", heading("Portfolio", slot));
    out.push_str(&format!(
        "{:<8} {:>8} {:>10} {:>12} {:>10} {:<11} {:>5}\n",
        "SYMBOL", "SHARES", "PRICE", "VALUE", "DAY", "RATING", "SCORE"
    ));
    for p in &slot.items {
        let (rating, score) = match &p.analysis {
            Some(a) => (a.recommendation.label().to_string(), a.score.to_string()),
            None => ("-".to_string(), "-".to_string()),
        };
        out.push_str(&format!(
            "{:<8} {:>8.0} {:>10.2} {:>12.2} {:>+10.2} {:<11} {:>5}\n",
            p.symbol(),
            p.size,
            p.quote.price,
            p.value(),
            p.day_change(),
            rating,
            score,
        ));
    }
    out.push_str(&format!(
        "Total value {:.2}  day change {:+.2} ({:+.2}%)\n",
        summary.total_value, summary.total_change, summary.total_change_percent
    ));
    out
}

pub fn analysis(record: &AnalysisRecord) -> String {
    let mut out = format!(
        "== {} analysis ==\n{} (score {}/100)\n",
        record.symbol, record.recommendation, record.score
    );
    if let Some(summary) = &record.summary {
        out.push_str(&format!("{summary}\n"));
    }
    for (name, score) in record.criteria.named() {
        out.push_str(&format!("  {:<20} {:>3}\n", name.replace('_', " "), score));
    }
    if !record.reasoning.is_empty() {
        out.push_str("Reasoning:\n");
        for line in record.reasoning.lines() {
            out.push_str(&format!("  {line}\n"));
        }
    }
    out.push_str("Risks:\n");
    for risk in &record.risks {
        out.push_str(&format!("  {risk}\n"));
    }
    out
}

pub fn message(msg: &ChatMessage) -> String {
    let who = match msg.role {
        Role::User => "you",
        Role::Assistant => "agent",
    };
    format!("[{}] {who}> {}", msg.timestamp.format("%H:%M:%S"), msg.content)
}

pub fn breadth(b: &MarketBreadth) -> String {
    format!(
        "Breadth: {} advancing, {} declining, {} unchanged",
        b.advancing, b.declining, b.unchanged
    )
}
