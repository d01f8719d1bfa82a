//! Turns analysis endpoint payloads into [`AnalysisRecord`]s.

pub mod structured;
pub mod text;

use crate::domain::analysis::AnalysisRecord;
use crate::domain::contract::{AnalysisPayload, AnalyzeResponse, STATUS_SUCCESS};
use anyhow::{bail, ensure};

pub const DEFAULT_SCORE: u8 = 75;
pub const MAX_REASONING_POINTS: usize = 5;
pub const MAX_RISK_POINTS: usize = 5;
pub const FALLBACK_SUMMARY: &str = "Analysis completed successfully.";

pub fn default_risks() -> Vec<String> {
    ["Market volatility", "Economic uncertainty", "Industry-specific risks"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn read_analysis(symbol: &str, res: AnalyzeResponse) -> anyhow::Result<AnalysisRecord> {
    if res.status != STATUS_SUCCESS {
        bail!(
            "analysis status={} for {symbol}: {}",
            res.status,
            res.error.as_deref().unwrap_or("no error detail")
        );
    }

    if let Some(returned) = res.symbol.as_deref() {
        ensure!(
            returned.trim().eq_ignore_ascii_case(symbol),
            "analysis symbol mismatch: expected {symbol}, got {returned}"
        );
    }

    // A result with nothing usable in it defers to the reply text.
    let result_prose = match res.result {
        Some(payload) if payload.has_structured_fields() => {
            return Ok(structured::from_payload(symbol, payload));
        }
        Some(payload) => payload.analysis,
        None => None,
    };

    let text = [res.response.as_deref(), result_prose.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|t| !t.is_empty());
    let Some(text) = text else {
        bail!("analysis for {symbol} has neither a usable result nor response text");
    };

    if let Some(payload) = embedded_payload(text) {
        return Ok(structured::from_payload(symbol, payload));
    }

    Ok(text::from_text(symbol, text))
}

/// First JSON object inside `text` that decodes into a payload with a usable
/// score or label. Fences and surrounding prose are skipped over.
fn embedded_payload(text: &str) -> Option<AnalysisPayload> {
    text.match_indices('{').find_map(|(at, _)| {
        serde_json::Deserializer::from_str(&text[at..])
            .into_iter::<AnalysisPayload>()
            .next()?
            .ok()
            .filter(AnalysisPayload::has_structured_fields)
    })
}
