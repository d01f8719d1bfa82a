//! Ticker extraction from free-text agent replies.
//!
//! Any whole token of one to five uppercase ASCII letters counts as a
//! candidate. There is no registry lookup, so acronyms such as `CEO` or `I`
//! come through as symbols too.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static TICKER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{1,5}\b").expect("invalid ticker pattern"));

/// How many symbols a caller keeps from one reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolCap {
    TopPicks,
    Search,
    Positions,
}

impl SymbolCap {
    pub fn limit(self) -> usize {
        match self {
            SymbolCap::TopPicks => 5,
            SymbolCap::Search => 8,
            SymbolCap::Positions => 10,
        }
    }
}

/// Unique candidate symbols in first-occurrence order, at most `cap` of them.
pub fn extract_symbols(text: &str, cap: SymbolCap) -> Vec<String> {
    let limit = cap.limit();
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(limit);

    for m in TICKER_TOKEN.find_iter(text) {
        if out.len() == limit {
            break;
        }
        let symbol = m.as_str();
        if seen.insert(symbol) {
            out.push(symbol.to_string());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn dedups_in_first_seen_order() {
        let got = extract_symbols("Consider AAPL and also AAPL or MSFT", SymbolCap::TopPicks);
        assert_eq!(got, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn truncates_to_cap() {
        let text = "A B C D E F G H I J K L";
        assert_eq!(extract_symbols(text, SymbolCap::TopPicks).len(), 5);
        assert_eq!(extract_symbols(text, SymbolCap::Search).len(), 8);
        assert_eq!(extract_symbols(text, SymbolCap::Positions).len(), 10);
    }

    #[test]
    fn ignores_long_runs_and_mixed_case_words() {
        let got = extract_symbols("BERKSHIRE owns Apple and KO, plus GOOGL.", SymbolCap::Search);
        assert_eq!(got, vec!["KO", "GOOGL"]);
    }

    #[test]
    fn accepts_acronyms_as_symbols() {
        let got = extract_symbols("The CEO said I should buy KO", SymbolCap::Search);
        assert_eq!(got, vec!["CEO", "I", "KO"]);
    }

    #[test]
    fn hyphenated_class_shares_split() {
        let got = extract_symbols("BRK-B", SymbolCap::Search);
        assert_eq!(got, vec!["BRK", "B"]);
    }

    #[test]
    fn symbol_less_text_is_empty() {
        assert!(extract_symbols("", SymbolCap::TopPicks).is_empty());
        assert!(extract_symbols("nothing worth buying today", SymbolCap::TopPicks).is_empty());
    }

    proptest! {
        #[test]
        fn output_respects_cap_shape_and_uniqueness(text in "[A-Za-z ,.\\-]{0,200}") {
            for cap in [SymbolCap::TopPicks, SymbolCap::Search, SymbolCap::Positions] {
                let got = extract_symbols(&text, cap);
                prop_assert!(got.len() <= cap.limit());

                let unique: HashSet<&String> = got.iter().collect();
                prop_assert_eq!(unique.len(), got.len());

                for s in &got {
                    prop_assert!((1..=5).contains(&s.len()));
                    prop_assert!(s.chars().all(|c| c.is_ascii_uppercase()));
                    prop_assert!(text.contains(s.as_str()));
                }
            }
        }

        #[test]
        fn output_follows_first_occurrence(text in "[A-Z ]{0,80}") {
            let got = extract_symbols(&text, SymbolCap::Positions);
            let positions: Vec<usize> = got
                .iter()
                .map(|s| {
                    text.split(' ')
                        .scan(0usize, |offset, tok| {
                            let at = *offset;
                            *offset += tok.len() + 1;
                            Some((at, tok))
                        })
                        .find(|(_, tok)| tok == s)
                        .map(|(at, _)| at)
                        .unwrap()
                })
                .collect();
            let mut sorted = positions.clone();
            sorted.sort_unstable();
            prop_assert_eq!(positions, sorted);
        }
    }
}
