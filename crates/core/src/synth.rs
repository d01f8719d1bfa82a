//! Placeholder market data for symbols the agent names without numbers.
//!
//! Every draw is independent and unseeded in production; the same symbol gets
//! different numbers on every call.

use crate::domain::quote::{Position, StockQuote};
use rand::Rng;
use std::ops::RangeInclusive;

pub const PRICE_RANGE: RangeInclusive<f64> = 50.0..=550.0;
/// Percent, zero-centered.
pub const CHANGE_PERCENT_RANGE: RangeInclusive<f64> = -5.0..=5.0;
pub const MARKET_CAP_RANGE: RangeInclusive<f64> = 10.0e9..=3.0e12;
pub const PE_RANGE: RangeInclusive<f64> = 8.0..=40.0;
/// Percent.
pub const DIVIDEND_YIELD_RANGE: RangeInclusive<f64> = 0.0..=4.0;
/// Share count for symbols outside [`KNOWN_POSITION_SIZES`].
pub const RANDOM_POSITION_RANGE: RangeInclusive<u32> = 5..=100;

/// Fixed share counts for the holdings the desk usually shows.
pub const KNOWN_POSITION_SIZES: [(&str, f64); 9] = [
    ("AAPL", 50.0),
    ("MSFT", 30.0),
    ("GOOGL", 10.0),
    ("AMZN", 15.0),
    ("TSLA", 20.0),
    ("BRK", 25.0),
    ("BRK-B", 25.0),
    ("KO", 100.0),
    ("JNJ", 40.0),
];

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn quote_with<R: Rng>(rng: &mut R, symbol: &str) -> StockQuote {
    let price = round2(rng.gen_range(PRICE_RANGE));
    let change_percent = round2(rng.gen_range(CHANGE_PERCENT_RANGE));
    let change = round2(price * change_percent / 100.0);

    StockQuote {
        symbol: symbol.to_string(),
        name: format!("{symbol} Corp."),
        price,
        change,
        change_percent,
        market_cap: Some(rng.gen_range(MARKET_CAP_RANGE).round()),
        pe_ratio: Some(round2(rng.gen_range(PE_RANGE))),
        dividend_yield: Some(round2(rng.gen_range(DIVIDEND_YIELD_RANGE))),
    }
}

pub fn position_size_with<R: Rng>(rng: &mut R, symbol: &str) -> f64 {
    KNOWN_POSITION_SIZES
        .iter()
        .find(|(known, _)| *known == symbol)
        .map(|(_, size)| *size)
        .unwrap_or_else(|| f64::from(rng.gen_range(RANDOM_POSITION_RANGE)))
}

pub fn position_with<R: Rng>(rng: &mut R, symbol: &str) -> Position {
    let size = position_size_with(rng, symbol);
    Position::new(quote_with(rng, symbol), size)
}

pub fn quotes(symbols: &[String]) -> Vec<StockQuote> {
    let mut rng = rand::thread_rng();
    symbols.iter().map(|s| quote_with(&mut rng, s)).collect()
}

pub fn positions(symbols: &[String]) -> Vec<Position> {
    let mut rng = rand::thread_rng();
    symbols.iter().map(|s| position_with(&mut rng, s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn quotes_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            let q = quote_with(&mut rng, "XYZ");
            assert!(q.price > 0.0);
            assert!(PRICE_RANGE.contains(&q.price), "price {}", q.price);
            assert!(CHANGE_PERCENT_RANGE.contains(&q.change_percent));
            assert!(q.change.abs() <= q.price * 0.05 + 0.01);
            assert!(PE_RANGE.contains(&q.pe_ratio.unwrap()));
            assert!(DIVIDEND_YIELD_RANGE.contains(&q.dividend_yield.unwrap()));
            assert!(MARKET_CAP_RANGE.contains(&q.market_cap.unwrap()));
        }
    }

    #[test]
    fn known_symbols_use_fixed_sizes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(position_size_with(&mut rng, "KO"), 100.0);
        assert_eq!(position_size_with(&mut rng, "AAPL"), 50.0);
    }

    #[test]
    fn unknown_symbols_draw_a_bounded_size() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let size = position_size_with(&mut rng, "ZZZ");
            assert!(size >= 5.0 && size <= 100.0);
            assert_eq!(size.fract(), 0.0);
        }
    }

    #[test]
    fn position_value_is_price_times_size() {
        let ps = positions(&["AAPL".to_string(), "NEWCO".to_string()]);
        for p in &ps {
            assert_eq!(p.value(), p.quote.price * p.size);
        }
        assert_eq!(ps[0].size, 50.0);
    }

    #[test]
    fn repeated_calls_are_not_deterministic() {
        let symbols = vec!["AAPL".to_string()];
        let draws: Vec<f64> = (0..20).map(|_| quotes(&symbols)[0].price).collect();
        assert!(draws.windows(2).any(|w| w[0] != w[1]));
    }
}
