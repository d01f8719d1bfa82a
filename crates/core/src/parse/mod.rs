pub mod symbols;

pub use symbols::{extract_symbols, SymbolCap};
