pub mod analysis;
pub mod chat;
pub mod contract;
pub mod quote;
