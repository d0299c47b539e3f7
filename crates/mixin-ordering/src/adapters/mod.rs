//! # Adapters Layer (Hexagonal Architecture)
//!
//! Decorators around the inbound port.

mod order_cache;

pub use order_cache::MemoizedOrdering;
