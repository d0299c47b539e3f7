//! Ports module for mixin ordering
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::MixinOrderingApi;
pub use outbound::{DependencyAnalyzer, TieBreaker};
