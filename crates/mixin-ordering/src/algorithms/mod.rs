//! Algorithms module for mixin ordering
//!
//! Contains:
//! - Direct dependency analyzer
//! - Alphabetic tie breaker
//! - Grouper
//! - Generic topological sort (Kahn's)

pub mod dependency_analyzer;
pub mod grouper;
pub mod tie_breaker;
pub mod topological_sort;

pub use dependency_analyzer::DirectDependencyAnalyzer;
pub use grouper::group_units;
pub use tie_breaker::AlphabeticTieBreaker;
pub use topological_sort::topological_sort;
