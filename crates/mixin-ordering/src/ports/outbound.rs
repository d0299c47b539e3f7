//! Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators consulted by the generic topological sort. Both are generic
//! over the sorted item so the sort stays reusable outside mixin ordering.

use crate::domain::value_objects::DependencyRelation;

/// Pairwise dependency analyzer
///
/// Decides whether one item must be placed before the other. Exactly one
/// direction is reported per pair; contradictory declarations surface later
/// as a cycle.
pub trait DependencyAnalyzer<T> {
    fn analyze_direct_dependency(&self, first: &T, second: &T) -> DependencyRelation;
}

/// Tie breaker
///
/// Chooses the next item when several are eligible at the same time.
pub trait TieBreaker<T> {
    type Error: std::error::Error + 'static;

    /// Pick one of `candidates` (never empty) or explain why no safe choice exists.
    fn resolve_tie(&self, candidates: &[T]) -> Result<T, Self::Error>;
}

impl<T, A: DependencyAnalyzer<T> + ?Sized> DependencyAnalyzer<T> for &A {
    fn analyze_direct_dependency(&self, first: &T, second: &T) -> DependencyRelation {
        (**self).analyze_direct_dependency(first, second)
    }
}

impl<T, B: TieBreaker<T> + ?Sized> TieBreaker<T> for &B {
    type Error = B::Error;

    fn resolve_tie(&self, candidates: &[T]) -> Result<T, Self::Error> {
        (**self).resolve_tie(candidates)
    }
}
