//! Direct Dependency Analyzer
//!
//! Answers pairwise ordering questions from the declared, already resolved
//! dependencies of a snapshot.

use crate::domain::entities::MixinSnapshot;
use crate::domain::value_objects::{DependencyRelation, UnitId};
use crate::ports::outbound::DependencyAnalyzer;

/// Snapshot-backed [`DependencyAnalyzer`] over [`UnitId`]s.
pub struct DirectDependencyAnalyzer<'a> {
    snapshot: &'a MixinSnapshot,
}

impl<'a> DirectDependencyAnalyzer<'a> {
    pub fn new(snapshot: &'a MixinSnapshot) -> Self {
        Self { snapshot }
    }

    fn declares_dependency(&self, dependent: UnitId, dependency: UnitId) -> bool {
        self.snapshot
            .unit(dependent)
            .map(|unit| unit.depends_on(dependency))
            .unwrap_or(false)
    }
}

impl DependencyAnalyzer<UnitId> for DirectDependencyAnalyzer<'_> {
    /// `first`'s dependencies are scanned before `second`'s; only one
    /// direction is ever reported.
    fn analyze_direct_dependency(&self, first: &UnitId, second: &UnitId) -> DependencyRelation {
        if self.declares_dependency(*first, *second) {
            DependencyRelation::FirstDependsOnSecond
        } else if self.declares_dependency(*second, *first) {
            DependencyRelation::SecondDependsOnFirst
        } else {
            DependencyRelation::None
        }
    }
}
