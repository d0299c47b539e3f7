//! Alphabetic Tie Breaker
//!
//! When several mixins are eligible at once, the smallest display name wins
//! (ordinal, byte-wise comparison). The fallback is only trusted while at
//! most one candidate refuses alphabetic ordering.

use crate::domain::entities::MixinSnapshot;
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::UnitId;
use crate::ports::outbound::TieBreaker;
use tracing::debug;

/// Snapshot-backed [`TieBreaker`] over [`UnitId`]s.
pub struct AlphabeticTieBreaker<'a> {
    snapshot: &'a MixinSnapshot,
}

impl<'a> AlphabeticTieBreaker<'a> {
    pub fn new(snapshot: &'a MixinSnapshot) -> Self {
        Self { snapshot }
    }

    fn accepts_alphabetic_ordering(&self, id: UnitId) -> bool {
        self.snapshot
            .unit(id)
            .map(|unit| unit.accepts_alphabetic_ordering)
            .unwrap_or(false)
    }
}

impl TieBreaker<UnitId> for AlphabeticTieBreaker<'_> {
    type Error = OrderingError;

    fn resolve_tie(&self, candidates: &[UnitId]) -> Result<UnitId, OrderingError> {
        let strict = candidates
            .iter()
            .filter(|&&id| !self.accepts_alphabetic_ordering(id))
            .count();

        if strict >= 2 {
            return Err(OrderingError::OrderingAmbiguous {
                target_type: self.snapshot.target_type().to_string(),
                candidates: candidates
                    .iter()
                    .map(|&id| self.snapshot.name(id).to_string())
                    .collect(),
            });
        }

        let chosen = candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.snapshot.name(a).cmp(self.snapshot.name(b)))
            .ok_or_else(|| OrderingError::OrderingAmbiguous {
                target_type: self.snapshot.target_type().to_string(),
                candidates: Vec::new(),
            })?;

        debug!(
            target_type = self.snapshot.target_type(),
            candidates = candidates.len(),
            chosen = self.snapshot.name(chosen),
            "Resolved ordering tie alphabetically"
        );

        Ok(chosen)
    }
}
