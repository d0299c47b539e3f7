//! Mixin Ordering Service
//!
//! Main service implementing MixinOrderingApi.

use crate::algorithms::{
    group_units, topological_sort, AlphabeticTieBreaker, DirectDependencyAnalyzer,
};
use crate::config::OrderingConfig;
use crate::domain::entities::{CompositionOrder, Group, MixinSnapshot, OrderedGroup};
use crate::domain::errors::{ConfigError, OrderingError, SortError};
use crate::domain::invariants::{
    invariant_dependencies_respected, invariant_order_complete, invariant_partition_complete,
    invariant_shared_overrides_contiguous,
};
use crate::ports::inbound::MixinOrderingApi;

use tracing::{debug, info, warn};

/// Mixin Ordering Service
///
/// Orchestrates the ordering pipeline:
/// 1. Validate input limits
/// 2. Group mixins
/// 3. Sort every group in name order (fails the whole build on the first broken group)
/// 4. Order groups by their first-ranked mixin
/// 5. Flatten and assign positions
pub struct MixinOrderingService {
    config: OrderingConfig,
}

impl MixinOrderingService {
    /// Create a new service with default config
    pub fn new() -> Self {
        Self {
            config: OrderingConfig::default(),
        }
    }

    /// Create a new service with custom config
    pub fn with_config(config: OrderingConfig) -> Self {
        Self { config }
    }

    /// Create a service configured from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = OrderingConfig::from_env();
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    /// Validate unit and edge counts
    fn validate_snapshot(&self, snapshot: &MixinSnapshot) -> Result<(), OrderingError> {
        if snapshot.len() > self.config.max_units {
            return Err(OrderingError::TooManyUnits {
                count: snapshot.len(),
                max: self.config.max_units,
            });
        }

        let edges = snapshot.dependency_edge_count();
        if edges > self.config.max_dependency_edges {
            return Err(OrderingError::TooManyDependencyEdges {
                count: edges,
                max: self.config.max_dependency_edges,
            });
        }

        Ok(())
    }

    /// Order sorted groups by the ordinal name of their first mixin
    fn order_groups(&self, snapshot: &MixinSnapshot, groups: &mut [OrderedGroup]) {
        groups.sort_by(|a, b| {
            let first_a = a.first().map(|id| snapshot.name(id));
            let first_b = b.first().map(|id| snapshot.name(id));
            first_a.cmp(&first_b)
        });
    }

    /// Re-check the ordering invariants against the produced order
    fn verify_invariants(
        &self,
        snapshot: &MixinSnapshot,
        groups: &[Group],
        order: &CompositionOrder,
    ) -> Result<(), OrderingError> {
        let checks = [
            ("partition_complete", invariant_partition_complete(groups, snapshot)),
            ("order_complete", invariant_order_complete(order, snapshot)),
            ("dependencies_respected", invariant_dependencies_respected(order, snapshot)),
            (
                "shared_overrides_contiguous",
                invariant_shared_overrides_contiguous(order, groups, snapshot),
            ),
        ];

        for (invariant, holds) in checks {
            if !holds {
                return Err(OrderingError::InvariantViolation {
                    target_type: snapshot.target_type().to_string(),
                    invariant,
                });
            }
        }

        Ok(())
    }
}

impl Default for MixinOrderingService {
    fn default() -> Self {
        Self::new()
    }
}

impl MixinOrderingApi for MixinOrderingService {
    fn build_order(&self, snapshot: &MixinSnapshot) -> Result<CompositionOrder, OrderingError> {
        // 1. Validate input
        self.validate_snapshot(snapshot)?;

        info!(
            target_type = snapshot.target_type(),
            unit_count = snapshot.len(),
            "Resolving mixin composition order"
        );

        // 2. Group
        let groups = self.group_units(snapshot);
        debug!(group_count = groups.len(), "Grouped mixins");

        // 3. Sort each group
        let mut ordered = Vec::with_capacity(groups.len());
        for group in &groups {
            let sorted = match self.sort_group(snapshot, group) {
                Ok(sorted) => sorted,
                Err(e) => {
                    warn!(
                        target_type = snapshot.target_type(),
                        group_size = group.len(),
                        error = %e,
                        "Mixin group could not be ordered"
                    );
                    return Err(e);
                }
            };
            ordered.push(sorted);
        }

        // 4. Order the groups themselves
        self.order_groups(snapshot, &mut ordered);

        // 5. Flatten and index
        let order = CompositionOrder::new(snapshot, ordered);

        if self.config.verify_invariants {
            self.verify_invariants(snapshot, &groups, &order)?;
        }

        info!(
            target_type = snapshot.target_type(),
            unit_count = order.len(),
            group_count = order.group_count,
            "Mixin composition order complete"
        );

        Ok(order)
    }

    fn group_units(&self, snapshot: &MixinSnapshot) -> Vec<Group> {
        group_units(snapshot)
    }

    fn sort_group(
        &self,
        snapshot: &MixinSnapshot,
        group: &Group,
    ) -> Result<OrderedGroup, OrderingError> {
        let analyzer = DirectDependencyAnalyzer::new(snapshot);
        let tie_breaker = AlphabeticTieBreaker::new(snapshot);

        let sequence = topological_sort(&group.members, &analyzer, &tie_breaker).map_err(
            |err| match err {
                SortError::CircularDependencies(residual) => {
                    let mut members: Vec<String> = residual
                        .iter()
                        .map(|&id| snapshot.name(id).to_string())
                        .collect();
                    members.sort();
                    OrderingError::CyclicMixinGroup {
                        target_type: snapshot.target_type().to_string(),
                        members,
                    }
                }
                SortError::TieBreak(e) => e,
            },
        )?;

        debug!(
            first = sequence.first().map(|&id| snapshot.name(id)),
            size = sequence.len(),
            "Sorted mixin group"
        );

        Ok(OrderedGroup::new(sequence))
    }
}
