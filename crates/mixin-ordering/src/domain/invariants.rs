//! Domain invariants for mixin ordering
//!
//! Checked by the service when `verify_invariants` is enabled and by the test
//! suites against every accepted order.

use super::entities::{CompositionOrder, Group, MixinSnapshot};
use super::value_objects::UnitId;
use std::collections::{HashMap, HashSet};

/// INVARIANT-1: Dependency Respect
/// For every resolved dependency (A depends on B), B is placed before A.
pub fn invariant_dependencies_respected(order: &CompositionOrder, snapshot: &MixinSnapshot) -> bool {
    let positions: HashMap<UnitId, usize> = order
        .entries
        .iter()
        .map(|entry| (entry.unit, entry.index))
        .collect();

    for unit in snapshot.units() {
        let Some(&dependent) = positions.get(&unit.id) else {
            return false;
        };
        for implementer in unit.order_relevant_implementers() {
            match positions.get(&implementer) {
                Some(&dependency) if dependency < dependent => {}
                _ => return false,
            }
        }
    }

    true
}

/// INVARIANT-2: Partition Completeness
/// Every mixin belongs to exactly one group.
pub fn invariant_partition_complete(groups: &[Group], snapshot: &MixinSnapshot) -> bool {
    let mut seen = HashSet::with_capacity(snapshot.len());

    for group in groups {
        for &member in &group.members {
            if snapshot.unit(member).is_none() || !seen.insert(member) {
                return false;
            }
        }
    }

    seen.len() == snapshot.len()
}

/// INVARIANT-3: Shared Override Contiguity
/// Mixins overriding the same base operation belong to the same group, and
/// the members of every group occupy one contiguous range of positions.
pub fn invariant_shared_overrides_contiguous(
    order: &CompositionOrder,
    groups: &[Group],
    snapshot: &MixinSnapshot,
) -> bool {
    let positions: HashMap<UnitId, usize> = order
        .entries
        .iter()
        .map(|entry| (entry.unit, entry.index))
        .collect();

    let mut group_of: HashMap<UnitId, usize> = HashMap::with_capacity(snapshot.len());
    for (ordinal, group) in groups.iter().enumerate() {
        let mut placed = Vec::with_capacity(group.len());
        for &member in &group.members {
            let Some(&position) = positions.get(&member) else {
                return false;
            };
            placed.push(position);
            group_of.insert(member, ordinal);
        }

        if let (Some(&min), Some(&max)) = (placed.iter().min(), placed.iter().max()) {
            if max - min + 1 != placed.len() {
                return false;
            }
        }
    }

    snapshot.shared_operations().all(|(_, owners)| {
        let mut ordinals = owners.iter().map(|owner| group_of.get(owner));
        let first = ordinals.next().flatten();
        first.is_some() && ordinals.all(|ordinal| ordinal == first)
    })
}

/// INVARIANT-4: Completeness
/// Every mixin is placed exactly once and positions are `0..len`.
pub fn invariant_order_complete(order: &CompositionOrder, snapshot: &MixinSnapshot) -> bool {
    let placed: HashSet<UnitId> = order.entries.iter().map(|entry| entry.unit).collect();
    let all: HashSet<UnitId> = snapshot.ids().collect();

    placed.len() == order.len()
        && placed == all
        && order
            .entries
            .iter()
            .enumerate()
            .all(|(position, entry)| entry.index == position)
}
