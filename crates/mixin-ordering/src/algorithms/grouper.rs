//! Mixin Grouper
//!
//! Partitions a snapshot into groups connected by dependency edges and
//! shared-override edges (both treated as undirected for reachability).
//!
//! Absorption follows outgoing dependencies and override peers from each
//! seed. A completion pass then pulls in remaining mixins that depend on a
//! member, repeated until nothing more joins.

use crate::domain::entities::{Group, MixinSnapshot};
use crate::domain::value_objects::UnitId;
use tracing::trace;

/// Partition all mixins of the snapshot into disjoint groups.
///
/// Members are sorted by ordinal display name and groups by their first
/// member, so the result does not depend on insertion order.
pub fn group_units(snapshot: &MixinSnapshot) -> Vec<Group> {
    // Arena slot per unit: the group it was absorbed into.
    let mut assignment: Vec<Option<usize>> = vec![None; snapshot.len()];
    let mut groups = Vec::new();

    for seed in snapshot.ids() {
        if assignment[seed.as_usize()].is_some() {
            continue;
        }

        let members = expand_group(snapshot, seed, groups.len(), &mut assignment);
        trace!(
            seed = snapshot.name(seed),
            members = members.len(),
            "Expanded mixin group"
        );
        groups.push(Group::new(members));
    }

    // Names are unique, so first members never tie.
    groups.sort_by(|a: &Group, b: &Group| {
        let first_a = a.members.first().map(|&id| snapshot.name(id));
        let first_b = b.members.first().map(|&id| snapshot.name(id));
        first_a.cmp(&first_b)
    });

    groups
}

/// Build the closure group of `seed` under ordinal `group`.
fn expand_group(
    snapshot: &MixinSnapshot,
    seed: UnitId,
    group: usize,
    assignment: &mut [Option<usize>],
) -> Vec<UnitId> {
    let mut members = Vec::new();
    absorb(snapshot, seed, group, assignment, &mut members);

    // Completion pass, to a fixed point: dependency direction does not
    // follow absorption order, so dependents of members may still remain.
    loop {
        let stragglers: Vec<UnitId> = snapshot
            .units()
            .iter()
            .filter(|unit| assignment[unit.id.as_usize()].is_none())
            .filter(|unit| {
                unit.order_relevant_implementers()
                    .any(|implementer| assignment[implementer.as_usize()] == Some(group))
            })
            .map(|unit| unit.id)
            .collect();

        if stragglers.is_empty() {
            break;
        }

        for straggler in stragglers {
            absorb(snapshot, straggler, group, assignment, &mut members);
        }
    }

    members.sort_by(|&a, &b| snapshot.name(a).cmp(snapshot.name(b)));
    members
}

/// Worklist absorption of `start` and everything it reaches.
fn absorb(
    snapshot: &MixinSnapshot,
    start: UnitId,
    group: usize,
    assignment: &mut [Option<usize>],
    members: &mut Vec<UnitId>,
) {
    let mut stack = vec![start];

    while let Some(id) = stack.pop() {
        let slot = id.as_usize();
        if assignment[slot].is_some() {
            continue;
        }
        assignment[slot] = Some(group);
        members.push(id);

        let Some(unit) = snapshot.unit(id) else {
            continue;
        };

        stack.extend(
            unit.order_relevant_implementers()
                .filter(|implementer| assignment[implementer.as_usize()].is_none()),
        );

        for record in &unit.overrides {
            stack.extend(
                snapshot
                    .overriders_of(&record.base_operation)
                    .iter()
                    .copied()
                    .filter(|peer| assignment[peer.as_usize()].is_none()),
            );
        }
    }
}
