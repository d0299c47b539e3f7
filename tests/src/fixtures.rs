//! Snapshot generators.
//!
//! Every generator produces snapshots that order successfully: dependencies
//! only point at earlier mixins and every mixin accepts alphabetic ordering.

use mixin_ordering::{MixinSnapshot, SnapshotBuilder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const TARGET_TYPE: &str = "Customer";

const OPERATIONS: [&str; 4] = ["Save()", "Load()", "Validate()", "ToString()"];

fn mixin_name(i: usize) -> String {
    format!("Mixin{:05}", i)
}

fn finish(builder: SnapshotBuilder) -> MixinSnapshot {
    builder.build().expect("generated snapshot is valid")
}

/// `Mixin00001` depends on `Mixin00000`, and so on: one group, one order.
pub fn chain_snapshot(len: usize) -> MixinSnapshot {
    let mut builder = MixinSnapshot::builder(TARGET_TYPE);
    let mut previous = None;
    for i in 0..len {
        let id = builder.add_unit(mixin_name(i), true);
        if let Some(prev) = previous {
            builder.depends_on(id, prev);
        }
        previous = Some(id);
    }
    finish(builder)
}

/// One hub, `spokes` mixins depending on it and sharing `Save()`.
///
/// All spokes become eligible together, so every step is a tie.
pub fn star_snapshot(spokes: usize) -> MixinSnapshot {
    let mut builder = MixinSnapshot::builder(TARGET_TYPE);
    let hub = builder.add_unit("Hub", true);
    builder.add_override(hub, "Save()");
    for i in 0..spokes {
        let id = builder.add_unit(mixin_name(i), true);
        builder.depends_on(id, hub);
        builder.add_override(id, "Save()");
    }
    finish(builder)
}

/// `len` unrelated mixins: `len` singleton groups.
pub fn wide_snapshot(len: usize) -> MixinSnapshot {
    let mut builder = MixinSnapshot::builder(TARGET_TYPE);
    for i in (0..len).rev() {
        builder.add_unit(mixin_name(i), true);
    }
    finish(builder)
}

/// Random acyclic snapshot, reproducible from `seed`.
pub fn random_snapshot(len: usize, seed: u64) -> MixinSnapshot {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = MixinSnapshot::builder(TARGET_TYPE);
    let mut ids = Vec::with_capacity(len);

    for i in 0..len {
        let id = builder.add_unit(mixin_name(i), true);
        if i > 0 {
            for _ in 0..rng.gen_range(0..=2) {
                let target = ids[rng.gen_range(0..i)];
                builder.depends_on(id, target);
            }
        }
        if rng.gen_bool(0.2) {
            let operation = OPERATIONS[rng.gen_range(0..OPERATIONS.len())];
            builder.add_override(id, operation);
        }
        ids.push(id);
    }

    finish(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generators_sizes() {
        assert_eq!(chain_snapshot(10).len(), 10);
        assert_eq!(star_snapshot(10).len(), 11);
        assert_eq!(wide_snapshot(10).len(), 10);
        assert_eq!(random_snapshot(10, 7).len(), 10);
    }

    #[test]
    fn test_random_snapshot_is_reproducible() {
        assert_eq!(
            random_snapshot(50, 42).fingerprint(),
            random_snapshot(50, 42).fingerprint()
        );
    }
}
