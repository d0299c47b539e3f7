//! Memoizing Ordering Adapter
//!
//! Wraps any `MixinOrderingApi` and remembers successful orders keyed by
//! snapshot fingerprint. The cache is owned by the caller; the engine
//! itself keeps no state between calls.

use crate::domain::entities::{CompositionOrder, Group, MixinSnapshot, OrderedGroup};
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::{SnapshotFingerprint, UnitId};
use crate::ports::inbound::MixinOrderingApi;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Fingerprint-keyed order cache in front of an ordering service.
///
/// Failures are never cached, so a snapshot that failed once is
/// re-evaluated on the next call.
pub struct MemoizedOrdering<S> {
    inner: S,
    orders: RwLock<HashMap<SnapshotFingerprint, CompositionOrder>>,
}

impl<S: MixinOrderingApi> MemoizedOrdering<S> {
    /// Wrap a service with an empty cache.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            orders: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drop the cached order for one snapshot. Returns whether one existed.
    pub fn invalidate(&self, fingerprint: &SnapshotFingerprint) -> bool {
        let removed = self.orders.write().remove(fingerprint).is_some();
        if removed {
            debug!(fingerprint = %fingerprint, "Invalidated cached mixin order");
        }
        removed
    }

    /// Drop every cached order.
    pub fn clear(&self) {
        self.orders.write().clear();
    }

    pub fn len(&self) -> usize {
        self.orders.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.read().is_empty()
    }

    pub fn contains(&self, fingerprint: &SnapshotFingerprint) -> bool {
        self.orders.read().contains_key(fingerprint)
    }
}

impl<S: MixinOrderingApi> MixinOrderingApi for MemoizedOrdering<S> {
    fn build_order(&self, snapshot: &MixinSnapshot) -> Result<CompositionOrder, OrderingError> {
        let fingerprint = snapshot.fingerprint();

        let cached = self
            .orders
            .read()
            .get(&fingerprint)
            .and_then(|order| rebind(order, snapshot));
        if let Some(order) = cached {
            trace!(fingerprint = %fingerprint, "Mixin order cache hit");
            return Ok(order);
        }

        // Computed outside the lock; concurrent misses may both compute.
        let order = self.inner.build_order(snapshot)?;
        self.orders.write().insert(fingerprint, order.clone());
        debug!(
            fingerprint = %fingerprint,
            target_type = snapshot.target_type(),
            "Cached mixin order"
        );

        Ok(order)
    }

    fn group_units(&self, snapshot: &MixinSnapshot) -> Vec<Group> {
        self.inner.group_units(snapshot)
    }

    fn sort_group(
        &self,
        snapshot: &MixinSnapshot,
        group: &Group,
    ) -> Result<OrderedGroup, OrderingError> {
        self.inner.sort_group(snapshot, group)
    }
}

/// Re-key a cached order onto the unit ids of `snapshot`.
///
/// Equal fingerprints mean equal names, but ids follow insertion order,
/// which may differ between the snapshot that filled the cache and this one.
fn rebind(order: &CompositionOrder, snapshot: &MixinSnapshot) -> Option<CompositionOrder> {
    let ids: HashMap<&str, UnitId> = snapshot
        .units()
        .iter()
        .map(|unit| (unit.name.as_str(), unit.id))
        .collect();

    let mut rebound = order.clone();
    for entry in &mut rebound.entries {
        entry.unit = *ids.get(entry.name.as_str())?;
    }
    Some(rebound)
}
