//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::{CompositionOrder, Group, MixinSnapshot, OrderedGroup};
use crate::domain::errors::OrderingError;

/// Primary Mixin Ordering API
///
/// Synchronous and stateless: every call works on its own snapshot.
pub trait MixinOrderingApi: Send + Sync {
    /// Resolve the composition order of all mixins in the snapshot.
    ///
    /// This is the main entry point. It:
    /// 1. Partitions the mixins into independent groups
    /// 2. Sorts every group topologically
    /// 3. Orders the groups by their first-ranked mixin
    /// 4. Flattens them and assigns positions
    fn build_order(&self, snapshot: &MixinSnapshot) -> Result<CompositionOrder, OrderingError>;

    /// Load a snapshot handed over as JSON and resolve its order.
    ///
    /// Malformed or inconsistent documents fail with
    /// [`OrderingError::InvalidSnapshot`].
    fn build_order_from_json(&self, json: &str) -> Result<CompositionOrder, OrderingError> {
        let snapshot = MixinSnapshot::from_json(json)?;
        self.build_order(&snapshot)
    }

    /// Partition the snapshot into connected groups.
    fn group_units(&self, snapshot: &MixinSnapshot) -> Vec<Group>;

    /// Sort one group.
    fn sort_group(
        &self,
        snapshot: &MixinSnapshot,
        group: &Group,
    ) -> Result<OrderedGroup, OrderingError>;
}
