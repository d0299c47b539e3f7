//! Value objects for mixin ordering
//!
//! Identities and small relations shared by the snapshot, the algorithms and
//! the ordering service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a mixin inside one [`MixinSnapshot`](super::entities::MixinSnapshot).
///
/// Units are compared by id, never by display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub(crate) usize);

impl UnitId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit_{}", self.0)
    }
}

/// A shared base operation that mixins may override.
///
/// Two mixins overriding the same base operation chain around each other,
/// so their relative order is observable even without a declared dependency.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseOperation(String);

impl BaseOperation {
    pub fn new(signature: impl Into<String>) -> Self {
        Self(signature.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BaseOperation {
    fn from(signature: &str) -> Self {
        Self::new(signature)
    }
}

/// Direct ordering relation between two units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyRelation {
    /// No declared dependency in either direction
    None,
    /// The first unit depends on the second (second runs first)
    FirstDependsOnSecond,
    /// The second unit depends on the first (first runs first)
    SecondDependsOnFirst,
}

/// SHA-256 digest identifying the logical content of a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotFingerprint(pub [u8; 32]);

impl SnapshotFingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for SnapshotFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
