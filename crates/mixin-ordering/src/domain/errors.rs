//! Error types for mixin ordering
//!
//! Both ordering failures are terminal for the request: no partial order is
//! ever returned alongside them.

use super::value_objects::UnitId;
use std::fmt;
use thiserror::Error;

/// All errors that can occur while building a composition order
#[derive(Debug, Error)]
pub enum OrderingError {
    /// Two or more simultaneously eligible mixins lack alphabetic ordering
    #[error(
        "Mixins of target type '{target_type}' cannot be ordered unambiguously: [{}]; declare explicit dependencies between them",
        .candidates.join(", ")
    )]
    OrderingAmbiguous {
        target_type: String,
        candidates: Vec<String>,
    },

    /// A group's dependency edges form a cycle
    #[error(
        "Cyclic dependencies between mixins of target type '{target_type}': [{}]",
        .members.join(", ")
    )]
    CyclicMixinGroup {
        target_type: String,
        members: Vec<String>,
    },

    /// Unit count exceeded limits
    #[error("Too many mixins: {count} > {max}")]
    TooManyUnits { count: usize, max: usize },

    /// Dependency edge count exceeded limits
    #[error("Too many dependency edges: {count} > {max}")]
    TooManyDependencyEdges { count: usize, max: usize },

    /// The supplied snapshot is malformed
    #[error("Invalid mixin snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),

    /// A produced order broke one of the ordering invariants
    #[error("Ordering invariant '{invariant}' violated for target type '{target_type}'")]
    InvariantViolation {
        target_type: String,
        invariant: &'static str,
    },
}

/// Errors raised while assembling or loading a [`MixinSnapshot`](super::entities::MixinSnapshot)
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Target type name is empty")]
    EmptyTargetType,

    #[error("Duplicate mixin name '{name}' on target type '{target_type}'")]
    DuplicateName { target_type: String, name: String },

    #[error("Unknown mixin {0}")]
    UnknownUnit(UnitId),

    #[error("Mixin '{unit}' depends on {implementer}, which is not part of the snapshot")]
    UnknownImplementer { unit: String, implementer: UnitId },

    #[error("Mixin '{unit}' depends on unknown mixin '{implementer}'")]
    UnknownImplementerName { unit: String, implementer: String },

    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Limit '{0}' must be greater than zero")]
    ZeroLimit(&'static str),
}

/// Failure of the generic topological sort.
///
/// `T` is the sorted item, `E` the tie breaker's error type.
#[derive(Debug, Error)]
pub enum SortError<T: fmt::Debug, E: std::error::Error + 'static> {
    /// No remaining item can become eligible; the residual set is returned
    #[error("Circular dependencies among {0:?}")]
    CircularDependencies(Vec<T>),

    /// The tie breaker could not choose between eligible items
    #[error(transparent)]
    TieBreak(E),
}
