//! # Mixin Ordering
//!
//! Deterministic linearization of the mixins attached to one composition
//! target. Mixins that depend on each other, or override the same base
//! operation, are grouped; each group is sorted topologically with an
//! alphabetic fallback for mixins that allow it, and the groups are
//! concatenated by the name of their first mixin.
//!
//! ## Architecture
//!
//! - **Domain**: Snapshot, groups, composition order, errors, invariants
//! - **Algorithms**: Grouper, generic topological sort, direct dependency analyzer, alphabetic tie breaker
//! - **Ports**: Inbound (MixinOrderingApi) and Outbound (DependencyAnalyzer, TieBreaker)
//! - **Application**: Service orchestration
//! - **Adapters**: Fingerprint-keyed order cache
//!
//! ## Example
//!
//! ```rust
//! use mixin_ordering::{MixinOrderingApi, MixinOrderingService, MixinSnapshot};
//!
//! let mut builder = MixinSnapshot::builder("Customer");
//! let audit = builder.add_unit("AuditMixin", false);
//! let store = builder.add_unit("StoreMixin", false);
//! builder.depends_on(audit, store);
//! let snapshot = builder.build().unwrap();
//!
//! let order = MixinOrderingService::new().build_order(&snapshot).unwrap();
//! assert_eq!(order.names(), vec!["StoreMixin", "AuditMixin"]);
//! ```

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

pub use adapters::MemoizedOrdering;
pub use algorithms::topological_sort;
pub use application::service::MixinOrderingService;
pub use config::OrderingConfig;
pub use domain::entities::*;
pub use domain::errors::{ConfigError, OrderingError, SnapshotError, SortError};
pub use domain::value_objects::*;
pub use ports::inbound::MixinOrderingApi;
pub use ports::outbound::{DependencyAnalyzer, TieBreaker};
pub use telemetry::{init_logging, LoggingConfig, TelemetryError};
