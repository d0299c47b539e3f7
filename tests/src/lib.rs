//! # Mixin Ordering Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Snapshot generators shared by flows and benches
//! └── integration/      # Service + cache + logging flows
//! tests/benches/
//! └── ordering_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mixin-tests
//!
//! # By category
//! cargo test -p mixin-tests integration::
//!
//! # Benchmarks
//! cargo bench -p mixin-tests
//! ```

pub mod fixtures;
