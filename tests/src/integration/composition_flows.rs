//! # Composition Flows
//!
//! Tests the ordering service, the caller-owned cache and the logging setup
//! working together.
//!
//! ## Flows Tested:
//!
//! 1. **JSON snapshot → service → order**: metadata handed over as JSON
//! 2. **Cache in front of service**: repeated and reshuffled snapshots
//! 3. **Concurrent callers**: independent target types ordered in parallel
//! 4. **Failure reporting**: errors carry target type and mixin names

#[cfg(test)]
mod tests {
    use crate::fixtures::{chain_snapshot, random_snapshot, star_snapshot, wide_snapshot};
    use mixin_ordering::domain::invariants::{
        invariant_dependencies_respected, invariant_order_complete,
        invariant_shared_overrides_contiguous,
    };
    use mixin_ordering::{
        init_logging, LoggingConfig, MemoizedOrdering, MixinOrderingApi, MixinOrderingService,
        MixinSnapshot, OrderingConfig, OrderingError,
    };
    use serde_json::json;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn make_verifying_service() -> MixinOrderingService {
        MixinOrderingService::with_config(OrderingConfig {
            verify_invariants: true,
            ..Default::default()
        })
    }

    fn init_test_logging() {
        // Only the first call installs the subscriber
        let _ = init_logging(&LoggingConfig {
            log_level: "mixin_ordering=debug".to_string(),
            json_logs: false,
        });
    }

    // =============================================================================
    // JSON SNAPSHOT FLOW
    // =============================================================================

    #[test]
    fn test_json_document_to_order() {
        init_test_logging();
        let document = json!({
            "target_type": "Invoice",
            "units": [
                {
                    "name": "TaxMixin",
                    "accepts_alphabetic_ordering": true,
                    "dependencies": [{ "requirement": "ILineItems", "implementer": "LineItemsMixin" }],
                    "overrides": ["Total()"]
                },
                {
                    "name": "DiscountMixin",
                    "accepts_alphabetic_ordering": true,
                    "overrides": ["Total()"]
                },
                {
                    "name": "LineItemsMixin",
                    "accepts_alphabetic_ordering": false
                },
                {
                    "name": "AuditMixin",
                    "accepts_alphabetic_ordering": false,
                    "dependencies": [{ "requirement": "IClock" }]
                }
            ]
        });
        let order = make_verifying_service()
            .build_order_from_json(&document.to_string())
            .unwrap();

        assert_eq!(order.target_type, "Invoice");
        assert_eq!(
            order.names(),
            vec!["AuditMixin", "DiscountMixin", "LineItemsMixin", "TaxMixin"]
        );
        assert_eq!(order.group_count, 2);
    }

    // =============================================================================
    // CACHE FLOW
    // =============================================================================

    #[test]
    fn test_cache_serves_reshuffled_snapshot() {
        init_test_logging();
        let cache = MemoizedOrdering::new(MixinOrderingService::new());

        let mut forward = MixinSnapshot::builder("Order");
        let a = forward.add_unit("Pricing", true);
        let b = forward.add_unit("Shipping", true);
        forward.depends_on(b, a);
        let forward = forward.build().unwrap();

        let mut backward = MixinSnapshot::builder("Order");
        let b = backward.add_unit("Shipping", true);
        let a = backward.add_unit("Pricing", true);
        backward.depends_on(b, a);
        let backward = backward.build().unwrap();

        let first = cache.build_order(&forward).unwrap();
        let second = cache.build_order(&backward).unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(first.names(), second.names());
        assert_eq!(second.index_of(a), Some(0));
        assert_eq!(second.index_of(b), Some(1));
    }

    #[test]
    fn test_cache_keeps_target_types_apart() {
        let cache = MemoizedOrdering::new(MixinOrderingService::new());

        let mut customer = MixinSnapshot::builder("Customer");
        customer.add_unit("Audit", true);
        let mut invoice = MixinSnapshot::builder("Invoice");
        invoice.add_unit("Audit", true);

        let customer_order = cache.build_order(&customer.build().unwrap()).unwrap();
        let invoice_order = cache.build_order(&invoice.build().unwrap()).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(customer_order.target_type, "Customer");
        assert_eq!(invoice_order.target_type, "Invoice");
    }

    // =============================================================================
    // CONCURRENT CALLERS
    // =============================================================================

    #[test]
    fn test_concurrent_callers_share_cache() {
        let cache = MemoizedOrdering::new(MixinOrderingService::new());
        let snapshots: Vec<MixinSnapshot> = (0..8).map(|seed| random_snapshot(64, seed)).collect();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for snapshot in &snapshots {
                        let order = cache.build_order(snapshot).unwrap();
                        assert!(invariant_dependencies_respected(&order, snapshot));
                    }
                });
            }
        });

        assert_eq!(cache.len(), snapshots.len());
    }

    // =============================================================================
    // GENERATED SHAPES
    // =============================================================================

    #[test]
    fn test_generated_shapes_satisfy_invariants() {
        let service = make_verifying_service();
        let shapes = [
            chain_snapshot(200),
            star_snapshot(200),
            wide_snapshot(200),
            random_snapshot(500, 11),
        ];

        for snapshot in &shapes {
            let order = service.build_order(snapshot).unwrap();
            assert!(invariant_order_complete(&order, snapshot));
            assert!(invariant_dependencies_respected(&order, snapshot));
            let groups = service.group_units(snapshot);
            assert!(invariant_shared_overrides_contiguous(&order, &groups, snapshot));
        }
    }

    #[test]
    fn test_star_spokes_follow_hub_alphabetically() {
        let order = MixinOrderingService::new()
            .build_order(&star_snapshot(3))
            .unwrap();

        assert_eq!(
            order.names(),
            vec!["Hub", "Mixin00000", "Mixin00001", "Mixin00002"]
        );
    }

    // =============================================================================
    // FAILURE REPORTING
    // =============================================================================

    #[test]
    fn test_limits_apply_before_ordering() {
        let service = MixinOrderingService::with_config(OrderingConfig {
            max_units: 100,
            ..Default::default()
        });

        let err = service.build_order(&wide_snapshot(101)).unwrap_err();

        assert_eq!(err.to_string(), "Too many mixins: 101 > 100");
    }

    #[test]
    fn test_cycle_error_not_cached() {
        let cache = MemoizedOrdering::new(MixinOrderingService::new());
        let mut builder = MixinSnapshot::builder("Customer");
        let a = builder.add_unit("A", true);
        let b = builder.add_unit("B", true);
        builder.depends_on(a, b);
        builder.depends_on(b, a);
        let snapshot = builder.build().unwrap();

        let err = cache.build_order(&snapshot).unwrap_err();

        assert!(matches!(err, OrderingError::CyclicMixinGroup { .. }));
        assert!(cache.is_empty());
    }
}
