//! Hook registry — subscribers register transforms by extension point with
//! priority ordering.
//!
//! Subscription is a boot-phase operation: the first trigger of a point
//! locks it against further subscription so the chain's ordering cannot
//! change mid-request. Repeated triggers of an already-locked point are
//! legal.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use tessera_core::error::AppError;
use tessera_core::result::AppResult;

use super::point::HookPoint;
use super::transform::HookTransform;

/// One registered subscriber of an extension point.
#[derive(Debug, Clone)]
pub struct Subscription {
    /// Opaque subscriber identity (typically the contributing plugin name).
    pub subscriber: String,
    /// Execution priority; lower runs first.
    pub priority: i32,
    /// Registration sequence number, breaking priority ties.
    seq: u64,
    /// The registered callback.
    pub transform: HookTransform,
}

#[derive(Debug, Default)]
struct PointState {
    subscriptions: Vec<Subscription>,
    triggered: bool,
}

/// Registry of hook subscriptions organized by extension point.
///
/// One explicitly constructed instance is shared by handle across the
/// plugin manager, aggregators, and component renderer. There is no
/// ambient global registry, so tests build isolated instances.
#[derive(Debug, Default)]
pub struct HookRegistry {
    points: RwLock<HashMap<HookPoint, PointState>>,
    next_seq: AtomicU64,
}

impl HookRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a transform for an extension point.
    ///
    /// Fails with a late-registration error once the point has been
    /// triggered. Registering the identical `(point, subscriber, transform)`
    /// triple again is an idempotent no-op.
    pub async fn subscribe(
        &self,
        point: HookPoint,
        subscriber: &str,
        priority: i32,
        transform: HookTransform,
    ) -> AppResult<()> {
        let mut points = self.points.write().await;
        let state = points.entry(point.clone()).or_default();

        if state.triggered {
            warn!(
                hook = %point,
                subscriber = %subscriber,
                "Rejecting subscription: extension point already triggered"
            );
            return Err(AppError::late_registration(format!(
                "extension point '{point}' is locked; '{subscriber}' subscribed too late"
            )));
        }

        let duplicate = state
            .subscriptions
            .iter()
            .any(|s| s.subscriber == subscriber && s.transform.same_callback(&transform));
        if duplicate {
            debug!(
                hook = %point,
                subscriber = %subscriber,
                "Skipping duplicate subscription"
            );
            return Ok(());
        }

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        state.subscriptions.push(Subscription {
            subscriber: subscriber.to_string(),
            priority,
            seq,
            transform,
        });
        // Stable sort: equal priorities keep registration order via seq.
        state.subscriptions.sort_by_key(|s| (s.priority, s.seq));

        info!(
            hook = %point,
            subscriber = %subscriber,
            priority = priority,
            "Hook subscriber registered"
        );

        Ok(())
    }

    /// Marks the point triggered and returns its ordered subscriptions.
    ///
    /// A point with no subscribers is still locked so that subscriptions
    /// arriving after its first trigger are rejected.
    pub(crate) async fn snapshot_and_lock(&self, point: &HookPoint) -> Vec<Subscription> {
        let mut points = self.points.write().await;
        let state = points.entry(point.clone()).or_default();
        state.triggered = true;
        state.subscriptions.clone()
    }

    /// Whether the point has been triggered at least once.
    pub async fn is_triggered(&self, point: &HookPoint) -> bool {
        let points = self.points.read().await;
        points.get(point).map(|s| s.triggered).unwrap_or(false)
    }

    /// Number of subscribers registered for a point.
    pub async fn subscriber_count(&self, point: &HookPoint) -> usize {
        let points = self.points.read().await;
        points.get(point).map(|s| s.subscriptions.len()).unwrap_or(0)
    }

    /// All points with at least one subscription or trigger.
    pub async fn registered_points(&self) -> Vec<HookPoint> {
        let points = self.points.read().await;
        points.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::transform::value_fn;
    use crate::hooks::transform::Contribution;

    fn noop_value_transform() -> HookTransform {
        HookTransform::Value(value_fn(|value, _args| Ok(Contribution::new(value.clone()))))
    }

    #[tokio::test]
    async fn test_subscribe_counts() {
        let registry = HookRegistry::new();
        let point = HookPoint::new("test", "event");

        registry
            .subscribe(point.clone(), "a", 10, noop_value_transform())
            .await
            .unwrap();
        registry
            .subscribe(point.clone(), "b", 5, noop_value_transform())
            .await
            .unwrap();

        assert_eq!(registry.subscriber_count(&point).await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_idempotent() {
        let registry = HookRegistry::new();
        let point = HookPoint::new("test", "event");
        let callback = value_fn(|value, _args| Ok(Contribution::new(value.clone())));

        registry
            .subscribe(
                point.clone(),
                "a",
                10,
                HookTransform::Value(callback.clone()),
            )
            .await
            .unwrap();
        registry
            .subscribe(point.clone(), "a", 10, HookTransform::Value(callback))
            .await
            .unwrap();

        assert_eq!(registry.subscriber_count(&point).await, 1);
    }

    #[tokio::test]
    async fn test_distinct_closures_are_distinct_subscriptions() {
        let registry = HookRegistry::new();
        let point = HookPoint::new("test", "event");

        registry
            .subscribe(point.clone(), "a", 10, noop_value_transform())
            .await
            .unwrap();
        registry
            .subscribe(point.clone(), "a", 10, noop_value_transform())
            .await
            .unwrap();

        assert_eq!(registry.subscriber_count(&point).await, 2);
    }

    #[tokio::test]
    async fn test_late_registration_rejected_and_list_unchanged() {
        let registry = HookRegistry::new();
        let point = HookPoint::new("test", "event");

        registry
            .subscribe(point.clone(), "early", 10, noop_value_transform())
            .await
            .unwrap();

        registry.snapshot_and_lock(&point).await;

        let err = registry
            .subscribe(point.clone(), "late", 1, noop_value_transform())
            .await
            .unwrap_err();
        assert_eq!(err.kind, tessera_core::error::ErrorKind::LateRegistration);
        assert_eq!(registry.subscriber_count(&point).await, 1);
    }

    #[tokio::test]
    async fn test_trigger_locks_point_with_no_subscribers() {
        let registry = HookRegistry::new();
        let point = HookPoint::new("test", "event");

        registry.snapshot_and_lock(&point).await;

        assert!(registry.is_triggered(&point).await);
        let err = registry
            .subscribe(point.clone(), "late", 1, noop_value_transform())
            .await
            .unwrap_err();
        assert_eq!(err.kind, tessera_core::error::ErrorKind::LateRegistration);
    }
}
