//! Hook dispatcher — folds an extension point's subscriber chain over an
//! initial value.
//!
//! The fold is strictly sequential: subscriber N always observes subscriber
//! N-1's output, which is what lets later plugins deterministically override
//! earlier ones. A failing subscriber is skipped and the fold continues with
//! the pre-failure accumulator; one misbehaving plugin must not abort page
//! rendering.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use tessera_core::types::provider::ProviderEntry;
use tessera_core::types::route::RouteEntry;

use super::args::HookArgs;
use super::point::HookPoint;
use super::registry::HookRegistry;
use super::transform::{HookTransform, HookValue};

/// A subscriber-reported priority hint, surfaced as trigger metadata.
#[derive(Debug, Clone)]
pub struct PriorityHint {
    /// The reporting subscriber.
    pub subscriber: String,
    /// The proposed effective priority.
    pub hint: i32,
}

/// A subscriber failure recorded during a trigger.
#[derive(Debug, Clone)]
pub struct SubscriberFailure {
    /// The failing subscriber.
    pub subscriber: String,
    /// The failure message.
    pub error: String,
}

/// The result of dispatching an extension point.
#[derive(Debug, Clone)]
pub struct TriggerResult {
    /// The cumulative transformed value.
    pub value: HookValue,
    /// Side-channel metadata reported by subscribers.
    pub hints: Vec<PriorityHint>,
    /// Subscribers that failed during this trigger, in execution order.
    pub failures: Vec<SubscriberFailure>,
}

impl TriggerResult {
    /// The folded route list, or empty if the value is another category.
    pub fn into_routes(self) -> Vec<RouteEntry> {
        match self.value {
            HookValue::Routes(routes) => routes,
            _ => Vec::new(),
        }
    }

    /// The folded provider list, or empty if the value is another category.
    pub fn into_providers(self) -> Vec<ProviderEntry> {
        match self.value {
            HookValue::Providers(providers) => providers,
            _ => Vec::new(),
        }
    }

    /// The folded JSON value, or `Null` if the value is another category.
    pub fn into_json(self) -> Value {
        match self.value {
            HookValue::Value(value) => value,
            _ => Value::Null,
        }
    }
}

/// Dispatches extension points against a shared [`HookRegistry`].
#[derive(Debug, Clone)]
pub struct HookDispatcher {
    registry: Arc<HookRegistry>,
}

impl HookDispatcher {
    /// Creates a dispatcher over the given registry.
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self { registry }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }

    /// Triggers an extension point, folding its subscriber chain over
    /// `initial`.
    ///
    /// The first trigger locks the point against further subscription;
    /// triggering again is legal and re-runs the chain on the new initial
    /// value. With no subscribers the input is returned unchanged.
    pub async fn trigger(
        &self,
        point: &HookPoint,
        initial: HookValue,
        args: &HookArgs,
    ) -> TriggerResult {
        let subscriptions = self.registry.snapshot_and_lock(point).await;

        let mut result = TriggerResult {
            value: initial,
            hints: Vec::new(),
            failures: Vec::new(),
        };

        if subscriptions.is_empty() {
            return result;
        }

        debug!(
            hook = %point,
            subscribers = subscriptions.len(),
            "Dispatching hook"
        );

        for subscription in &subscriptions {
            match apply_transform(&subscription.transform, &result.value, args).await {
                Ok((value, hint)) => {
                    if let Some(hint) = hint {
                        result.hints.push(PriorityHint {
                            subscriber: subscription.subscriber.clone(),
                            hint,
                        });
                    }
                    result.value = value;
                }
                Err(message) => {
                    warn!(
                        hook = %point,
                        subscriber = %subscription.subscriber,
                        error = %message,
                        "Hook subscriber failed; continuing with previous value"
                    );
                    result.failures.push(SubscriberFailure {
                        subscriber: subscription.subscriber.clone(),
                        error: message,
                    });
                }
            }
        }

        result
    }
}

/// Applies one transform to the current accumulator.
///
/// Returns the new accumulator and any priority hint, or an error message
/// when the transform fails or its category does not match the value.
async fn apply_transform(
    transform: &HookTransform,
    value: &HookValue,
    args: &HookArgs,
) -> Result<(HookValue, Option<i32>), String> {
    match (transform, value) {
        (HookTransform::Routes(t), HookValue::Routes(routes)) => t
            .apply(routes, args)
            .await
            .map(|c| (HookValue::Routes(c.value), c.priority_hint))
            .map_err(|e| e.to_string()),
        (HookTransform::Providers(t), HookValue::Providers(providers)) => t
            .apply(providers, args)
            .await
            .map(|c| (HookValue::Providers(c.value), c.priority_hint))
            .map_err(|e| e.to_string()),
        (HookTransform::Value(t), HookValue::Value(json)) => t
            .apply(json, args)
            .await
            .map(|c| (HookValue::Value(c.value), c.priority_hint))
            .map_err(|e| e.to_string()),
        (transform, value) => Err(format!(
            "transform category '{}' does not match value category '{}'",
            transform.category(),
            value.category()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::transform::{value_fn, Contribution};
    use serde_json::json;
    use tessera_core::error::AppError;

    fn append_str(suffix: &'static str) -> HookTransform {
        HookTransform::Value(value_fn(move |value, _args| {
            let current = value.as_str().unwrap_or_default();
            Ok(Contribution::new(json!(format!("{current}{suffix}"))))
        }))
    }

    async fn setup() -> (Arc<HookRegistry>, HookDispatcher) {
        let registry = Arc::new(HookRegistry::new());
        let dispatcher = HookDispatcher::new(Arc::clone(&registry));
        (registry, dispatcher)
    }

    #[tokio::test]
    async fn test_zero_subscribers_returns_input_unchanged() {
        let (_registry, dispatcher) = setup().await;
        let point = HookPoint::new("test", "empty");

        let result = dispatcher
            .trigger(&point, HookValue::Value(json!("unchanged")), &HookArgs::new())
            .await;

        assert_eq!(result.into_json(), json!("unchanged"));
    }

    #[tokio::test]
    async fn test_priority_order_independent_of_subscription_order() {
        let (registry, dispatcher) = setup().await;
        let point = HookPoint::new("test", "ordered");

        registry
            .subscribe(point.clone(), "third", 30, append_str("c"))
            .await
            .unwrap();
        registry
            .subscribe(point.clone(), "first", 10, append_str("a"))
            .await
            .unwrap();
        registry
            .subscribe(point.clone(), "second", 20, append_str("b"))
            .await
            .unwrap();

        let result = dispatcher
            .trigger(&point, HookValue::Value(json!("")), &HookArgs::new())
            .await;

        assert_eq!(result.into_json(), json!("abc"));
    }

    #[tokio::test]
    async fn test_equal_priorities_keep_registration_order() {
        let (registry, dispatcher) = setup().await;
        let point = HookPoint::new("test", "ties");

        registry
            .subscribe(point.clone(), "a", 10, append_str("a"))
            .await
            .unwrap();
        registry
            .subscribe(point.clone(), "b", 10, append_str("b"))
            .await
            .unwrap();

        let result = dispatcher
            .trigger(&point, HookValue::Value(json!("")), &HookArgs::new())
            .await;

        assert_eq!(result.into_json(), json!("ab"));
    }

    #[tokio::test]
    async fn test_failing_subscriber_is_skipped_and_recorded_once() {
        let (registry, dispatcher) = setup().await;
        let point = HookPoint::new("test", "failure");

        registry
            .subscribe(point.clone(), "a", 10, append_str("a"))
            .await
            .unwrap();
        registry
            .subscribe(
                point.clone(),
                "b",
                20,
                HookTransform::Value(value_fn(|_value, _args| {
                    Err(AppError::subscriber("boom"))
                })),
            )
            .await
            .unwrap();
        registry
            .subscribe(point.clone(), "c", 30, append_str("c"))
            .await
            .unwrap();

        let result = dispatcher
            .trigger(&point, HookValue::Value(json!("")), &HookArgs::new())
            .await;

        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].subscriber, "b");
        assert_eq!(result.into_json(), json!("ac"));
    }

    #[tokio::test]
    async fn test_category_mismatch_is_recorded_as_failure() {
        let (registry, dispatcher) = setup().await;
        let point = HookPoint::new("test", "mismatch");

        registry
            .subscribe(point.clone(), "routes-on-value", 10, {
                HookTransform::Routes(crate::hooks::transform::route_fn(|routes, _args| {
                    Ok(Contribution::new(routes.to_vec()))
                }))
            })
            .await
            .unwrap();
        registry
            .subscribe(point.clone(), "ok", 20, append_str("x"))
            .await
            .unwrap();

        let result = dispatcher
            .trigger(&point, HookValue::Value(json!("")), &HookArgs::new())
            .await;

        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].subscriber, "routes-on-value");
        assert_eq!(result.into_json(), json!("x"));
    }

    #[tokio::test]
    async fn test_priority_hint_is_metadata_not_accumulator() {
        let (registry, dispatcher) = setup().await;
        let point = HookPoint::new("test", "hints");

        registry
            .subscribe(
                point.clone(),
                "hinting",
                10,
                HookTransform::Value(value_fn(|value, _args| {
                    Ok(Contribution::with_hint(value.clone(), 42))
                })),
            )
            .await
            .unwrap();

        let result = dispatcher
            .trigger(&point, HookValue::Value(json!({"k": 1})), &HookArgs::new())
            .await;

        assert_eq!(result.hints.len(), 1);
        assert_eq!(result.hints[0].hint, 42);
        assert_eq!(result.into_json(), json!({"k": 1}));
    }

    #[tokio::test]
    async fn test_retrigger_reruns_chain_on_new_initial_value() {
        let (registry, dispatcher) = setup().await;
        let point = HookPoint::new("test", "retrigger");

        registry
            .subscribe(point.clone(), "a", 10, append_str("!"))
            .await
            .unwrap();

        let first = dispatcher
            .trigger(&point, HookValue::Value(json!("one")), &HookArgs::new())
            .await;
        let second = dispatcher
            .trigger(&point, HookValue::Value(json!("two")), &HookArgs::new())
            .await;

        assert_eq!(first.into_json(), json!("one!"));
        assert_eq!(second.into_json(), json!("two!"));
    }

    #[tokio::test]
    async fn test_args_are_visible_to_subscribers() {
        let (registry, dispatcher) = setup().await;
        let point = HookPoint::new("test", "args");

        registry
            .subscribe(
                point.clone(),
                "reader",
                10,
                HookTransform::Value(value_fn(|_value, args| {
                    Ok(Contribution::new(json!(args.get_str("who").unwrap_or("?"))))
                })),
            )
            .await
            .unwrap();

        let result = dispatcher
            .trigger(
                &point,
                HookValue::Value(Value::Null),
                &HookArgs::new().with_str("who", "tessera"),
            )
            .await;

        assert_eq!(result.into_json(), json!("tessera"));
    }
}
