//! Component renderer — drives option filtering, caching, payload assembly,
//! and the per-component `results` extension point.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use tessera_core::result::AppResult;
use tessera_core::traits::cache::CacheProvider;
use tessera_core::traits::component::Component;
use tessera_core::types::component::{CacheKey, ComponentOptions, Payload};

use tessera_plugin::hooks::args::HookArgs;
use tessera_plugin::hooks::dispatcher::HookDispatcher;
use tessera_plugin::hooks::point::HookPoint;
use tessera_plugin::hooks::transform::HookValue;

/// Renders page components into payload mappings.
///
/// Rendering is idempotent with respect to external state: components only
/// fetch read-only data and the `results` trigger re-runs its chain on each
/// call, so a component may be rendered multiple times per request.
#[derive(Debug, Clone)]
pub struct ComponentRenderer {
    dispatcher: Arc<HookDispatcher>,
    cache: Arc<dyn CacheProvider>,
    component_ttl: Duration,
}

impl ComponentRenderer {
    /// Creates a renderer over the shared dispatcher and cache.
    pub fn new(
        dispatcher: Arc<HookDispatcher>,
        cache: Arc<dyn CacheProvider>,
        component_ttl: Duration,
    ) -> Self {
        Self {
            dispatcher,
            cache,
            component_ttl,
        }
    }

    /// Renders a component with the given raw options.
    ///
    /// Unknown option keys are dropped against the component's declared
    /// schema. A [`CacheKey::Key`] probes the cache first and stores the
    /// final payload after rendering; [`CacheKey::Never`] always runs the
    /// full assemble-and-trigger path. Subscribers of the component's
    /// `results` point see the assembled payload and their (possibly
    /// mutated) object is merged back before returning.
    pub async fn render(
        &self,
        component: &dyn Component,
        raw_options: &serde_json::Map<String, Value>,
    ) -> AppResult<Payload> {
        let meta = component.meta();
        let options = ComponentOptions::filtered(&meta.valid_options, raw_options);
        let cache_key = component.cache_key(&options);

        if let CacheKey::Key(key) = &cache_key {
            if let Some(cached) = self.cache.get(key).await? {
                if let Ok(Value::Object(payload)) = serde_json::from_str(&cached) {
                    debug!(component = %meta.name, key = %key, "Component served from cache");
                    return Ok(payload);
                }
                // Unparseable entry: fall through and recompute.
            }
        }

        let assembled = component.assemble(&options).await?;

        let mut args = HookArgs::new();
        for (key, value) in options.iter() {
            args = args.with_value(key, value.clone());
        }

        let point = HookPoint::component_results(&meta.name);
        let result = self
            .dispatcher
            .trigger(&point, HookValue::Value(Value::Object(assembled.clone())), &args)
            .await;

        let mut payload = assembled;
        if let Value::Object(transformed) = result.into_json() {
            for (key, value) in transformed {
                payload.insert(key, value);
            }
        }

        if let CacheKey::Key(key) = cache_key {
            let serialized = serde_json::to_string(&payload)?;
            self.cache.set(&key, &serialized, self.component_ttl).await?;
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use tessera_cache::MemoryCacheProvider;
    use tessera_core::config::cache::MemoryCacheConfig;
    use tessera_core::types::component::{CachePolicy, ComponentMeta};
    use tessera_plugin::hooks::registry::HookRegistry;
    use tessera_plugin::hooks::transform::{value_fn, Contribution, HookTransform};

    #[derive(Debug)]
    struct CountingComponent {
        cache: CachePolicy,
        assembles: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Component for CountingComponent {
        fn meta(&self) -> ComponentMeta {
            ComponentMeta::new("Counting", &["limit"], self.cache)
        }

        fn cache_key(&self, options: &ComponentOptions) -> CacheKey {
            match self.cache {
                CachePolicy::Never => CacheKey::Never,
                CachePolicy::Keyed => CacheKey::Key(format!(
                    "component:counting:limit={}",
                    options.get_u64("limit").unwrap_or(0)
                )),
            }
        }

        async fn assemble(&self, options: &ComponentOptions) -> AppResult<Payload> {
            self.assembles.fetch_add(1, Ordering::SeqCst);
            let mut payload = Payload::new();
            payload.insert("limit".to_string(), json!(options.get_u64("limit")));
            payload.insert("items".to_string(), json!(["a", "b"]));
            Ok(payload)
        }
    }

    fn make_renderer() -> (Arc<HookRegistry>, ComponentRenderer) {
        let registry = Arc::new(HookRegistry::new());
        let dispatcher = Arc::new(HookDispatcher::new(Arc::clone(&registry)));
        let cache = Arc::new(MemoryCacheProvider::new(
            &MemoryCacheConfig {
                max_capacity: 100,
                time_to_live_seconds: 60,
            },
            60,
        ));
        let renderer = ComponentRenderer::new(dispatcher, cache, Duration::from_secs(60));
        (registry, renderer)
    }

    fn raw_options(limit: u64) -> serde_json::Map<String, Value> {
        let mut raw = serde_json::Map::new();
        raw.insert("limit".to_string(), json!(limit));
        raw
    }

    #[tokio::test]
    async fn test_never_cached_component_recomputes_every_render() {
        let (_registry, renderer) = make_renderer();
        let assembles = Arc::new(AtomicUsize::new(0));
        let component = CountingComponent {
            cache: CachePolicy::Never,
            assembles: Arc::clone(&assembles),
        };

        renderer.render(&component, &raw_options(3)).await.unwrap();
        renderer.render(&component, &raw_options(3)).await.unwrap();

        assert_eq!(assembles.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_keyed_component_served_from_cache_on_second_render() {
        let (_registry, renderer) = make_renderer();
        let assembles = Arc::new(AtomicUsize::new(0));
        let component = CountingComponent {
            cache: CachePolicy::Keyed,
            assembles: Arc::clone(&assembles),
        };

        let first = renderer.render(&component, &raw_options(3)).await.unwrap();
        let second = renderer.render(&component, &raw_options(3)).await.unwrap();

        assert_eq!(assembles.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_results_subscribers_decorate_the_payload() {
        let (registry, renderer) = make_renderer();
        registry
            .subscribe(
                HookPoint::component_results("Counting"),
                "decorator",
                10,
                HookTransform::Value(value_fn(|value, args| {
                    let mut object = value.as_object().cloned().unwrap_or_default();
                    object.insert("decorated".to_string(), json!(true));
                    object.insert("seen_limit".to_string(), json!(args.get_i64("limit")));
                    Ok(Contribution::new(Value::Object(object)))
                })),
            )
            .await
            .unwrap();

        let assembles = Arc::new(AtomicUsize::new(0));
        let component = CountingComponent {
            cache: CachePolicy::Never,
            assembles,
        };

        let payload = renderer.render(&component, &raw_options(5)).await.unwrap();

        assert_eq!(payload.get("decorated"), Some(&json!(true)));
        assert_eq!(payload.get("seen_limit"), Some(&json!(5)));
        assert_eq!(payload.get("items"), Some(&json!(["a", "b"])));
    }

    #[tokio::test]
    async fn test_unknown_options_do_not_reach_assembly() {
        let (_registry, renderer) = make_renderer();
        let assembles = Arc::new(AtomicUsize::new(0));
        let component = CountingComponent {
            cache: CachePolicy::Never,
            assembles,
        };

        let mut raw = raw_options(2);
        raw.insert("surprise".to_string(), json!("ignored"));

        let payload = renderer.render(&component, &raw).await.unwrap();

        assert_eq!(payload.get("limit"), Some(&json!(2)));
        assert!(!payload.contains_key("surprise"));
    }
}
