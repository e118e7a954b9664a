//! Orders plugin registration.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use tessera_core::result::AppResult;
use tessera_core::types::provider::ProviderEntry;
use tessera_core::types::route::{RouteEntry, RouteMethod};
use tessera_plugin::hooks::point::HookPoint;
use tessera_plugin::hooks::registry::HookRegistry;
use tessera_plugin::hooks::transform::{
    provider_fn, route_fn, value_fn, Contribution, HookTransform,
};
use tessera_plugin::plugin_info;
use tessera_plugin::registry::{Plugin, PluginInfo};

use crate::controller::OrdersController;
use crate::repository::InMemoryOrderRepository;

const PLUGIN_ID: &str = "orders";
const LOAD_PRIORITY: i32 = 20;

/// The orders plugin: routes, controller, and a cross-plugin decoration of
/// the blog's latest-posts payload.
#[derive(Debug)]
pub struct OrdersPlugin {
    controller: Arc<OrdersController>,
}

impl OrdersPlugin {
    /// Creates the plugin with demo orders.
    pub fn new() -> Self {
        let orders = Arc::new(InMemoryOrderRepository::with_demo_data());
        Self {
            controller: Arc::new(OrdersController::new(orders)),
        }
    }
}

impl Default for OrdersPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for OrdersPlugin {
    fn info(&self) -> PluginInfo {
        plugin_info!(
            id: PLUGIN_ID,
            name: "Orders",
            version: "1.0.0",
            description: "Order listing and lookup",
            author: "Tessera Team",
            category: "commerce",
            priority: LOAD_PRIORITY
        )
    }

    async fn register(&self, hooks: &HookRegistry) -> AppResult<()> {
        hooks
            .subscribe(
                HookPoint::add_routes(),
                PLUGIN_ID,
                LOAD_PRIORITY,
                HookTransform::Routes(route_fn(|routes, _args| {
                    let mut out = routes.to_vec();
                    out.push(
                        RouteEntry::new(RouteMethod::Get, "/orders", "OrdersController", "index")
                            .owned_by(PLUGIN_ID),
                    );
                    out.push(
                        RouteEntry::new(
                            RouteMethod::Get,
                            "/orders/:reference",
                            "OrdersController",
                            "show",
                        )
                        .owned_by(PLUGIN_ID),
                    );
                    Ok(Contribution::with_hint(out, LOAD_PRIORITY))
                })),
            )
            .await?;

        let controller = Arc::clone(&self.controller);
        hooks
            .subscribe(
                HookPoint::add_providers(),
                PLUGIN_ID,
                LOAD_PRIORITY,
                HookTransform::Providers(provider_fn(move |providers, _args| {
                    let mut out = providers.to_vec();
                    out.push(ProviderEntry::controller(
                        "OrdersController",
                        PLUGIN_ID,
                        controller.clone(),
                    ));
                    Ok(Contribution::new(out))
                })),
            )
            .await?;

        // Decorate the blog listing with a storefront banner.
        hooks
            .subscribe(
                HookPoint::component_results("LatestPosts"),
                PLUGIN_ID,
                50,
                HookTransform::Value(value_fn(|value, _args| {
                    let mut object = value.as_object().cloned().unwrap_or_default();
                    object.insert(
                        "promo".to_string(),
                        json!("Free shipping on all orders this week"),
                    );
                    Ok(Contribution::new(Value::Object(object)))
                })),
            )
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_plugin::aggregate::RouteAggregator;
    use tessera_plugin::hooks::args::HookArgs;
    use tessera_plugin::hooks::dispatcher::HookDispatcher;
    use tessera_plugin::hooks::transform::HookValue;
    use tessera_plugin::manager::PluginManager;

    #[tokio::test]
    async fn test_orders_plugin_contributes_routes() {
        let hooks = Arc::new(HookRegistry::new());
        let dispatcher = Arc::new(HookDispatcher::new(Arc::clone(&hooks)));
        let manager = PluginManager::new(Arc::clone(&hooks));

        manager
            .register_plugin(Arc::new(OrdersPlugin::new()))
            .await
            .unwrap();

        let table = RouteAggregator::new(Arc::clone(&dispatcher))
            .build(Vec::new())
            .await;

        let index = table.resolve(RouteMethod::Get, "/orders").unwrap();
        assert_eq!(index.controller, "OrdersController");
        assert_eq!(index.action, "index");
    }

    #[tokio::test]
    async fn test_orders_plugin_decorates_latest_posts() {
        let hooks = Arc::new(HookRegistry::new());
        let dispatcher = Arc::new(HookDispatcher::new(Arc::clone(&hooks)));
        let manager = PluginManager::new(Arc::clone(&hooks));

        manager
            .register_plugin(Arc::new(OrdersPlugin::new()))
            .await
            .unwrap();

        let result = dispatcher
            .trigger(
                &HookPoint::component_results("LatestPosts"),
                HookValue::Value(json!({"posts": []})),
                &HookArgs::new(),
            )
            .await;

        let decorated = result.into_json();
        assert!(decorated.get("promo").is_some());
        assert_eq!(decorated.get("posts"), Some(&json!([])));
    }
}
