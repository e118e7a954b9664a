//! Blog plugin registration.

use std::sync::Arc;

use async_trait::async_trait;

use tessera_component::renderer::ComponentRenderer;
use tessera_core::result::AppResult;
use tessera_core::types::provider::ProviderEntry;
use tessera_core::types::route::{RouteEntry, RouteMethod};
use tessera_plugin::hooks::point::HookPoint;
use tessera_plugin::hooks::registry::HookRegistry;
use tessera_plugin::hooks::transform::{provider_fn, route_fn, Contribution, HookTransform};
use tessera_plugin::plugin_info;
use tessera_plugin::registry::{Plugin, PluginInfo};

use crate::component::{LatestPostsComponent, PostTeaserComponent};
use crate::controller::BlogController;
use crate::repository::InMemoryPostRepository;

const PLUGIN_ID: &str = "blog";
const LOAD_PRIORITY: i32 = 10;

/// The blog plugin: routes, controller, and components.
#[derive(Debug)]
pub struct BlogPlugin {
    controller: Arc<BlogController>,
    latest: Arc<LatestPostsComponent>,
    teaser: Arc<PostTeaserComponent>,
}

impl BlogPlugin {
    /// Creates the plugin with demo content.
    pub fn new(renderer: Arc<ComponentRenderer>) -> Self {
        let posts = Arc::new(InMemoryPostRepository::with_demo_data());
        let latest = Arc::new(LatestPostsComponent::new(posts.clone()));
        let teaser = Arc::new(PostTeaserComponent::new(posts));
        let controller = Arc::new(BlogController::new(
            renderer,
            Arc::clone(&latest),
            Arc::clone(&teaser),
        ));

        Self {
            controller,
            latest,
            teaser,
        }
    }
}

#[async_trait]
impl Plugin for BlogPlugin {
    fn info(&self) -> PluginInfo {
        plugin_info!(
            id: PLUGIN_ID,
            name: "Blog",
            version: "1.0.0",
            description: "Posts, teasers, and the blog index",
            author: "Tessera Team",
            category: "content",
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
                        RouteEntry::new(RouteMethod::Get, "/blog", "BlogController", "index")
                            .owned_by(PLUGIN_ID),
                    );
                    out.push(
                        RouteEntry::new(RouteMethod::Get, "/blog/:slug", "BlogController", "show")
                            .owned_by(PLUGIN_ID),
                    );
                    Ok(Contribution::new(out))
                })),
            )
            .await?;

        let controller = Arc::clone(&self.controller);
        let latest = Arc::clone(&self.latest);
        let teaser = Arc::clone(&self.teaser);
        hooks
            .subscribe(
                HookPoint::add_providers(),
                PLUGIN_ID,
                LOAD_PRIORITY,
                HookTransform::Providers(provider_fn(move |providers, _args| {
                    let mut out = providers.to_vec();
                    out.push(ProviderEntry::controller(
                        "BlogController",
                        PLUGIN_ID,
                        controller.clone(),
                    ));
                    out.push(ProviderEntry::component(
                        "LatestPosts",
                        PLUGIN_ID,
                        latest.clone(),
                    ));
                    out.push(ProviderEntry::component(
                        "PostTeaser",
                        PLUGIN_ID,
                        teaser.clone(),
                    ));
                    Ok(Contribution::new(out))
                })),
            )
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tessera_cache::MemoryCacheProvider;
    use tessera_core::config::cache::MemoryCacheConfig;
    use tessera_core::types::route::RouteMethod;
    use tessera_plugin::aggregate::{ProviderAggregator, RouteAggregator};
    use tessera_plugin::hooks::dispatcher::HookDispatcher;
    use tessera_plugin::manager::PluginManager;

    fn make_renderer(dispatcher: Arc<HookDispatcher>) -> Arc<ComponentRenderer> {
        let cache = Arc::new(MemoryCacheProvider::new(
            &MemoryCacheConfig {
                max_capacity: 100,
                time_to_live_seconds: 60,
            },
            60,
        ));
        Arc::new(ComponentRenderer::new(
            dispatcher,
            cache,
            Duration::from_secs(60),
        ))
    }

    #[tokio::test]
    async fn test_blog_plugin_contributes_routes_and_providers() {
        let hooks = Arc::new(HookRegistry::new());
        let dispatcher = Arc::new(HookDispatcher::new(Arc::clone(&hooks)));
        let manager = PluginManager::new(Arc::clone(&hooks));

        manager
            .register_plugin(Arc::new(BlogPlugin::new(make_renderer(Arc::clone(
                &dispatcher,
            )))))
            .await
            .unwrap();

        let table = RouteAggregator::new(Arc::clone(&dispatcher))
            .build(Vec::new())
            .await;
        assert!(table.resolve(RouteMethod::Get, "/blog").is_some());
        assert!(table.resolve(RouteMethod::Get, "/blog/:slug").is_some());

        let providers = ProviderAggregator::new(dispatcher).collect().await;
        let names: Vec<&str> = providers.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"BlogController"));
        assert!(names.contains(&"LatestPosts"));
        assert!(names.contains(&"PostTeaser"));
    }
}
