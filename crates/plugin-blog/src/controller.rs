//! Blog controller.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use tessera_component::renderer::ComponentRenderer;
use tessera_core::error::AppError;
use tessera_core::result::AppResult;
use tessera_core::traits::controller::Controller;
use tessera_core::types::request::{ActionRequest, ActionResponse};

use crate::component::{LatestPostsComponent, PostTeaserComponent};

/// Controller for the blog routes.
#[derive(Debug)]
pub struct BlogController {
    renderer: Arc<ComponentRenderer>,
    latest: Arc<LatestPostsComponent>,
    teaser: Arc<PostTeaserComponent>,
}

impl BlogController {
    /// Creates the controller over its components.
    pub fn new(
        renderer: Arc<ComponentRenderer>,
        latest: Arc<LatestPostsComponent>,
        teaser: Arc<PostTeaserComponent>,
    ) -> Self {
        Self {
            renderer,
            latest,
            teaser,
        }
    }

    async fn index(&self, request: ActionRequest) -> AppResult<ActionResponse> {
        let mut options = serde_json::Map::new();
        if let Some(limit) = request.query_param("limit").and_then(|v| v.parse::<u64>().ok()) {
            options.insert("limit".to_string(), json!(limit));
        }
        if let Some(heading) = request.query_param("heading") {
            options.insert("heading".to_string(), json!(heading));
        }

        let payload = self.renderer.render(self.latest.as_ref(), &options).await?;
        Ok(ActionResponse::rendered("blog/index", payload))
    }

    async fn show(&self, request: ActionRequest) -> AppResult<ActionResponse> {
        let slug = request
            .param("slug")
            .ok_or_else(|| AppError::validation("missing 'slug' path parameter"))?;

        let mut options = serde_json::Map::new();
        options.insert("slug".to_string(), json!(slug));

        let payload = self.renderer.render(self.teaser.as_ref(), &options).await?;
        Ok(ActionResponse::rendered("blog/show", payload))
    }
}

#[async_trait]
impl Controller for BlogController {
    fn name(&self) -> &str {
        "BlogController"
    }

    async fn invoke(&self, action: &str, request: ActionRequest) -> AppResult<ActionResponse> {
        match action {
            "index" => self.index(request).await,
            "show" => self.show(request).await,
            other => Err(AppError::not_found(format!(
                "BlogController has no action '{other}'"
            ))),
        }
    }
}
