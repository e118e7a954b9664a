//! Blog page components.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use tessera_core::error::AppError;
use tessera_core::result::AppResult;
use tessera_core::traits::component::Component;
use tessera_core::types::component::{CacheKey, CachePolicy, ComponentMeta, ComponentOptions, Payload};

use crate::repository::PostRepository;

const DEFAULT_LIMIT: u64 = 5;

/// Listing of the latest published posts. Cacheable per `(limit, heading)`.
#[derive(Debug)]
pub struct LatestPostsComponent {
    posts: Arc<dyn PostRepository>,
}

impl LatestPostsComponent {
    /// Creates the component over a post repository.
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl Component for LatestPostsComponent {
    fn meta(&self) -> ComponentMeta {
        ComponentMeta::new("LatestPosts", &["limit", "heading"], CachePolicy::Keyed)
    }

    fn cache_key(&self, options: &ComponentOptions) -> CacheKey {
        let limit = options.get_u64("limit").unwrap_or(DEFAULT_LIMIT);
        let heading = options.get_str("heading").unwrap_or_default();
        CacheKey::Key(format!("component:latest-posts:limit={limit}:heading={heading}"))
    }

    async fn assemble(&self, options: &ComponentOptions) -> AppResult<Payload> {
        let limit = options.get_u64("limit").unwrap_or(DEFAULT_LIMIT) as usize;
        let heading = options.get_str("heading").unwrap_or("Latest posts");

        let posts = self.posts.latest(limit).await?;
        let teasers: Vec<_> = posts
            .iter()
            .map(|p| {
                json!({
                    "id": p.id,
                    "slug": p.slug,
                    "title": p.title,
                    "excerpt": p.excerpt,
                })
            })
            .collect();

        let mut payload = Payload::new();
        payload.insert("heading".to_string(), json!(heading));
        payload.insert("count".to_string(), json!(teasers.len()));
        payload.insert("posts".to_string(), json!(teasers));
        Ok(payload)
    }
}

/// Single-post teaser. Never served from cache: editors expect edits to
/// show up on the very next request.
#[derive(Debug)]
pub struct PostTeaserComponent {
    posts: Arc<dyn PostRepository>,
}

impl PostTeaserComponent {
    /// Creates the component over a post repository.
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl Component for PostTeaserComponent {
    fn meta(&self) -> ComponentMeta {
        ComponentMeta::new("PostTeaser", &["slug"], CachePolicy::Never)
    }

    fn cache_key(&self, _options: &ComponentOptions) -> CacheKey {
        CacheKey::Never
    }

    async fn assemble(&self, options: &ComponentOptions) -> AppResult<Payload> {
        let slug = options
            .get_str("slug")
            .ok_or_else(|| AppError::validation("PostTeaser requires a 'slug' option"))?;

        let post = self
            .posts
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("no published post with slug '{slug}'")))?;

        let mut payload = Payload::new();
        payload.insert("id".to_string(), json!(post.id));
        payload.insert("slug".to_string(), json!(post.slug));
        payload.insert("title".to_string(), json!(post.title));
        payload.insert("body".to_string(), json!(post.body));
        Ok(payload)
    }
}
