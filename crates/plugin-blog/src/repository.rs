//! Post repository: contract plus the in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use tessera_core::result::AppResult;
use tessera_core::traits::repository::Repository;
use tessera_core::types::pagination::{PageRequest, PageResponse};

use crate::model::Post;

/// Post-specific queries on top of the generic repository contract.
#[async_trait]
pub trait PostRepository: Repository<Post, u64> {
    /// Find a published post by its slug.
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Post>>;

    /// The latest published posts, newest first.
    async fn latest(&self, limit: usize) -> AppResult<Vec<Post>>;
}

/// In-memory post store.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with posts.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }

    /// Creates a repository seeded with demo content.
    pub fn with_demo_data() -> Self {
        Self::with_posts(vec![
            Post {
                id: 1,
                slug: "hello-tessera".to_string(),
                title: "Hello, Tessera".to_string(),
                excerpt: "A first look at composing pages from plugins.".to_string(),
                body: "Tessera assembles pages from independently loaded plugins.".to_string(),
                published: true,
            },
            Post {
                id: 2,
                slug: "hook-chains".to_string(),
                title: "Hook chains in practice".to_string(),
                excerpt: "Priority-ordered transforms, explained.".to_string(),
                body: "Every extension point folds its subscribers over a value.".to_string(),
                published: true,
            },
            Post {
                id: 3,
                slug: "drafts-are-invisible".to_string(),
                title: "Drafts are invisible".to_string(),
                excerpt: "Unpublished content stays out of listings.".to_string(),
                body: "This post should never appear on the blog index.".to_string(),
                published: false,
            },
        ])
    }
}

#[async_trait]
impl Repository<Post, u64> for InMemoryPostRepository {
    async fn find(&self, id: &u64) -> AppResult<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == *id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.clone())
    }

    async fn find_one_by(&self, conditions: &HashMap<String, Value>) -> AppResult<Option<Post>> {
        let posts = self.posts.read().await;
        for post in posts.iter() {
            let as_value = serde_json::to_value(post)?;
            if conditions
                .iter()
                .all(|(field, expected)| as_value.get(field) == Some(expected))
            {
                return Ok(Some(post.clone()));
            }
        }
        Ok(None)
    }

    async fn find_page(&self, page: &PageRequest) -> AppResult<PageResponse<Post>> {
        let posts = self.posts.read().await;
        let total = posts.len() as u64;
        let items: Vec<Post> = posts
            .iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn count(&self) -> AppResult<u64> {
        let posts = self.posts.read().await;
        Ok(posts.len() as u64)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .find(|p| p.published && p.slug == slug)
            .cloned())
    }

    async fn latest(&self, limit: usize) -> AppResult<Vec<Post>> {
        let posts = self.posts.read().await;
        let mut published: Vec<Post> = posts.iter().filter(|p| p.published).cloned().collect();
        published.sort_by(|a, b| b.id.cmp(&a.id));
        published.truncate(limit);
        Ok(published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_latest_excludes_drafts_and_orders_newest_first() {
        let repo = InMemoryPostRepository::with_demo_data();
        let latest = repo.latest(10).await.unwrap();

        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].slug, "hook-chains");
        assert_eq!(latest[1].slug, "hello-tessera");
    }

    #[tokio::test]
    async fn test_generic_repository_contract() {
        let repo = InMemoryPostRepository::with_demo_data();

        assert_eq!(repo.count().await.unwrap(), 3);
        assert_eq!(repo.find(&1).await.unwrap().unwrap().slug, "hello-tessera");
        assert!(repo.find(&99).await.unwrap().is_none());

        let page = repo.find_page(&PageRequest::new(1, 2)).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_find_one_by_matches_fields() {
        let repo = InMemoryPostRepository::with_demo_data();
        let mut conditions = HashMap::new();
        conditions.insert("slug".to_string(), json!("hello-tessera"));

        let found = repo.find_one_by(&conditions).await.unwrap();
        assert_eq!(found.unwrap().id, 1);

        let mut none = HashMap::new();
        none.insert("slug".to_string(), json!("missing"));
        assert!(repo.find_one_by(&none).await.unwrap().is_none());
    }
}
