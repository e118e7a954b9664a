//! Generic repository trait for data access.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::result::AppResult;
use crate::types::pagination::{PageRequest, PageResponse};

/// Generic read-side repository trait.
///
/// Defined with generic type parameters so each entity gets a strongly
/// typed repository. Entity-specific query methods (e.g. "latest N posts")
/// are defined on the concrete repository traits.
#[async_trait]
pub trait Repository<Entity, Id>: Send + Sync + std::fmt::Debug + 'static
where
    Entity: Send + Sync + 'static + serde::Serialize,
    Id: Send + Sync + 'static,
{
    /// Find an entity by its primary key.
    async fn find(&self, id: &Id) -> AppResult<Option<Entity>>;

    /// Find all entities.
    async fn find_all(&self) -> AppResult<Vec<Entity>>;

    /// Find the first entity matching all given field conditions.
    async fn find_one_by(&self, conditions: &HashMap<String, Value>) -> AppResult<Option<Entity>>;

    /// Find a page of entities.
    async fn find_page(&self, page: &PageRequest) -> AppResult<PageResponse<Entity>>;

    /// Count total entities.
    async fn count(&self) -> AppResult<u64>;
}
