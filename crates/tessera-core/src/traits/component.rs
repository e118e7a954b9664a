//! Page component contract.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::component::{CacheKey, ComponentMeta, ComponentOptions, Payload};

/// A self-contained page-data-producing unit.
///
/// Components gather data through repository collaborators only; `assemble`
/// is read-only with respect to external state and safe to call multiple
/// times per request. The renderer owns caching and the per-component
/// `results` extension point.
#[async_trait]
pub trait Component: Send + Sync + std::fmt::Debug {
    /// Static metadata: name, recognized options, cache strategy.
    fn meta(&self) -> ComponentMeta;

    /// Per-invocation cache decision. [`CacheKey::Never`] disables caching
    /// unconditionally for this invocation.
    fn cache_key(&self, options: &ComponentOptions) -> CacheKey;

    /// Assemble the payload mapping from injected data providers.
    async fn assemble(&self, options: &ComponentOptions) -> AppResult<Payload>;
}
