//! Controller contract for route dispatch.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::request::{ActionRequest, ActionResponse};

/// A controller resolved from an aggregated route entry.
///
/// Route entries name controllers and actions as strings; the dispatch
/// layer resolves the controller from the wired registry and invokes the
/// named action. Controllers must be safe to invoke concurrently.
#[async_trait]
pub trait Controller: Send + Sync + std::fmt::Debug {
    /// The controller name route entries refer to.
    fn name(&self) -> &str;

    /// Invoke a named action. Unknown actions return a not-found error.
    async fn invoke(&self, action: &str, request: ActionRequest) -> AppResult<ActionResponse>;
}
