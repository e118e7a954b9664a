//! Orders controller.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use tessera_core::error::AppError;
use tessera_core::result::AppResult;
use tessera_core::traits::controller::Controller;
use tessera_core::types::component::Payload;
use tessera_core::types::request::{ActionRequest, ActionResponse};

use crate::repository::OrderRepository;

/// Controller for the orders routes.
///
/// Talks to the repository directly; no page component is involved, which
/// keeps the order listing a plain JSON payload.
#[derive(Debug)]
pub struct OrdersController {
    orders: Arc<dyn OrderRepository>,
}

impl OrdersController {
    /// Creates the controller over an order repository.
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    async fn index(&self) -> AppResult<ActionResponse> {
        let orders = self.orders.find_all().await?;

        let mut payload = Payload::new();
        payload.insert("count".to_string(), json!(orders.len()));
        payload.insert("orders".to_string(), json!(orders));
        Ok(ActionResponse::with_payload(payload))
    }

    async fn show(&self, request: ActionRequest) -> AppResult<ActionResponse> {
        let reference = request
            .param("reference")
            .ok_or_else(|| AppError::validation("missing 'reference' path parameter"))?;

        let order = self
            .orders
            .find_by_reference(reference)
            .await?
            .ok_or_else(|| AppError::not_found(format!("no order '{reference}'")))?;

        let mut payload = Payload::new();
        payload.insert("order".to_string(), json!(order));
        Ok(ActionResponse::with_payload(payload))
    }
}

#[async_trait]
impl Controller for OrdersController {
    fn name(&self) -> &str {
        "OrdersController"
    }

    async fn invoke(&self, action: &str, request: ActionRequest) -> AppResult<ActionResponse> {
        match action {
            "index" => self.index().await,
            "show" => self.show(request).await,
            other => Err(AppError::not_found(format!(
                "OrdersController has no action '{other}'"
            ))),
        }
    }
}
