//! Order repository: contract plus the in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use tessera_core::result::AppResult;
use tessera_core::traits::repository::Repository;
use tessera_core::types::pagination::{PageRequest, PageResponse};

use crate::model::Order;

/// Order-specific queries on top of the generic repository contract.
#[async_trait]
pub trait OrderRepository: Repository<Order, u64> {
    /// Find an order by its human-facing reference.
    async fn find_by_reference(&self, reference: &str) -> AppResult<Option<Order>>;
}

/// In-memory order store.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with demo orders.
    pub fn with_demo_data() -> Self {
        Self {
            orders: RwLock::new(vec![
                Order {
                    id: 1,
                    reference: "ORD-1001".to_string(),
                    customer: "Ada".to_string(),
                    total_cents: 4_200,
                    status: "paid".to_string(),
                },
                Order {
                    id: 2,
                    reference: "ORD-1002".to_string(),
                    customer: "Grace".to_string(),
                    total_cents: 13_750,
                    status: "open".to_string(),
                },
            ]),
        }
    }
}

#[async_trait]
impl Repository<Order, u64> for InMemoryOrderRepository {
    async fn find(&self, id: &u64) -> AppResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.id == *id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.clone())
    }

    async fn find_one_by(&self, conditions: &HashMap<String, Value>) -> AppResult<Option<Order>> {
        let orders = self.orders.read().await;
        for order in orders.iter() {
            let as_value = serde_json::to_value(order)?;
            if conditions
                .iter()
                .all(|(field, expected)| as_value.get(field) == Some(expected))
            {
                return Ok(Some(order.clone()));
            }
        }
        Ok(None)
    }

    async fn find_page(&self, page: &PageRequest) -> AppResult<PageResponse<Order>> {
        let orders = self.orders.read().await;
        let total = orders.len() as u64;
        let items: Vec<Order> = orders
            .iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn count(&self) -> AppResult<u64> {
        let orders = self.orders.read().await;
        Ok(orders.len() as u64)
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_reference(&self, reference: &str) -> AppResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.reference == reference).cloned())
    }
}
