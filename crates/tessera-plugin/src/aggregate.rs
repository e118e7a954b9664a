//! Route and provider aggregation over the well-known extension points.
//!
//! Both aggregators are extension-point consumers: they trigger their point
//! once after plugin registration completes and fold every plugin's
//! contribution into a single immutable collection.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use tessera_core::types::provider::ProviderEntry;
use tessera_core::types::route::{RouteEntry, RouteTable};

use crate::hooks::args::HookArgs;
use crate::hooks::dispatcher::HookDispatcher;
use crate::hooks::point::HookPoint;
use crate::hooks::transform::HookValue;

/// Builds the process-wide route table from the `add-routes` point.
#[derive(Debug)]
pub struct RouteAggregator {
    dispatcher: Arc<HookDispatcher>,
    table: OnceCell<Arc<RouteTable>>,
}

impl RouteAggregator {
    /// Creates an aggregator over the shared dispatcher.
    pub fn new(dispatcher: Arc<HookDispatcher>) -> Self {
        Self {
            dispatcher,
            table: OnceCell::new(),
        }
    }

    /// Triggers `add-routes` once and builds the immutable route table.
    ///
    /// The core's own routes come first; plugin contributions follow in
    /// subscriber order, so on a `(method, pattern)` conflict the
    /// later-registered contributor wins and the earlier entry is logged as
    /// shadowed. Must run after all plugins have registered; an earlier
    /// call would freeze an incomplete table. Repeat calls return the first
    /// build.
    pub async fn build(&self, core_routes: Vec<RouteEntry>) -> Arc<RouteTable> {
        if let Some(existing) = self.table.get() {
            warn!("Route table already built; returning the existing table");
            return Arc::clone(existing);
        }

        let result = self
            .dispatcher
            .trigger(
                &HookPoint::add_routes(),
                HookValue::Routes(Vec::new()),
                &HookArgs::new(),
            )
            .await;

        for hint in &result.hints {
            debug!(
                subscriber = %hint.subscriber,
                hint = hint.hint,
                "Route contribution reported a priority hint"
            );
        }

        let mut contributions = core_routes;
        contributions.extend(result.into_routes());

        let table = Arc::new(RouteTable::from_contributions(contributions));
        info!(
            routes = table.len(),
            shadowed = table.shadowed().len(),
            "Route table built"
        );

        Arc::clone(self.table.get_or_init(|| async { table }).await)
    }

    /// The built table, if [`RouteAggregator::build`] has run.
    pub fn table(&self) -> Option<Arc<RouteTable>> {
        self.table.get().cloned()
    }
}

/// Collects provider bindings from the `add-providers` point.
#[derive(Debug)]
pub struct ProviderAggregator {
    dispatcher: Arc<HookDispatcher>,
}

impl ProviderAggregator {
    /// Creates an aggregator over the shared dispatcher.
    pub fn new(dispatcher: Arc<HookDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Triggers `add-providers` and returns the accumulated bindings.
    ///
    /// Duplicate binding names resolve last-writer-wins with a logged
    /// warning, mirroring route conflict policy.
    pub async fn collect(&self) -> Vec<ProviderEntry> {
        let result = self
            .dispatcher
            .trigger(
                &HookPoint::add_providers(),
                HookValue::Providers(Vec::new()),
                &HookArgs::new(),
            )
            .await;

        let contributions = result.into_providers();
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut providers: Vec<ProviderEntry> = Vec::with_capacity(contributions.len());

        for entry in contributions {
            match seen.get(&entry.name) {
                Some(&i) => {
                    warn!(
                        provider = %entry.name,
                        previous_owner = %providers[i].owner,
                        new_owner = %entry.owner,
                        "Provider binding shadowed"
                    );
                    providers[i] = entry;
                }
                None => {
                    seen.insert(entry.name.clone(), providers.len());
                    providers.push(entry);
                }
            }
        }

        info!(providers = providers.len(), "Provider bindings collected");
        providers
    }
}
