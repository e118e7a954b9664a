//! Typed transform contracts, one per extension-point category.
//!
//! Hook values are a tagged union over the categories of accumulator a
//! chain can fold (route lists, provider lists, arbitrary JSON values), and
//! transforms are a matching tagged union of typed callbacks so each
//! category's signature is statically checked instead of funneling every
//! subscriber through one untyped function type.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use tessera_core::result::AppResult;
use tessera_core::types::provider::ProviderEntry;
use tessera_core::types::route::RouteEntry;

use super::args::HookArgs;

/// The accumulator threaded through a subscriber chain.
#[derive(Debug, Clone)]
pub enum HookValue {
    /// Route entries (the `add-routes` point).
    Routes(Vec<RouteEntry>),
    /// Provider entries (the `add-providers` point).
    Providers(Vec<ProviderEntry>),
    /// An arbitrary JSON value (component `results` points).
    Value(Value),
}

impl HookValue {
    /// Category label for diagnostics and mismatch detection.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Routes(_) => "routes",
            Self::Providers(_) => "providers",
            Self::Value(_) => "value",
        }
    }
}

/// A transform's output: the new accumulator plus optional side-channel
/// metadata.
///
/// The priority hint is reported alongside the value for diagnostics; it is
/// never folded back into the accumulator and never re-orders the chain.
#[derive(Debug, Clone)]
pub struct Contribution<T> {
    /// The new accumulator value.
    pub value: T,
    /// Subscriber-proposed effective priority, reported for logging only.
    pub priority_hint: Option<i32>,
}

impl<T> Contribution<T> {
    /// A bare value with no metadata.
    pub fn new(value: T) -> Self {
        Self {
            value,
            priority_hint: None,
        }
    }

    /// A value accompanied by a priority hint.
    pub fn with_hint(value: T, hint: i32) -> Self {
        Self {
            value,
            priority_hint: Some(hint),
        }
    }
}

impl<T> From<T> for Contribution<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

/// Transform registered against the `add-routes` point.
///
/// Receives the current route list and returns the new list. Append to the
/// list, never replace it wholesale.
#[async_trait]
pub trait RouteTransform: Send + Sync {
    /// Apply the transform to the current route list.
    async fn apply(
        &self,
        routes: &[RouteEntry],
        args: &HookArgs,
    ) -> AppResult<Contribution<Vec<RouteEntry>>>;
}

/// Transform registered against the `add-providers` point.
#[async_trait]
pub trait ProviderTransform: Send + Sync {
    /// Apply the transform to the current provider list.
    async fn apply(
        &self,
        providers: &[ProviderEntry],
        args: &HookArgs,
    ) -> AppResult<Contribution<Vec<ProviderEntry>>>;
}

/// Transform registered against a value-carrying point (component results).
#[async_trait]
pub trait ValueTransform: Send + Sync {
    /// Apply the transform to the current value.
    async fn apply(&self, value: &Value, args: &HookArgs) -> AppResult<Contribution<Value>>;
}

/// A registered callback, tagged by the category it can fold.
#[derive(Clone)]
pub enum HookTransform {
    /// Route-contribution callback.
    Routes(Arc<dyn RouteTransform>),
    /// Provider-contribution callback.
    Providers(Arc<dyn ProviderTransform>),
    /// Value-transform callback.
    Value(Arc<dyn ValueTransform>),
}

impl HookTransform {
    /// Category label, matching [`HookValue::category`].
    pub fn category(&self) -> &'static str {
        match self {
            Self::Routes(_) => "routes",
            Self::Providers(_) => "providers",
            Self::Value(_) => "value",
        }
    }

    /// Whether two transforms are the same registered callback.
    ///
    /// Identity is `Arc` pointer identity: registering the same callback
    /// handle twice is a duplicate, two structurally identical closures are
    /// not.
    pub fn same_callback(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Routes(a), Self::Routes(b)) => Arc::ptr_eq(a, b),
            (Self::Providers(a), Self::Providers(b)) => Arc::ptr_eq(a, b),
            (Self::Value(a), Self::Value(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for HookTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HookTransform::{}", self.category())
    }
}

struct RouteFn<F>(F);

#[async_trait]
impl<F> RouteTransform for RouteFn<F>
where
    F: Fn(&[RouteEntry], &HookArgs) -> AppResult<Contribution<Vec<RouteEntry>>> + Send + Sync,
{
    async fn apply(
        &self,
        routes: &[RouteEntry],
        args: &HookArgs,
    ) -> AppResult<Contribution<Vec<RouteEntry>>> {
        (self.0)(routes, args)
    }
}

/// Wrap a synchronous closure as a route transform.
pub fn route_fn<F>(f: F) -> Arc<dyn RouteTransform>
where
    F: Fn(&[RouteEntry], &HookArgs) -> AppResult<Contribution<Vec<RouteEntry>>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(RouteFn(f))
}

struct ProviderFn<F>(F);

#[async_trait]
impl<F> ProviderTransform for ProviderFn<F>
where
    F: Fn(&[ProviderEntry], &HookArgs) -> AppResult<Contribution<Vec<ProviderEntry>>>
        + Send
        + Sync,
{
    async fn apply(
        &self,
        providers: &[ProviderEntry],
        args: &HookArgs,
    ) -> AppResult<Contribution<Vec<ProviderEntry>>> {
        (self.0)(providers, args)
    }
}

/// Wrap a synchronous closure as a provider transform.
pub fn provider_fn<F>(f: F) -> Arc<dyn ProviderTransform>
where
    F: Fn(&[ProviderEntry], &HookArgs) -> AppResult<Contribution<Vec<ProviderEntry>>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(ProviderFn(f))
}

struct ValueFn<F>(F);

#[async_trait]
impl<F> ValueTransform for ValueFn<F>
where
    F: Fn(&Value, &HookArgs) -> AppResult<Contribution<Value>> + Send + Sync,
{
    async fn apply(&self, value: &Value, args: &HookArgs) -> AppResult<Contribution<Value>> {
        (self.0)(value, args)
    }
}

/// Wrap a synchronous closure as a value transform.
pub fn value_fn<F>(f: F) -> Arc<dyn ValueTransform>
where
    F: Fn(&Value, &HookArgs) -> AppResult<Contribution<Value>> + Send + Sync + 'static,
{
    Arc::new(ValueFn(f))
}
