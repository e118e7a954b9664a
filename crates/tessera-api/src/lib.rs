//! # tessera-api
//!
//! HTTP layer for Tessera built on Axum.
//!
//! Unlike a conventional API crate with hardcoded route modules, the router
//! here is generated from the aggregated route table: every entry mounts a
//! dispatch handler that resolves its `(controller, action)` pair against
//! the wired controller registry at request time.

pub mod app;
pub mod dispatch;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod view;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
