//! Orders plugin for Tessera.
//!
//! Contributes the orders routes and controller, and decorates the blog's
//! latest-posts payload through its `results` extension point.

pub mod controller;
pub mod model;
pub mod plugin;
pub mod repository;

pub use plugin::OrdersPlugin;
