//! Blog plugin for Tessera.
//!
//! Contributes the blog routes, the `BlogController`, and two page
//! components: the cacheable latest-posts listing and the always-fresh
//! post teaser.

pub mod component;
pub mod controller;
pub mod model;
pub mod plugin;
pub mod repository;

pub use plugin::BlogPlugin;
