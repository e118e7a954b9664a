//! # tessera-component
//!
//! Component composition for Tessera: the registry of wired page
//! components and the renderer that drives a component's option filtering,
//! caching, assembly, and `results` extension point.

pub mod registry;
pub mod renderer;

pub use registry::ComponentRegistry;
pub use renderer::ComponentRenderer;
