//! # tessera-cache
//!
//! Cache providers for Tessera. Currently ships the in-memory provider
//! built on moka; the [`tessera_core::traits::cache::CacheProvider`] trait
//! keeps the backend pluggable.

pub mod memory;

pub use memory::store::MemoryCacheProvider;
