//! Collaborator contracts consumed across the application.

pub mod cache;
pub mod component;
pub mod controller;
pub mod repository;
pub mod view;
