//! Blog post model.

use serde::{Deserialize, Serialize};

/// A blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Post id.
    pub id: u64,
    /// URL slug.
    pub slug: String,
    /// Title.
    pub title: String,
    /// Short excerpt shown in listings.
    pub excerpt: String,
    /// Full body.
    pub body: String,
    /// Whether the post is published.
    pub published: bool,
}
