//! Convenience macros for plugin development.

/// Macro for creating a plugin info struct.
///
/// # Example
/// ```rust,ignore
/// let info = plugin_info!(
///     id: "blog",
///     name: "Blog",
///     version: "1.0.0",
///     description: "Posts and teasers",
///     author: "Dev",
///     category: "content"
/// );
/// ```
#[macro_export]
macro_rules! plugin_info {
    (
        id: $id:expr,
        name: $name:expr,
        version: $version:expr,
        description: $desc:expr,
        author: $author:expr,
        category: $category:expr
    ) => {
        $crate::registry::PluginInfo {
            id: $id.to_string(),
            name: $name.to_string(),
            version: $version.to_string(),
            description: $desc.to_string(),
            author: $author.to_string(),
            category: $category.to_string(),
            priority: 100,
            enabled: true,
        }
    };
    (
        id: $id:expr,
        name: $name:expr,
        version: $version:expr,
        description: $desc:expr,
        author: $author:expr,
        category: $category:expr,
        priority: $priority:expr
    ) => {
        $crate::registry::PluginInfo {
            id: $id.to_string(),
            name: $name.to_string(),
            version: $version.to_string(),
            description: $desc.to_string(),
            author: $author.to_string(),
            category: $category.to_string(),
            priority: $priority,
            enabled: true,
        }
    };
}
