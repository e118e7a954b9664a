//! Route entries and the aggregated route table.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// HTTP method of a route entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouteMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl RouteMethod {
    /// Returns the uppercase method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single route declaration contributed by a plugin (or the core).
///
/// Routes are plain data: the HTTP layer resolves `controller` and `action`
/// against the wired controller registry at dispatch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEntry {
    /// HTTP method.
    pub method: RouteMethod,
    /// Path pattern, e.g. `/blog/:slug`.
    pub pattern: String,
    /// Controller name resolved at dispatch time.
    pub controller: String,
    /// Action name on the controller.
    pub action: String,
    /// Middleware names applied to this route.
    #[serde(default)]
    pub middleware: Vec<String>,
    /// Tag of the plugin that contributed this entry.
    pub owner: String,
}

impl RouteEntry {
    /// Create a new route entry with no middleware and an empty owner tag.
    ///
    /// The owner tag is normally filled by the contributing plugin via
    /// [`RouteEntry::owned_by`].
    pub fn new(
        method: RouteMethod,
        pattern: impl Into<String>,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            method,
            pattern: pattern.into(),
            controller: controller.into(),
            action: action.into(),
            middleware: Vec::new(),
            owner: String::new(),
        }
    }

    /// Set the owning plugin tag.
    pub fn owned_by(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Append a middleware name.
    pub fn with_middleware(mut self, middleware: impl Into<String>) -> Self {
        self.middleware.push(middleware.into());
        self
    }

    /// The conflict key: two entries collide when method and pattern match.
    pub fn conflict_key(&self) -> (RouteMethod, &str) {
        (self.method, self.pattern.as_str())
    }
}

/// The aggregated, immutable route table.
///
/// Built once per process lifetime from all contributed [`RouteEntry`]
/// values. Duplicate `(method, pattern)` pairs resolve last-writer-wins;
/// shadowed entries are retained for operator diagnostics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    shadowed: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build a table from contributed entries in contribution order.
    ///
    /// When two entries share a conflict key, the later contribution wins
    /// and the earlier one is moved to the shadowed list with a logged
    /// warning. Handlers are never silently merged.
    pub fn from_contributions(contributions: Vec<RouteEntry>) -> Self {
        let mut entries: Vec<RouteEntry> = Vec::with_capacity(contributions.len());
        let mut shadowed = Vec::new();

        for entry in contributions {
            match entries
                .iter()
                .position(|e| e.conflict_key() == entry.conflict_key())
            {
                Some(i) => {
                    warn!(
                        method = %entry.method,
                        pattern = %entry.pattern,
                        previous_owner = %entries[i].owner,
                        new_owner = %entry.owner,
                        "Route conflict: earlier entry shadowed"
                    );
                    shadowed.push(std::mem::replace(&mut entries[i], entry));
                }
                None => entries.push(entry),
            }
        }

        Self { entries, shadowed }
    }

    /// All effective entries, in contribution order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Entries that lost a conflict and are not dispatched.
    pub fn shadowed(&self) -> &[RouteEntry] {
        &self.shadowed
    }

    /// Resolve a route by method and exact pattern.
    pub fn resolve(&self, method: RouteMethod, pattern: &str) -> Option<&RouteEntry> {
        self.entries
            .iter()
            .find(|e| e.method == method && e.pattern == pattern)
    }

    /// Number of effective entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(method: RouteMethod, pattern: &str, owner: &str) -> RouteEntry {
        RouteEntry::new(method, pattern, "TestController", "index").owned_by(owner)
    }

    #[test]
    fn test_union_of_distinct_routes() {
        let table = RouteTable::from_contributions(vec![
            entry(RouteMethod::Get, "/orders", "orders"),
            entry(RouteMethod::Get, "/blog", "blog"),
        ]);

        assert_eq!(table.len(), 2);
        assert!(table.resolve(RouteMethod::Get, "/orders").is_some());
        assert!(table.resolve(RouteMethod::Get, "/blog").is_some());
        assert!(table.shadowed().is_empty());
    }

    #[test]
    fn test_conflict_last_writer_wins() {
        let table = RouteTable::from_contributions(vec![
            entry(RouteMethod::Get, "/orders", "first"),
            entry(RouteMethod::Get, "/orders", "second"),
        ]);

        assert_eq!(table.len(), 1);
        let winner = table.resolve(RouteMethod::Get, "/orders").unwrap();
        assert_eq!(winner.owner, "second");
        assert_eq!(table.shadowed().len(), 1);
        assert_eq!(table.shadowed()[0].owner, "first");
    }

    #[test]
    fn test_same_pattern_different_method_is_not_a_conflict() {
        let table = RouteTable::from_contributions(vec![
            entry(RouteMethod::Get, "/orders", "a"),
            entry(RouteMethod::Post, "/orders", "a"),
        ]);

        assert_eq!(table.len(), 2);
        assert!(table.shadowed().is_empty());
    }
}
