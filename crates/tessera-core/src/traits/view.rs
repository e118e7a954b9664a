//! View/render collaborator contract.

use crate::result::AppResult;
use crate::types::component::Payload;

/// Renders a payload mapping under a template name.
///
/// The core never inspects rendered output; templating is the host's
/// concern.
pub trait ViewRenderer: Send + Sync + std::fmt::Debug {
    /// Render the payload for the given template.
    fn render(&self, template: &str, payload: &Payload) -> AppResult<String>;
}
