//! Tree-to-tree passes run before rendering.
//!
//! A profile lists its middlewares in order; each receives the previous
//! pass's output. Passes are total: they rewrite what they understand and
//! pass everything else through unchanged.

mod declaration;
mod imports;
mod naming;

pub use declaration::DeclarationMiddleware;
pub use imports::ImportMiddleware;
pub use naming::{NameCase, NamingMiddleware};

use crate::profile::Profile;
use crate::tree::Node;

/// A tree rewrite pass.
pub trait Middleware: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Rewrite `tree`. The profile is available read-only for table lookups.
    fn process(&self, tree: Node, profile: &Profile) -> Node;
}

/// Run a profile's pipeline over a tree, in declared order.
pub fn run(tree: Node, profile: &Profile) -> Node {
    profile.middlewares().iter().fold(tree, |tree, middleware| {
        tracing::trace!(middleware = middleware.name(), "running middleware");
        middleware.process(tree, profile)
    })
}
