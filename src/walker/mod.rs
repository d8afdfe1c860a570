// Mon Feb 02 2026 - Alex

pub mod error;
pub mod root;
pub mod tree;
pub mod visited;
pub mod walker;

pub use error::{TraversalError, WalkError};
pub use root::{Root, RootKind};
pub use tree::{ContributionNode, ContributionTree};
pub use visited::VisitedSet;
pub use walker::{GraphWalker, ValueShape};
