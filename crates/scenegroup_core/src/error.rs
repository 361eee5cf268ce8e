//! Scene graph error types

use std::fmt;
use crate::NodeKey;

/// Error type for scene graph edits
///
/// Every variant is a precondition violation: the graph is purely in-memory,
/// so edits can only fail when the caller asks for something inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The key does not refer to a live node
    NodeNotFound(NodeKey),
    /// `remove_child` was called with a parent that does not own the child
    NotAChild {
        parent: NodeKey,
        child: NodeKey,
    },
    /// Attaching `child` under `parent` would make a node its own ancestor
    WouldCreateCycle {
        parent: NodeKey,
        child: NodeKey,
    },
    /// The root node can never be given a parent
    RootNotReparentable,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::NodeNotFound(key) => write!(f, "Node not found: {:?}", key),
            SceneError::NotAChild { parent, child } => {
                write!(f, "Node {:?} is not a child of {:?}", child, parent)
            }
            SceneError::WouldCreateCycle { parent, child } => write!(
                f,
                "Attaching {:?} under {:?} would create a cycle",
                child, parent
            ),
            SceneError::RootNotReparentable => write!(f, "The scene root cannot be re-parented"),
        }
    }
}

impl std::error::Error for SceneError {}
