//! Runtime toggle flags
//!
//! ToggleState is the context object shared by the control surface (the only
//! writer) and the grouping toggle / update loop (readers).

use serde::{Serialize, Deserialize};

/// Flags controlled from the control panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleState {
    /// Whether the cube and sphere live under the group node
    pub group_objects: bool,
    /// Whether the update loop spins the group node
    pub rotate_group: bool,
}

impl Default for ToggleState {
    fn default() -> Self {
        Self {
            group_objects: true,
            rotate_group: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let toggles = ToggleState::default();
        assert!(toggles.group_objects);
        assert!(!toggles.rotate_group);
    }
}
