//! Grouping toggle
//!
//! Moves a fixed set of member nodes between a group node and the scene root.
//!
//! - `Grouped`: the group is a child of the root and owns every member.
//! - `Ungrouped`: the group is detached and empty; every member is a direct
//!   child of the root.
//!
//! Re-parenting never touches the members' local transforms.

use crate::{NodeKey, SceneError, SceneGraph};

/// Which side of the toggle the members are on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupingState {
    Grouped,
    Ungrouped,
}

/// A transition performed by [`GroupingToggle::set_grouped`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupingTransition {
    /// Grouped -> Ungrouped
    Ungrouped,
    /// Ungrouped -> Grouped
    Grouped,
}

/// State machine that re-parents members between a group and the root
#[derive(Clone, Debug)]
pub struct GroupingToggle {
    group: NodeKey,
    members: Vec<NodeKey>,
    state: GroupingState,
}

impl GroupingToggle {
    /// Put `members` under `group` and `group` under the root.
    ///
    /// The returned toggle starts in [`GroupingState::Grouped`].
    pub fn attach(
        graph: &mut SceneGraph,
        group: NodeKey,
        members: Vec<NodeKey>,
    ) -> Result<Self, SceneError> {
        for &member in &members {
            graph.add_child(group, member)?;
        }
        graph.add_child(graph.root(), group)?;

        Ok(Self {
            group,
            members,
            state: GroupingState::Grouped,
        })
    }

    /// Current state
    #[inline]
    pub fn state(&self) -> GroupingState {
        self.state
    }

    #[inline]
    pub fn is_grouped(&self) -> bool {
        self.state == GroupingState::Grouped
    }

    /// The group node
    #[inline]
    pub fn group(&self) -> NodeKey {
        self.group
    }

    /// The nodes moved by the toggle
    #[inline]
    pub fn members(&self) -> &[NodeKey] {
        &self.members
    }

    /// Move to the requested state.
    ///
    /// Returns the transition performed, or `None` when already in that state.
    /// The graph edits below can only fail if something outside the toggle
    /// re-parented a member or the group; that is a programmer error and
    /// panics in debug builds. Release builds log it, finish the remaining
    /// edits and then read the state back from the graph, returning `None`
    /// if the target state was not reached.
    pub fn set_grouped(
        &mut self,
        graph: &mut SceneGraph,
        grouped: bool,
    ) -> Option<GroupingTransition> {
        let target = if grouped {
            GroupingState::Grouped
        } else {
            GroupingState::Ungrouped
        };
        if target == self.state {
            return None;
        }

        let root = graph.root();
        let mut intact = true;
        let transition = match target {
            GroupingState::Ungrouped => {
                for &member in &self.members {
                    intact &= check(graph.remove_child(self.group, member));
                }
                intact &= check(graph.remove_child(root, self.group));
                for &member in &self.members {
                    intact &= check(graph.add_child(root, member));
                }
                GroupingTransition::Ungrouped
            }
            GroupingState::Grouped => {
                // add_child detaches each member from the root
                for &member in &self.members {
                    intact &= check(graph.add_child(self.group, member));
                }
                intact &= check(graph.add_child(root, self.group));
                GroupingTransition::Grouped
            }
        };

        self.state = if intact { target } else { self.observe(graph) };
        if self.state != target {
            log::warn!("Grouping: {:?} not reached, scene is {:?}", target, self.state);
            return None;
        }

        log::info!(
            "Grouping: {:?} ({} members)",
            transition,
            self.members.len()
        );
        Some(transition)
    }

    /// Read the state off the graph: grouped only when the group hangs off
    /// the root and owns every member
    fn observe(&self, graph: &SceneGraph) -> GroupingState {
        let grouped = graph.is_child_of(self.group, graph.root())
            && self.members.iter().all(|&m| graph.is_child_of(m, self.group));
        if grouped {
            GroupingState::Grouped
        } else {
            GroupingState::Ungrouped
        }
    }
}

fn check(result: Result<(), SceneError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            if cfg!(debug_assertions) {
                panic!("grouping toggle precondition violated: {}", e);
            }
            log::error!("Grouping toggle precondition violated: {}", e);
            false
        }
    }
}
