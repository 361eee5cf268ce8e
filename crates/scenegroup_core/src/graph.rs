//! Scene graph container
//!
//! The SceneGraph owns every node in a generational arena and maintains the
//! parent/child links between them. Exactly one node is the root; every other
//! node is either attached somewhere below it or detached (parentless).

use scenegroup_math::{mat4, Mat4, Vec3};
use slotmap::{new_key_type, SlotMap};
use crate::node::{DirtyFlags, SceneNode};
use crate::{SceneError, Transform3D};

new_key_type! {
    /// Key to a node in the scene graph
    ///
    /// Uses generational indexing so a stale key never aliases a newer node.
    pub struct NodeKey;
}

/// The scene graph
#[derive(Debug)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, SceneNode>,
    root: NodeKey,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph containing only a root node named "Scene"
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::root("Scene"));
        Self { nodes, root }
    }

    /// The root node key
    #[inline]
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Add a detached node to the graph, returning its key
    pub fn add_node(&mut self, node: SceneNode) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Get a node by key
    pub fn get(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Get the number of nodes, including the root and detached nodes
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Find the first node with the given name
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(key, _)| key)
    }

    /// The local transform of a node
    pub fn transform(&self, key: NodeKey) -> Option<&Transform3D> {
        self.nodes.get(key).map(|node| &node.transform)
    }

    /// Mutable access to a node's local transform; marks it dirty
    pub fn transform_mut(&mut self, key: NodeKey) -> Option<&mut Transform3D> {
        self.nodes.get_mut(key).map(|node| {
            node.mark_dirty(DirtyFlags::TRANSFORM);
            &mut node.transform
        })
    }

    /// Set a node's local position
    pub fn set_position(&mut self, key: NodeKey, position: Vec3) -> Result<(), SceneError> {
        let transform = self.transform_mut(key).ok_or(SceneError::NodeNotFound(key))?;
        transform.position = position;
        Ok(())
    }

    /// Set all three scale axes of a node to `scale`
    pub fn set_uniform_scale(&mut self, key: NodeKey, scale: f32) -> Result<(), SceneError> {
        let transform = self.transform_mut(key).ok_or(SceneError::NodeNotFound(key))?;
        transform.set_uniform_scale(scale);
        Ok(())
    }

    /// Add Euler angle increments to a node's rotation
    pub fn rotate(&mut self, key: NodeKey, delta: Vec3) -> Result<(), SceneError> {
        let transform = self.transform_mut(key).ok_or(SceneError::NodeNotFound(key))?;
        transform.rotate(delta);
        Ok(())
    }

    /// The parent of a node (None for the root and detached nodes)
    pub fn parent_of(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|node| node.parent)
    }

    /// Direct children of a node, empty for unknown keys
    pub fn children_of(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes
            .get(key)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Check whether `child` is a direct child of `parent`
    pub fn is_child_of(&self, child: NodeKey, parent: NodeKey) -> bool {
        self.parent_of(child) == Some(parent)
    }

    /// Check whether `ancestor` is `node` or lies on the path from `node` up to its top
    pub fn is_ancestor_or_self(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        let mut current = Some(node);
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            current = self.parent_of(key);
        }
        false
    }

    /// Check whether a node is reachable from the root
    pub fn is_attached(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key) && self.is_ancestor_or_self(self.root, key)
    }

    /// Attach `child` under `parent`.
    ///
    /// A node that already has a different parent is detached from it first,
    /// so a node is never listed under two parents. Attaching a node to the
    /// parent it already has is a no-op and keeps its position among siblings.
    pub fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        if !self.nodes.contains_key(child) {
            return Err(SceneError::NodeNotFound(child));
        }
        if child == self.root {
            return Err(SceneError::RootNotReparentable);
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(SceneError::WouldCreateCycle { parent, child });
        }

        let previous = self.parent_of(child);
        if previous == Some(parent) {
            return Ok(());
        }
        if let Some(previous) = previous {
            self.unlink(previous, child);
        }

        self.nodes[parent].children.push(child);
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.mark_dirty(DirtyFlags::HIERARCHY);
        Ok(())
    }

    /// Detach `child` from `parent`, leaving it parentless.
    ///
    /// Fails with [`SceneError::NotAChild`] if `parent` does not own `child`;
    /// the graph is left untouched in that case.
    pub fn remove_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        if !self.nodes.contains_key(child) {
            return Err(SceneError::NodeNotFound(child));
        }
        if self.parent_of(child) != Some(parent) {
            return Err(SceneError::NotAChild { parent, child });
        }

        self.unlink(parent, child);
        let node = &mut self.nodes[child];
        node.parent = None;
        node.mark_dirty(DirtyFlags::HIERARCHY);
        Ok(())
    }

    fn unlink(&mut self, parent: NodeKey, child: NodeKey) {
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.retain(|&key| key != child);
        }
    }

    /// Nodes reachable from the root, depth-first, parents before children
    pub fn attached_nodes(&self) -> Vec<NodeKey> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(key) = stack.pop() {
            order.push(key);
            // Reverse so children are visited in insertion order
            stack.extend(self.children_of(key).iter().rev().copied());
        }
        order
    }

    /// Attached mesh nodes in draw order
    pub fn drawables(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> + '_ {
        self.attached_nodes()
            .into_iter()
            .filter_map(move |key| self.nodes.get(key).map(|node| (key, node)))
            .filter(|(_, node)| node.is_mesh())
    }

    /// Check whether any node's world matrix is stale
    pub fn has_dirty_nodes(&self) -> bool {
        self.nodes.values().any(|node| node.is_dirty())
    }

    /// Recompute stale world matrices, parents before children.
    ///
    /// A node is recomputed when it is dirty or when its parent was
    /// recomputed. Detached subtrees are updated as if their top node
    /// were a root.
    pub fn update_world_matrices(&mut self) {
        let tops: Vec<NodeKey> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(key, _)| key)
            .collect();

        for top in tops {
            self.update_subtree(top, mat4::IDENTITY, false);
        }
    }

    fn update_subtree(&mut self, key: NodeKey, parent_world: Mat4, parent_changed: bool) {
        let Some(node) = self.nodes.get_mut(key) else {
            return;
        };

        let changed = parent_changed || node.is_dirty();
        if changed {
            node.world_matrix = mat4::mul(parent_world, node.transform.to_matrix());
            node.dirty = DirtyFlags::NONE;
        }

        let world = node.world_matrix;
        let children = node.children.clone();
        for child in children {
            self.update_subtree(child, world, changed);
        }
    }

    /// Cached world matrix of a node
    pub fn world_matrix(&self, key: NodeKey) -> Option<&Mat4> {
        self.nodes.get(key).map(|node| &node.world_matrix)
    }

    /// World-space position of a node as of the last matrix update
    pub fn world_position(&self, key: NodeKey) -> Option<Vec3> {
        self.world_matrix(key).map(mat4::translation_of)
    }

    /// Iterate over keys and nodes
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> {
        self.nodes.iter()
    }
}
