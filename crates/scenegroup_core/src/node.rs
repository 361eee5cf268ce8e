//! Scene node and Material types
//!
//! A SceneNode is one vertex of the scene graph: the root, a group, or a mesh.
//! Parent/child links are owned by the [`SceneGraph`](crate::SceneGraph);
//! a node only records them.

use bitflags::bitflags;
use scenegroup_math::{mat4, Mat4};
use serde::{Serialize, Deserialize};
use crate::{NodeKey, ShapeDescriptor, Transform3D};

bitflags! {
    /// Flags indicating why a node's cached world matrix is stale
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Local transform (position, rotation, scale) has changed
        const TRANSFORM = 1 << 0;
        /// Parent has changed
        const HIERARCHY = 1 << 1;
        /// All flags set - node needs a full refresh
        const ALL = Self::TRANSFORM.bits() | Self::HIERARCHY.bits();
    }
}

/// A Lambert material with just a base color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color as RGBA (each component 0.0-1.0)
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Material {
    /// Create a new material with the given RGBA color
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            base_color: [r, g, b, a],
        }
    }

    /// Create an opaque material from a packed `0xRRGGBB` value
    pub fn from_hex(rgb: u32) -> Self {
        let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
        let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
        let b = (rgb & 0xff) as f32 / 255.0;
        Self::new(r, g, b, 1.0)
    }

    pub const WHITE: Self = Self { base_color: [1.0, 1.0, 1.0, 1.0] };
    pub const RED: Self = Self { base_color: [1.0, 0.0, 0.0, 1.0] };
    pub const GREEN: Self = Self { base_color: [0.0, 1.0, 0.0, 1.0] };
    pub const BLUE: Self = Self { base_color: [0.0, 0.0, 1.0, 1.0] };
    pub const YELLOW: Self = Self { base_color: [1.0, 1.0, 0.0, 1.0] };
    pub const MAGENTA: Self = Self { base_color: [1.0, 0.0, 1.0, 1.0] };
    pub const CYAN: Self = Self { base_color: [0.0, 1.0, 1.0, 1.0] };
}

/// How materials are assigned to a mesh's surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Surface {
    /// One material for the whole mesh
    Single(Material),
    /// One material per material slot (box faces: +X, -X, +Y, -Y, +Z, -Z)
    PerSlot(Vec<Material>),
}

impl Surface {
    /// Material for a given slot, falling back to the last one available
    pub fn material_for_slot(&self, slot: usize) -> Material {
        match self {
            Surface::Single(material) => *material,
            Surface::PerSlot(materials) => materials
                .get(slot)
                .or_else(|| materials.last())
                .copied()
                .unwrap_or_default(),
        }
    }
}

/// What a node is
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// The top-level scene container
    Root,
    /// An aggregation node whose transform applies to all of its children
    Group,
    /// A renderable object
    Mesh {
        shape: ShapeDescriptor,
        surface: Surface,
    },
}

/// A node in the scene graph
///
/// Each node has:
/// - A name (for lookup and logging)
/// - A kind (root, group, or mesh)
/// - A local transform
/// - Parent/child links maintained by the graph
/// - A cached world matrix with dirty flags
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Name for this node (for lookup)
    pub name: String,
    /// What the node is
    pub kind: NodeKind,
    pub(crate) transform: Transform3D,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    pub(crate) world_matrix: Mat4,
    pub(crate) dirty: DirtyFlags,
}

impl SceneNode {
    fn with_kind(name: impl Into<String>, kind: NodeKind, transform: Transform3D) -> Self {
        Self {
            name: name.into(),
            kind,
            transform,
            parent: None,
            children: Vec::new(),
            world_matrix: mat4::IDENTITY,
            dirty: DirtyFlags::ALL, // New nodes are dirty
        }
    }

    /// Create a root node
    pub fn root(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Root, Transform3D::identity())
    }

    /// Create an empty group node
    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Group, Transform3D::identity())
    }

    /// Create a mesh node with the given shape, surface, and transform
    pub fn mesh(
        name: impl Into<String>,
        shape: ShapeDescriptor,
        surface: Surface,
        transform: Transform3D,
    ) -> Self {
        Self::with_kind(name, NodeKind::Mesh { shape, surface }, transform)
    }

    /// Set the local transform of a freshly built node
    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }

    /// The local transform
    #[inline]
    pub fn transform(&self) -> &Transform3D {
        &self.transform
    }

    /// The parent key, if attached
    #[inline]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Direct children in insertion order
    #[inline]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// World matrix as of the last `SceneGraph::update_world_matrices`
    #[inline]
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// Check if this node has any dirty flags set
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Get the current dirty flags
    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    #[inline]
    pub(crate) fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// True for mesh nodes
    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh { .. })
    }

    /// True for group nodes
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group)
    }
}
