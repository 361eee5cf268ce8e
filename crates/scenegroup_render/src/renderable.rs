//! GPU buffers for the drawable nodes of a scene graph
//!
//! Geometry is uploaded once per mesh node, the first time the node is seen
//! attached. Every frame only the model matrices are rewritten, and the list
//! of visible nodes is rebuilt from the graph so detached subtrees are skipped.

use std::collections::HashMap;
use wgpu::util::DeviceExt;
use scenegroup_core::{NodeKey, NodeKind, SceneGraph, SceneNode};

use crate::geometry::MeshData;
use crate::pipeline::{MeshPipeline, ObjectUniforms};

/// Uploaded geometry and per-object uniforms for one mesh node
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, pipeline: &MeshPipeline, name: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", name)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let (uniform_buffer, bind_group) =
            pipeline.create_object_binding(device, &format!("{} Object Uniforms", name));

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            uniform_buffer,
            bind_group,
        }
    }
}

/// Build the CPU mesh for a node, or `None` for non-mesh nodes
pub fn mesh_for_node(node: &SceneNode) -> Option<MeshData> {
    match &node.kind {
        NodeKind::Mesh { shape, surface } => Some(MeshData::from_shape(shape, surface)),
        NodeKind::Root | NodeKind::Group => None,
    }
}

/// GPU-side mirror of a scene graph's drawables
#[derive(Default)]
pub struct RenderableScene {
    meshes: HashMap<NodeKey, GpuMesh>,
    visible: Vec<NodeKey>,
}

impl RenderableScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload new meshes, write model matrices and record what is visible.
    ///
    /// World matrices in `scene` must already be up to date.
    pub fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipeline: &MeshPipeline,
        scene: &SceneGraph,
    ) {
        self.visible.clear();

        for (key, node) in scene.drawables() {
            if !self.meshes.contains_key(&key) {
                let Some(mesh) = mesh_for_node(node) else { continue };
                log::info!(
                    "Uploaded mesh '{}': {} vertices, {} triangles",
                    node.name,
                    mesh.vertex_count(),
                    mesh.triangle_count()
                );
                self.meshes.insert(key, GpuMesh::upload(device, pipeline, &node.name, &mesh));
            }

            if let Some(gpu) = self.meshes.get(&key) {
                let uniforms = ObjectUniforms { model_matrix: *node.world_matrix() };
                queue.write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
                self.visible.push(key);
            }
        }

        // Nodes are never destroyed by the demo, but keep the cache honest
        self.meshes.retain(|key, _| scene.get(*key).is_some());
    }

    /// Meshes to draw this frame, in scene order
    pub fn visible(&self) -> impl Iterator<Item = &GpuMesh> + '_ {
        self.visible.iter().filter_map(|key| self.meshes.get(key))
    }

    #[inline]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Number of meshes with uploaded geometry, visible or not
    #[inline]
    pub fn uploaded_count(&self) -> usize {
        self.meshes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenegroup_core::{Material, ShapeDescriptor, Surface, Transform3D};

    #[test]
    fn test_mesh_for_node() {
        let cube = SceneNode::mesh(
            "cube",
            ShapeDescriptor::cube(1.0),
            Surface::Single(Material::RED),
            Transform3D::identity(),
        );
        let mesh = mesh_for_node(&cube).unwrap();
        assert_eq!(mesh.triangle_count(), 12);

        assert!(mesh_for_node(&SceneNode::group("group")).is_none());
        assert!(mesh_for_node(&SceneNode::root("root")).is_none());
    }

    #[test]
    fn test_empty_scene() {
        let scene = RenderableScene::new();
        assert_eq!(scene.visible_count(), 0);
        assert_eq!(scene.uploaded_count(), 0);
        assert_eq!(scene.visible().count(), 0);
    }
}
