//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for adding objects to a scene graph and gathering
//! them under one toggleable group.

use scenegroup_core::{
    GroupingToggle, GroupingTransition, NodeKey, SceneError, SceneGraph, SceneNode,
    ShapeDescriptor, Surface, Transform3D, Vec3,
};
use crate::config::SceneConfig;

/// Add a detached mesh node to `graph`
pub fn create_object(
    graph: &mut SceneGraph,
    name: &str,
    shape: ShapeDescriptor,
    surface: Surface,
    position: Vec3,
    scale: f32,
) -> NodeKey {
    graph.add_node(SceneNode::mesh(
        name,
        shape,
        surface,
        Transform3D::from_position_scale(position, scale),
    ))
}

/// Builder for a scene whose objects share one group
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new()
///     .add_object("cube", ShapeDescriptor::cube(1.0), faces, Vec3::new(-1.5, 0.0, 0.0))
///     .add_object("sphere", ShapeDescriptor::sphere(0.5, 32, 32), purple, Vec3::new(2.0, 0.0, 0.0))
///     .build("group")?;
/// ```
pub struct SceneBuilder {
    graph: SceneGraph,
    members: Vec<NodeKey>,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder {
    /// Create a new scene builder
    pub fn new() -> Self {
        Self {
            graph: SceneGraph::new(),
            members: Vec::new(),
        }
    }

    /// Add an object at unit scale that will join the group
    pub fn add_object(mut self, name: &str, shape: ShapeDescriptor, surface: Surface, position: Vec3) -> Self {
        let key = create_object(&mut self.graph, name, shape, surface, position, 1.0);
        self.members.push(key);
        self
    }

    /// Create the group, put every object under it and the group under the root
    pub fn build(mut self, group_name: &str) -> Result<(SceneGraph, GroupingToggle), SceneError> {
        let group = self.graph.add_node(SceneNode::group(group_name));
        let toggle = GroupingToggle::attach(&mut self.graph, group, self.members)?;
        log::info!(
            "Built scene: {} nodes, group '{}' with {} members",
            self.graph.node_count(),
            group_name,
            toggle.members().len()
        );
        Ok((self.graph, toggle))
    }
}

/// The demo scene: a cube and a sphere that can be grouped
#[derive(Debug)]
pub struct DemoScene {
    pub graph: SceneGraph,
    pub cube: NodeKey,
    pub sphere: NodeKey,
    pub group: NodeKey,
    pub grouping: GroupingToggle,
}

impl DemoScene {
    /// Build the scene described by `config`.
    ///
    /// Objects start grouped; if `config.group_objects` is false the
    /// ungrouping transition is applied before returning.
    pub fn build(config: &SceneConfig) -> Result<Self, SceneError> {
        let [w_segments, h_segments] = config.sphere_segments;
        let (graph, grouping) = SceneBuilder::new()
            .add_object(
                "cube",
                ShapeDescriptor::cube(config.cube_size),
                Surface::PerSlot(config.cube_materials()),
                Vec3::from_array(config.cube_position),
            )
            .add_object(
                "sphere",
                ShapeDescriptor::sphere(config.sphere_radius, w_segments, h_segments),
                Surface::Single(config.sphere_material()),
                Vec3::from_array(config.sphere_position),
            )
            .build("group")?;

        let (cube, sphere) = match *grouping.members() {
            [cube, sphere] => (cube, sphere),
            _ => unreachable!("builder was given exactly two objects"),
        };

        let mut scene = Self {
            graph,
            cube,
            sphere,
            group: grouping.group(),
            grouping,
        };
        if !config.group_objects {
            scene.set_grouped(false);
        }
        Ok(scene)
    }

    /// Run the grouping toggle
    pub fn set_grouped(&mut self, grouped: bool) -> Option<GroupingTransition> {
        self.grouping.set_grouped(&mut self.graph, grouped)
    }

    #[inline]
    pub fn is_grouped(&self) -> bool {
        self.grouping.is_grouped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenegroup_core::{Material, NodeKind};

    #[test]
    fn test_create_object_is_detached() {
        let mut graph = SceneGraph::new();
        let key = create_object(
            &mut graph,
            "box",
            ShapeDescriptor::cube(2.0),
            Surface::Single(Material::WHITE),
            Vec3::new(1.0, 2.0, 3.0),
            0.5,
        );

        assert!(!graph.is_attached(key));
        let t = graph.transform(key).unwrap();
        assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.scale, Vec3::splat(0.5));
    }

    #[test]
    fn test_demo_scene_defaults() {
        let scene = DemoScene::build(&SceneConfig::default()).unwrap();
        let root = scene.graph.root();

        assert!(scene.is_grouped());
        assert_eq!(scene.graph.children_of(root), &[scene.group]);
        assert_eq!(scene.graph.children_of(scene.group), &[scene.cube, scene.sphere]);

        let cube = scene.graph.get(scene.cube).unwrap();
        assert_eq!(cube.name, "cube");
        assert_eq!(cube.transform().position, Vec3::new(-1.5, 0.0, 0.0));
        match &cube.kind {
            NodeKind::Mesh { surface: Surface::PerSlot(faces), .. } => assert_eq!(faces.len(), 6),
            other => panic!("cube should be a six-material mesh, got {:?}", other),
        }

        let sphere = scene.graph.get(scene.sphere).unwrap();
        assert_eq!(sphere.transform().position, Vec3::new(2.0, 0.0, 0.0));
        match &sphere.kind {
            NodeKind::Mesh { shape, .. } => assert_eq!(*shape, ShapeDescriptor::sphere(0.5, 32, 32)),
            other => panic!("sphere should be a mesh, got {:?}", other),
        }
    }

    #[test]
    fn test_demo_scene_can_start_ungrouped() {
        let config = SceneConfig {
            group_objects: false,
            ..SceneConfig::default()
        };
        let scene = DemoScene::build(&config).unwrap();
        let root = scene.graph.root();

        assert!(!scene.is_grouped());
        assert_eq!(scene.graph.children_of(root), &[scene.cube, scene.sphere]);
        assert!(scene.graph.children_of(scene.group).is_empty());
    }
}
