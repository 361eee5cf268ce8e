//! Integration tests for the grouping toggle and update loop
//!
//! These tests drive the scene the way the demo does:
//! 1. Build cube + sphere under a group attached to the root
//! 2. Flip `group_objects` through every short sequence of values
//! 3. Check single-parent membership after every flip
//! 4. Tick the update loop and check what gets rendered

use scenegroup_core::{
    CancellationToken, FrameRecorder, FrameTicker, GroupingToggle, Material, NodeKey,
    SceneGraph, SceneNode, ShapeDescriptor, Surface, ToggleState, Transform3D, UpdateLoop, Vec3,
};

struct Demo {
    graph: SceneGraph,
    cube: NodeKey,
    sphere: NodeKey,
    group: NodeKey,
    toggle: GroupingToggle,
}

fn build_demo() -> Demo {
    let mut graph = SceneGraph::new();
    let cube = graph.add_node(SceneNode::mesh(
        "cube",
        ShapeDescriptor::cube(1.0),
        Surface::PerSlot(vec![
            Material::RED,
            Material::GREEN,
            Material::BLUE,
            Material::YELLOW,
            Material::MAGENTA,
            Material::CYAN,
        ]),
        Transform3D::from_position(Vec3::new(-1.5, 0.0, 0.0)),
    ));
    let sphere = graph.add_node(SceneNode::mesh(
        "sphere",
        ShapeDescriptor::sphere(0.5, 32, 32),
        Surface::Single(Material::from_hex(0x800080)),
        Transform3D::from_position(Vec3::new(2.0, 0.0, 0.0)),
    ));
    let group = graph.add_node(SceneNode::group("group"));
    let toggle = GroupingToggle::attach(&mut graph, group, vec![cube, sphere])
        .expect("fresh nodes can always be attached");

    Demo { graph, cube, sphere, group, toggle }
}

/// Each object is a child of exactly one of {group, root}
fn assert_single_parent(demo: &Demo) {
    let root = demo.graph.root();
    for object in [demo.cube, demo.sphere] {
        let under_group = demo.graph.children_of(demo.group).contains(&object);
        let under_root = demo.graph.children_of(root).contains(&object);
        assert!(
            under_group ^ under_root,
            "object must have exactly one parent (group: {}, root: {})",
            under_group,
            under_root
        );
        let count_group = demo.graph.children_of(demo.group).iter().filter(|&&k| k == object).count();
        let count_root = demo.graph.children_of(root).iter().filter(|&&k| k == object).count();
        assert_eq!(count_group + count_root, 1);
    }
}

fn assert_grouped_membership(demo: &Demo) {
    let root = demo.graph.root();
    assert_eq!(demo.graph.children_of(demo.group), &[demo.cube, demo.sphere]);
    assert_eq!(demo.graph.children_of(root), &[demo.group]);
}

fn assert_ungrouped_membership(demo: &Demo) {
    let root = demo.graph.root();
    assert!(demo.graph.children_of(demo.group).is_empty());
    assert_eq!(demo.graph.children_of(root), &[demo.cube, demo.sphere]);
}

#[test]
fn test_initial_state_is_grouped() {
    let demo = build_demo();
    assert!(demo.toggle.is_grouped());
    assert_grouped_membership(&demo);
    assert_single_parent(&demo);
}

#[test]
fn test_every_toggle_sequence_keeps_single_parent() {
    const MAX_LEN: u32 = 8;

    for len in 0..=MAX_LEN {
        for bits in 0..(1u32 << len) {
            let mut demo = build_demo();
            for i in 0..len {
                let value = bits & (1 << i) != 0;
                demo.toggle.set_grouped(&mut demo.graph, value);
                assert_single_parent(&demo);

                if value {
                    assert_grouped_membership(&demo);
                } else {
                    assert_ungrouped_membership(&demo);
                }
            }
        }
    }
}

#[test]
fn test_ungroup_then_regroup_matches_initial() {
    let mut demo = build_demo();
    let initial_root: Vec<_> = demo.graph.children_of(demo.graph.root()).to_vec();
    let initial_group: Vec<_> = demo.graph.children_of(demo.group).to_vec();

    demo.toggle.set_grouped(&mut demo.graph, false);
    assert_ungrouped_membership(&demo);
    demo.toggle.set_grouped(&mut demo.graph, true);

    assert_eq!(demo.graph.children_of(demo.graph.root()), initial_root.as_slice());
    assert_eq!(demo.graph.children_of(demo.group), initial_group.as_slice());
}

#[test]
fn test_rotation_moves_members_only_when_grouped() {
    let mut demo = build_demo();
    let update = UpdateLoop::new(demo.group);
    let toggles = ToggleState { group_objects: false, rotate_group: true };
    let mut recorder: FrameRecorder<()> = FrameRecorder::new();

    demo.toggle.set_grouped(&mut demo.graph, toggles.group_objects);
    for tick in FrameTicker::new(CancellationToken::new()).take(100) {
        update.tick(tick, &mut demo.graph, &toggles, &mut recorder, &()).unwrap();
    }

    // The detached group still spins, but the objects sit directly under the root
    let frame = recorder.last_frame().unwrap();
    assert_eq!(frame.items.len(), 2);
    let cube = frame.item("cube").unwrap();
    assert_eq!(cube.world_matrix[3][0], -1.5);
    assert_eq!(cube.world_matrix[0][0], 1.0);

    // Regroup: the accumulated rotation now applies to both objects
    demo.toggle.set_grouped(&mut demo.graph, true);
    let toggles = ToggleState { group_objects: true, rotate_group: false };
    for tick in FrameTicker::new(CancellationToken::new()).take(1) {
        update.tick(tick, &mut demo.graph, &toggles, &mut recorder, &()).unwrap();
    }
    let cube_pos = demo.graph.world_position(demo.cube).unwrap();
    assert!((cube_pos.length() - 1.5).abs() < 1e-4);
    assert!((cube_pos - Vec3::new(-1.5, 0.0, 0.0)).length() > 0.1);
}
