//! CPU-side triangle meshes

mod mesh;

pub use mesh::{box_mesh, sphere_mesh, MeshData, MeshVertex, MAX_SPHERE_SEGMENTS};
