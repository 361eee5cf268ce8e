//! Scene Group - a cube and a sphere under a toggleable group node
//!
//! The library half of the crate holds everything the binary wires together,
//! so the demo's behaviour can be exercised headless from `tests/`.

pub mod config;
pub mod controls;
pub mod input;
pub mod scene;
pub mod systems;
