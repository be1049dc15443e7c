//! World implementations for the harness runner.

pub mod corridor_maze;
pub mod grid_maze;
pub mod line_world;
