pub mod generator;
pub mod grid;

pub use generator::{
    generate_cube, generate_faces, generate_target_letter, generate_tool, generate_variant,
};
pub use grid::{Grid, RollReport, RolledLine};
