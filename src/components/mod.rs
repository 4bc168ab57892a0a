pub mod cube;
pub mod letter;
pub mod tool;
pub mod world;

pub use cube::{roll_cycle, BoxVariant, Capabilities, Cube, Face, UnchangingFlip, NUM_FACES};
pub use letter::Letter;
pub use tool::{TargetKind, ToolKind};
pub use world::{Direction, Position, GRID_SIZE};
