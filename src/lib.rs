// Re-export core modules for use by the binary or other consumers
pub mod components;
pub mod core;
pub mod data;
pub mod error;
pub mod rules;
pub mod simulation;
pub mod ui;

// Expose the main Game wrapper and types needed for interaction
pub use crate::components::{Cube, Direction, Letter, Position, ToolKind};
pub use crate::core::{Game, GameEnd, GameSummary, Presenter, TurnOutcome};
pub use crate::data::{load_game_config, ConfigError, GameConfig};
pub use crate::error::{GameError, SelectionError};
pub use crate::simulation::Grid;
