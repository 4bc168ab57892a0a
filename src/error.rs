//! Failure kinds surfaced by grid and tool operations.

use crate::components::tool::{TargetKind, ToolKind};
use crate::components::world::{Direction, Position};

/// Errors reported by the rules engine. None of them end the game; the turn
/// controller reports them and moves on to the next decision point or turn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// A fixed box was asked to roll or flip.
    #[error("box at {0} is a fixed box and cannot be moved")]
    ImmovableTarget(Position),

    /// `Fix` was applied to a box that is already fixed.
    #[error("box at {0} is already a fixed box")]
    AlreadyFixed(Position),

    /// A caller-supplied choice failed a precondition. Core state is unchanged.
    #[error("invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    /// Every edge box is fixed, so no roll can start.
    #[error("no movable edge boxes remain")]
    NoMovableEdge,
}

/// Why a caller-supplied choice was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("{0} is outside the grid")]
    OutOfBounds(Position),

    #[error("index {0} is outside the grid")]
    IndexOutOfBounds(usize),

    #[error("box at {0} is not on any of the edges")]
    NotOnEdge(Position),

    #[error("corner box at {0} needs a direction")]
    MissingCornerDirection(Position),

    #[error("box at {pos} cannot roll {}", .direction.label())]
    IllegalDirection { pos: Position, direction: Direction },

    #[error("box at {0} was not rolled this turn")]
    NotInRolledLine(Position),

    #[error("{tool} expects a {expected:?} target")]
    TargetMismatch { tool: ToolKind, expected: TargetKind },
}

/// Raised by a single cube when asked to move while immovable. The grid
/// attaches the position and turns it into [`GameError::ImmovableTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("fixed box cannot be moved")]
pub struct ImmovableCube;

impl ImmovableCube {
    pub fn at(self, pos: Position) -> GameError {
        GameError::ImmovableTarget(pos)
    }
}
