use log::debug;

use crate::components::cube::UnchangingFlip;
use crate::components::letter::Letter;
use crate::components::tool::{TargetKind, ToolKind};
use crate::components::world::{Direction, Position, GRID_SIZE};
use crate::error::{GameError, SelectionError};
use crate::simulation::grid::Grid;

/// Where a tool is aimed: a full cell, or just a row or column index for the
/// mass stamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolTarget {
    Cell(Position),
    Row(usize),
    Column(usize),
}

impl ToolTarget {
    pub fn kind(&self) -> TargetKind {
        match self {
            ToolTarget::Cell(_) => TargetKind::Cell,
            ToolTarget::Row(_) => TargetKind::Row,
            ToolTarget::Column(_) => TargetKind::Column,
        }
    }
}

/// Rule switches that tools consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolPolicy {
    pub unchanging_flip: UnchangingFlip,
}

/// What a successful application changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolEffect {
    pub tool: ToolKind,
    pub target: ToolTarget,
    /// Cells whose faces were rewritten or that were replaced.
    pub changed: usize,
}

/// Replace the cell with a fixed copy of its current faces.
pub fn fix_box(grid: &mut Grid, pos: Position) -> Result<usize, GameError> {
    let current = grid.get(pos);
    if current.is_fixed() {
        return Err(GameError::AlreadyFixed(pos));
    }
    let fixed = current.to_fixed();
    let replaced = grid.replace(pos, fixed);
    if let Some(tool) = replaced.tool() {
        debug!("fixing {} discarded unopened {}", pos, tool);
    }
    Ok(1)
}

pub fn flip_box(grid: &mut Grid, pos: Position, policy: ToolPolicy) -> Result<usize, GameError> {
    let flipped = grid
        .get_mut(pos)
        .flip(policy.unchanging_flip)
        .map_err(|err| err.at(pos))?;
    Ok(usize::from(flipped))
}

pub fn stamp_row(grid: &mut Grid, letter: Letter, row: usize) -> usize {
    (0..GRID_SIZE)
        .filter(|col| grid.get_mut(Position::new(row, *col)).stamp_top(letter))
        .count()
}

pub fn stamp_column(grid: &mut Grid, letter: Letter, col: usize) -> usize {
    (0..GRID_SIZE)
        .filter(|row| grid.get_mut(Position::new(*row, col)).stamp_top(letter))
        .count()
}

/// Stamp the cell and its in-bounds orthogonal neighbours.
pub fn stamp_plus(grid: &mut Grid, letter: Letter, center: Position) -> usize {
    let mut cells = vec![center];
    cells.extend(Direction::ALL.iter().filter_map(|dir| center.step(*dir)));
    cells
        .into_iter()
        .filter(|pos| grid.get_mut(*pos).stamp_top(letter))
        .count()
}

/// Check that the target shape matches the tool and lies on the grid.
pub fn validate_target(tool: ToolKind, target: ToolTarget) -> Result<(), SelectionError> {
    if tool.target_kind() != target.kind() {
        return Err(SelectionError::TargetMismatch {
            tool,
            expected: tool.target_kind(),
        });
    }
    match target {
        ToolTarget::Cell(pos) if !pos.in_bounds() => Err(SelectionError::OutOfBounds(pos)),
        ToolTarget::Row(index) | ToolTarget::Column(index) if index >= GRID_SIZE => {
            Err(SelectionError::IndexOutOfBounds(index))
        }
        _ => Ok(()),
    }
}

/// Run a tool against the grid. Failures leave the grid untouched.
pub fn apply_tool(
    tool: ToolKind,
    grid: &mut Grid,
    target_letter: Letter,
    target: ToolTarget,
    policy: ToolPolicy,
) -> Result<ToolEffect, GameError> {
    validate_target(tool, target)?;
    let changed = match (tool, target) {
        (ToolKind::Fix, ToolTarget::Cell(pos)) => fix_box(grid, pos)?,
        (ToolKind::Flip, ToolTarget::Cell(pos)) => flip_box(grid, pos, policy)?,
        (ToolKind::StampPlus, ToolTarget::Cell(pos)) => stamp_plus(grid, target_letter, pos),
        (ToolKind::StampRow, ToolTarget::Row(row)) => stamp_row(grid, target_letter, row),
        (ToolKind::StampColumn, ToolTarget::Column(col)) => stamp_column(grid, target_letter, col),
        _ => unreachable!("validate_target rejects mismatched targets"),
    };
    debug!("{} on {:?} changed {} boxes", tool, target, changed);
    Ok(ToolEffect {
        tool,
        target,
        changed,
    })
}
