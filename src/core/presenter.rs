use crate::components::letter::Letter;
use crate::components::tool::ToolKind;
use crate::components::world::{Direction, Position};
use crate::error::GameError;
use crate::rules::tools::{ToolEffect, ToolTarget};
use crate::simulation::grid::{Grid, RollReport, RolledLine};

/// The two halves of a turn: rolling, then opening and using a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    First,
    Second,
}

/// Boundary between the game core and whatever shows the game to a player.
///
/// The `render_*` calls are output only. The `request_*` calls block until
/// the player supplies a value; `None` means input has closed and the game
/// should wrap up. Requests do not have to pre-validate: the core checks
/// every answer and re-asks after reporting an
/// [`GameError::InvalidSelection`] through [`Presenter::render_error`].
pub trait Presenter {
    fn render_welcome(&mut self, target_letter: Letter);
    fn render_grid(&mut self, grid: &Grid);
    fn render_turn_header(&mut self, turn: u32);
    fn render_stage_header(&mut self, turn: u32, stage: Stage);
    fn render_roll_result(&mut self, report: &RollReport);
    fn render_opened(&mut self, tool: Option<ToolKind>, pos: Position);
    fn render_tool_applied(&mut self, effect: &ToolEffect);
    fn render_error(&mut self, error: &GameError);
    fn render_game_end(&mut self, grid: &Grid, target_letter: Letter, match_count: usize);

    fn request_edge_position(&mut self, grid: &Grid) -> Option<Position>;
    fn request_corner_direction(&mut self, options: [Direction; 2]) -> Option<Direction>;
    fn request_open_position(&mut self, grid: &Grid, line: RolledLine) -> Option<Position>;
    fn request_tool_target(&mut self, grid: &Grid, tool: ToolKind) -> Option<ToolTarget>;
}
