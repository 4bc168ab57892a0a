use std::collections::VecDeque;

use crate::components::letter::Letter;
use crate::components::tool::ToolKind;
use crate::components::world::{Direction, Position};
use crate::core::presenter::{Presenter, Stage};
use crate::error::GameError;
use crate::rules::tools::{ToolEffect, ToolTarget};
use crate::simulation::grid::{Grid, RollReport, RolledLine};

/// Everything a [`ScriptedPresenter`] was asked to show, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Welcome(Letter),
    Grid,
    TurnHeader(u32),
    StageHeader(u32, Stage),
    Rolled(RollReport),
    Opened(Option<ToolKind>, Position),
    ToolApplied(ToolEffect),
    Error(GameError),
    GameEnd { target_letter: Letter, match_count: usize },
}

/// Presenter that answers from pre-loaded queues and records its output.
/// An empty queue reads as closed input.
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    edges: VecDeque<Position>,
    directions: VecDeque<Direction>,
    opens: VecDeque<Position>,
    targets: VecDeque<ToolTarget>,
    pub events: Vec<PresenterEvent>,
}

impl ScriptedPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edge(mut self, pos: Position) -> Self {
        self.edges.push_back(pos);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.directions.push_back(direction);
        self
    }

    pub fn open(mut self, pos: Position) -> Self {
        self.opens.push_back(pos);
        self
    }

    pub fn target(mut self, target: ToolTarget) -> Self {
        self.targets.push_back(target);
        self
    }

    pub fn errors(&self) -> Vec<&GameError> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Error(err) => Some(err),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for ScriptedPresenter {
    fn render_welcome(&mut self, target_letter: Letter) {
        self.events.push(PresenterEvent::Welcome(target_letter));
    }

    fn render_grid(&mut self, _grid: &Grid) {
        self.events.push(PresenterEvent::Grid);
    }

    fn render_turn_header(&mut self, turn: u32) {
        self.events.push(PresenterEvent::TurnHeader(turn));
    }

    fn render_stage_header(&mut self, turn: u32, stage: Stage) {
        self.events.push(PresenterEvent::StageHeader(turn, stage));
    }

    fn render_roll_result(&mut self, report: &RollReport) {
        self.events.push(PresenterEvent::Rolled(*report));
    }

    fn render_opened(&mut self, tool: Option<ToolKind>, pos: Position) {
        self.events.push(PresenterEvent::Opened(tool, pos));
    }

    fn render_tool_applied(&mut self, effect: &ToolEffect) {
        self.events.push(PresenterEvent::ToolApplied(*effect));
    }

    fn render_error(&mut self, error: &GameError) {
        self.events.push(PresenterEvent::Error(error.clone()));
    }

    fn render_game_end(&mut self, _grid: &Grid, target_letter: Letter, match_count: usize) {
        self.events.push(PresenterEvent::GameEnd {
            target_letter,
            match_count,
        });
    }

    fn request_edge_position(&mut self, _grid: &Grid) -> Option<Position> {
        self.edges.pop_front()
    }

    fn request_corner_direction(&mut self, _options: [Direction; 2]) -> Option<Direction> {
        self.directions.pop_front()
    }

    fn request_open_position(&mut self, _grid: &Grid, _line: RolledLine) -> Option<Position> {
        self.opens.pop_front()
    }

    fn request_tool_target(&mut self, _grid: &Grid, _tool: ToolKind) -> Option<ToolTarget> {
        self.targets.pop_front()
    }
}
