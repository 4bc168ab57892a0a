//! One turn as an explicit state machine.
//!
//! A turn walks `SelectEdge -> [ChooseCornerDirection] -> Propagate ->
//! OpenCube -> [ApplyTool] -> Complete`. Every stage has its own transition
//! function that either advances (possibly back to the same stage after a
//! rejected answer) or aborts the turn.

use log::{debug, warn};

use crate::components::letter::Letter;
use crate::components::tool::ToolKind;
use crate::components::world::{Direction, Position};
use crate::core::presenter::{Presenter, Stage};
use crate::error::{GameError, SelectionError};
use crate::rules::tools::{apply_tool, ToolEffect, ToolPolicy};
use crate::simulation::grid::{Grid, RolledLine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnStage {
    SelectEdge,
    ChooseCornerDirection {
        edge: Position,
        options: [Direction; 2],
    },
    Propagate {
        edge: Position,
        direction: Option<Direction>,
    },
    OpenCube {
        line: RolledLine,
    },
    ApplyTool {
        tool: ToolKind,
        opened: Position,
    },
    Complete(TurnOutcome),
}

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The roll could not start; nothing moved and nothing was opened.
    Wasted(GameError),
    /// The opened box was empty or had been opened before.
    NoTool { opened: Position },
    ToolApplied { opened: Position, effect: ToolEffect },
    /// The tool was spent without effect. The turn still counts.
    ToolFailed {
        opened: Position,
        tool: ToolKind,
        error: GameError,
    },
    /// Input ended mid-turn.
    InputClosed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Advance(TurnStage),
    Abort(TurnOutcome),
}

/// Borrowed game state for the length of one turn.
pub struct Turn<'a, P: Presenter> {
    number: u32,
    grid: &'a mut Grid,
    target_letter: Letter,
    policy: ToolPolicy,
    presenter: &'a mut P,
}

impl<'a, P: Presenter> Turn<'a, P> {
    pub fn new(
        number: u32,
        grid: &'a mut Grid,
        target_letter: Letter,
        policy: ToolPolicy,
        presenter: &'a mut P,
    ) -> Self {
        Self {
            number,
            grid,
            target_letter,
            policy,
            presenter,
        }
    }

    /// Drive the turn from `SelectEdge` to its outcome.
    pub fn run(mut self) -> TurnOutcome {
        self.presenter.render_stage_header(self.number, Stage::First);
        let mut stage = TurnStage::SelectEdge;
        loop {
            debug!("turn stage {:?}", stage);
            let transition = match stage {
                TurnStage::SelectEdge => self.select_edge(),
                TurnStage::ChooseCornerDirection { edge, options } => {
                    self.choose_corner_direction(edge, options)
                }
                TurnStage::Propagate { edge, direction } => self.propagate(edge, direction),
                TurnStage::OpenCube { line } => self.open_cube(line),
                TurnStage::ApplyTool { tool, opened } => self.apply_tool(tool, opened),
                TurnStage::Complete(outcome) => return outcome,
            };
            stage = match transition {
                Transition::Advance(next) => next,
                Transition::Abort(outcome) => return outcome,
            };
        }
    }

    fn reject(&mut self, reason: SelectionError, retry: TurnStage) -> Transition {
        self.presenter
            .render_error(&GameError::InvalidSelection(reason));
        Transition::Advance(retry)
    }

    pub fn select_edge(&mut self) -> Transition {
        let Some(edge) = self.presenter.request_edge_position(self.grid) else {
            return Transition::Abort(TurnOutcome::InputClosed);
        };
        if !edge.in_bounds() {
            return self.reject(SelectionError::OutOfBounds(edge), TurnStage::SelectEdge);
        }
        if !edge.is_edge() {
            return self.reject(SelectionError::NotOnEdge(edge), TurnStage::SelectEdge);
        }
        match Grid::corner_directions(edge) {
            Some(options) => Transition::Advance(TurnStage::ChooseCornerDirection { edge, options }),
            None => Transition::Advance(TurnStage::Propagate {
                edge,
                direction: None,
            }),
        }
    }

    pub fn choose_corner_direction(
        &mut self,
        edge: Position,
        options: [Direction; 2],
    ) -> Transition {
        let Some(direction) = self.presenter.request_corner_direction(options) else {
            return Transition::Abort(TurnOutcome::InputClosed);
        };
        if !options.contains(&direction) {
            return self.reject(
                SelectionError::IllegalDirection {
                    pos: edge,
                    direction,
                },
                TurnStage::ChooseCornerDirection { edge, options },
            );
        }
        Transition::Advance(TurnStage::Propagate {
            edge,
            direction: Some(direction),
        })
    }

    pub fn propagate(&mut self, edge: Position, direction: Option<Direction>) -> Transition {
        match self.grid.roll_from_edge(edge, direction) {
            Ok(report) => {
                self.presenter.render_roll_result(&report);
                self.presenter.render_grid(self.grid);
                self.presenter
                    .render_stage_header(self.number, Stage::Second);
                Transition::Advance(TurnStage::OpenCube { line: report.line })
            }
            Err(GameError::InvalidSelection(reason)) => self.reject(reason, TurnStage::SelectEdge),
            Err(err) => {
                warn!("roll from {} wasted the turn: {}", edge, err);
                self.presenter.render_error(&err);
                Transition::Abort(TurnOutcome::Wasted(err))
            }
        }
    }

    pub fn open_cube(&mut self, line: RolledLine) -> Transition {
        let Some(pos) = self.presenter.request_open_position(self.grid, line) else {
            return Transition::Abort(TurnOutcome::InputClosed);
        };
        if !line.contains(pos) {
            return self.reject(SelectionError::NotInRolledLine(pos), TurnStage::OpenCube { line });
        }
        let tool = self.grid.get_mut(pos).open();
        self.presenter.render_opened(tool, pos);
        match tool {
            Some(tool) => Transition::Advance(TurnStage::ApplyTool { tool, opened: pos }),
            None => Transition::Advance(TurnStage::Complete(TurnOutcome::NoTool { opened: pos })),
        }
    }

    pub fn apply_tool(&mut self, tool: ToolKind, opened: Position) -> Transition {
        let Some(target) = self.presenter.request_tool_target(self.grid, tool) else {
            return Transition::Abort(TurnOutcome::InputClosed);
        };
        match apply_tool(tool, self.grid, self.target_letter, target, self.policy) {
            Ok(effect) => {
                self.presenter.render_tool_applied(&effect);
                self.presenter.render_grid(self.grid);
                Transition::Advance(TurnStage::Complete(TurnOutcome::ToolApplied {
                    opened,
                    effect,
                }))
            }
            Err(GameError::InvalidSelection(reason)) => {
                self.reject(reason, TurnStage::ApplyTool { tool, opened })
            }
            Err(error) => {
                warn!("{} failed: {}", tool, error);
                self.presenter.render_error(&error);
                Transition::Advance(TurnStage::Complete(TurnOutcome::ToolFailed {
                    opened,
                    tool,
                    error,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::cube::{Cube, Face, NUM_FACES};
    use crate::components::letter::Letter::*;
    use crate::core::scripted::{PresenterEvent, ScriptedPresenter};
    use crate::rules::tools::ToolTarget;

    const FACES: [Letter; NUM_FACES] = [A, B, C, D, E, F];

    fn grid_with_tools(tool: ToolKind) -> Grid {
        Grid::filled(Cube::regular(FACES, Some(tool)))
    }

    #[test]
    fn select_edge_rejects_interior_and_stays_put() {
        let mut grid = grid_with_tools(ToolKind::Flip);
        let mut presenter = ScriptedPresenter::new().edge(Position::new(3, 3));
        let mut turn = Turn::new(1, &mut grid, C, ToolPolicy::default(), &mut presenter);
        assert_eq!(turn.select_edge(), Transition::Advance(TurnStage::SelectEdge));
        assert_eq!(
            presenter.errors(),
            vec![&GameError::InvalidSelection(SelectionError::NotOnEdge(Position::new(3, 3)))]
        );
    }

    #[test]
    fn select_edge_routes_corners_to_direction_choice() {
        let mut grid = grid_with_tools(ToolKind::Flip);
        let mut presenter = ScriptedPresenter::new()
            .edge(Position::new(7, 7))
            .edge(Position::new(7, 3));
        let mut turn = Turn::new(1, &mut grid, C, ToolPolicy::default(), &mut presenter);
        assert_eq!(
            turn.select_edge(),
            Transition::Advance(TurnStage::ChooseCornerDirection {
                edge: Position::new(7, 7),
                options: [Direction::Left, Direction::Up],
            })
        );
        assert_eq!(
            turn.select_edge(),
            Transition::Advance(TurnStage::Propagate {
                edge: Position::new(7, 3),
                direction: None,
            })
        );
        assert_eq!(turn.select_edge(), Transition::Abort(TurnOutcome::InputClosed));
    }

    #[test]
    fn corner_direction_must_be_one_of_the_options() {
        let mut grid = grid_with_tools(ToolKind::Flip);
        let mut presenter = ScriptedPresenter::new()
            .direction(Direction::Up)
            .direction(Direction::Right);
        let edge = Position::new(0, 0);
        let options = [Direction::Right, Direction::Down];
        let mut turn = Turn::new(1, &mut grid, C, ToolPolicy::default(), &mut presenter);
        assert_eq!(
            turn.choose_corner_direction(edge, options),
            Transition::Advance(TurnStage::ChooseCornerDirection { edge, options })
        );
        assert_eq!(
            turn.choose_corner_direction(edge, options),
            Transition::Advance(TurnStage::Propagate {
                edge,
                direction: Some(Direction::Right),
            })
        );
    }

    #[test]
    fn rolling_a_fixed_edge_aborts_the_turn() {
        let mut grid = grid_with_tools(ToolKind::Flip);
        let edge = Position::new(0, 2);
        grid.replace(edge, Cube::fixed(FACES));
        let before = grid.clone();
        let mut presenter = ScriptedPresenter::new();
        let mut turn = Turn::new(1, &mut grid, C, ToolPolicy::default(), &mut presenter);
        assert_eq!(
            turn.propagate(edge, None),
            Transition::Abort(TurnOutcome::Wasted(GameError::ImmovableTarget(edge)))
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn open_outside_rolled_line_is_rejected() {
        let mut grid = grid_with_tools(ToolKind::Flip);
        let line = RolledLine::Row(4);
        let mut presenter = ScriptedPresenter::new()
            .open(Position::new(3, 4))
            .open(Position::new(4, 6));
        let mut turn = Turn::new(1, &mut grid, C, ToolPolicy::default(), &mut presenter);
        assert_eq!(turn.open_cube(line), Transition::Advance(TurnStage::OpenCube { line }));
        assert_eq!(
            turn.open_cube(line),
            Transition::Advance(TurnStage::ApplyTool {
                tool: ToolKind::Flip,
                opened: Position::new(4, 6),
            })
        );
        assert!(grid.get(Position::new(4, 6)).is_opened());
        assert!(!grid.get(Position::new(3, 4)).is_opened());
    }

    #[test]
    fn reopening_yields_no_tool() {
        let mut grid = grid_with_tools(ToolKind::StampPlus);
        let pos = Position::new(0, 5);
        grid.get_mut(pos).open();
        let mut presenter = ScriptedPresenter::new().open(pos);
        let mut turn = Turn::new(1, &mut grid, C, ToolPolicy::default(), &mut presenter);
        assert_eq!(
            turn.open_cube(RolledLine::Column(5)),
            Transition::Advance(TurnStage::Complete(TurnOutcome::NoTool { opened: pos }))
        );
        assert!(presenter
            .events
            .contains(&PresenterEvent::Opened(None, pos)));
    }

    #[test]
    fn failed_tool_still_completes_the_turn() {
        let mut grid = grid_with_tools(ToolKind::Fix);
        let target = Position::new(2, 2);
        grid.replace(target, Cube::fixed(FACES));
        let opened = Position::new(0, 1);
        let mut presenter = ScriptedPresenter::new().target(ToolTarget::Cell(target));
        let mut turn = Turn::new(1, &mut grid, C, ToolPolicy::default(), &mut presenter);
        assert_eq!(
            turn.apply_tool(ToolKind::Fix, opened),
            Transition::Advance(TurnStage::Complete(TurnOutcome::ToolFailed {
                opened,
                tool: ToolKind::Fix,
                error: GameError::AlreadyFixed(target),
            }))
        );
    }

    #[test]
    fn mismatched_tool_target_is_asked_again() {
        let mut grid = grid_with_tools(ToolKind::StampRow);
        let opened = Position::new(0, 1);
        let mut presenter = ScriptedPresenter::new()
            .target(ToolTarget::Column(3))
            .target(ToolTarget::Row(6));
        let mut turn = Turn::new(1, &mut grid, G, ToolPolicy::default(), &mut presenter);
        assert_eq!(
            turn.apply_tool(ToolKind::StampRow, opened),
            Transition::Advance(TurnStage::ApplyTool {
                tool: ToolKind::StampRow,
                opened,
            })
        );
        assert!(matches!(
            turn.apply_tool(ToolKind::StampRow, opened),
            Transition::Advance(TurnStage::Complete(TurnOutcome::ToolApplied { .. }))
        ));
        assert_eq!(grid.count_matching(G), 8);
    }

    #[test]
    fn wasted_roll_never_reaches_second_stage() {
        let mut grid = grid_with_tools(ToolKind::Flip);
        let edge = Position::new(3, 0);
        grid.replace(edge, Cube::fixed(FACES));
        let mut presenter = ScriptedPresenter::new().edge(edge);
        Turn::new(4, &mut grid, C, ToolPolicy::default(), &mut presenter).run();
        let headers: Vec<_> = presenter
            .events
            .iter()
            .filter(|event| matches!(event, PresenterEvent::StageHeader(..)))
            .collect();
        assert_eq!(headers, vec![&PresenterEvent::StageHeader(4, Stage::First)]);
    }

    #[test_log::test]
    fn full_turn_runs_every_stage() {
        let mut grid = grid_with_tools(ToolKind::StampColumn);
        let mut presenter = ScriptedPresenter::new()
            .edge(Position::new(0, 0))
            .direction(Direction::Down)
            .open(Position::new(5, 0))
            .target(ToolTarget::Column(0));
        let outcome = Turn::new(1, &mut grid, H, ToolPolicy::default(), &mut presenter).run();
        match outcome {
            TurnOutcome::ToolApplied { opened, effect } => {
                assert_eq!(opened, Position::new(5, 0));
                assert_eq!(effect.tool, ToolKind::StampColumn);
                assert_eq!(effect.changed, 8);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(grid.count_matching(H), 8);
        let second = presenter
            .events
            .iter()
            .position(|event| *event == PresenterEvent::StageHeader(1, Stage::Second));
        let opened = presenter
            .events
            .iter()
            .position(|event| matches!(event, PresenterEvent::Opened(..)));
        assert!(second.is_some() && second < opened);
        // old tops were tipped onto the front face before the stamp
        assert_eq!(grid.get(Position::new(3, 0)).face(Face::Front), A);
        assert_eq!(grid.get(Position::new(3, 1)).top(), A);
    }
}
