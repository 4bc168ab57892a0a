use std::io::{BufRead, Write};

use log::warn;

use crate::components::letter::Letter;
use crate::components::tool::{TargetKind, ToolKind};
use crate::components::world::{Direction, Position};
use crate::core::presenter::{Presenter, Stage};
use crate::error::GameError;
use crate::rules::tools::{ToolEffect, ToolTarget};
use crate::simulation::grid::{Grid, RollReport, RolledLine};
use crate::ui::input::{
    is_view_command, parse_column, parse_corner_direction, parse_position, parse_row,
};
use crate::ui::render::{
    cell_label, describe_error, direction_text, render_box_net, render_game_end, render_grid,
    render_opened, render_roll_result, render_stage_header, render_tool_applied,
    render_turn_header, render_welcome,
};

const INVALID_FORMAT: &str = "INCORRECT INPUT: Invalid format. Please reenter the location: ";

/// Line-based terminal front end. Reads answers from `input` and writes
/// everything to `output`; generic so tests can drive it with byte buffers.
pub struct ConsolePresenter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePresenter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = self
            .output
            .write_all(text.as_bytes())
            .and_then(|_| self.output.flush())
        {
            warn!("failed to write to console: {}", err);
        }
    }

    /// Next trimmed line, skipping blank ones. `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        loop {
            self.emit(prompt);
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    self.emit("\n");
                    return None;
                }
                Ok(_) => {}
                Err(err) => {
                    warn!("failed to read from console: {}", err);
                    return None;
                }
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }

    /// Like [`Self::read_line`], but answers `VIEW` with a box net first.
    fn read_answer(&mut self, prompt: &str, grid: &Grid) -> Option<String> {
        loop {
            let answer = self.read_line(prompt)?;
            if is_view_command(&answer) {
                self.view_box_net(grid)?;
                continue;
            }
            return Some(answer);
        }
    }

    fn view_box_net(&mut self, grid: &Grid) -> Option<()> {
        let answer = self.read_line("Please enter the location of the box you want to view: ")?;
        match parse_position(&answer).filter(|pos| pos.in_bounds()) {
            Some(pos) => {
                let net = render_box_net(grid.get(pos));
                self.emit(&format!("Box at {}:\n{}\n", cell_label(pos), net));
            }
            None => self.emit("INCORRECT INPUT: Invalid format!\n"),
        }
        Some(())
    }

    fn read_position(&mut self, prompt: &str, grid: &Grid) -> Option<Position> {
        loop {
            let answer = self.read_answer(prompt, grid)?;
            match parse_position(&answer) {
                Some(pos) => return Some(pos),
                None => self.emit(&format!("{}\n", INVALID_FORMAT)),
            }
        }
    }

    fn read_index(
        &mut self,
        prompt: &str,
        grid: &Grid,
        parse: fn(&str) -> Option<usize>,
    ) -> Option<usize> {
        loop {
            let answer = self.read_answer(prompt, grid)?;
            match parse(&answer) {
                Some(index) => return Some(index),
                None => self.emit("INCORRECT INPUT: Please enter a number from 1 to 8.\n"),
            }
        }
    }
}

impl<R: BufRead, W: Write> Presenter for ConsolePresenter<R, W> {
    fn render_welcome(&mut self, target_letter: Letter) {
        self.emit(&format!("\n{}\n", render_welcome(target_letter)));
    }

    fn render_grid(&mut self, grid: &Grid) {
        self.emit(&render_grid(grid));
    }

    fn render_turn_header(&mut self, turn: u32) {
        self.emit(&format!("\n{}", render_turn_header(turn)));
    }

    fn render_stage_header(&mut self, turn: u32, stage: Stage) {
        self.emit(&format!("{}\n", render_stage_header(turn, stage)));
    }

    fn render_roll_result(&mut self, report: &RollReport) {
        self.emit(&render_roll_result(report));
    }

    fn render_opened(&mut self, tool: Option<ToolKind>, pos: Position) {
        self.emit(&format!("{}\n", render_opened(tool, pos)));
    }

    fn render_tool_applied(&mut self, effect: &ToolEffect) {
        self.emit(&render_tool_applied(effect));
    }

    fn render_error(&mut self, error: &GameError) {
        self.emit(&format!("{}\n", describe_error(error)));
    }

    fn render_game_end(&mut self, grid: &Grid, target_letter: Letter, match_count: usize) {
        self.emit(&render_game_end(grid, target_letter, match_count));
    }

    fn request_edge_position(&mut self, grid: &Grid) -> Option<Position> {
        self.read_position(
            "Please enter the location of the edge box you want to roll (R#-C# or #-#, VIEW for a box net): ",
            grid,
        )
    }

    fn request_corner_direction(&mut self, options: [Direction; 2]) -> Option<Direction> {
        let prompt = format!(
            "The chosen box can be rolled to either [1] {} or [2] {}: ",
            direction_text(options[0]),
            direction_text(options[1])
        );
        loop {
            let answer = self.read_line(&prompt)?;
            match parse_corner_direction(&answer, options) {
                Some(direction) => return Some(direction),
                None => self.emit("INCORRECT INPUT: Please enter 1 or 2.\n"),
            }
        }
    }

    fn request_open_position(&mut self, grid: &Grid, _line: RolledLine) -> Option<Position> {
        self.read_position(
            "Please enter the location of the box you want to open: ",
            grid,
        )
    }

    fn request_tool_target(&mut self, grid: &Grid, tool: ToolKind) -> Option<ToolTarget> {
        match tool.target_kind() {
            TargetKind::Cell => self
                .read_position(
                    "Please enter the location of the box to use this SpecialTool: ",
                    grid,
                )
                .map(ToolTarget::Cell),
            TargetKind::Row => self
                .read_index(
                    "Please enter the row to use this SpecialTool on (1-8): ",
                    grid,
                    parse_row,
                )
                .map(ToolTarget::Row),
            TargetKind::Column => self
                .read_index(
                    "Please enter the column to use this SpecialTool on (1-8): ",
                    grid,
                    parse_column,
                )
                .map(ToolTarget::Column),
        }
    }
}
