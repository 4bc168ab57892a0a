use crate::components::cube::{BoxVariant, Cube, Face};
use crate::components::letter::Letter;
use crate::components::tool::ToolKind;
use crate::components::world::{Direction, Position, GRID_SIZE};
use crate::core::presenter::Stage;
use crate::error::{GameError, SelectionError};
use crate::rules::tools::{ToolEffect, ToolTarget};
use crate::simulation::grid::{Grid, RollReport};

const HORIZONTAL_LINE: &str =
    " -----------------------------------------------------------------";

/// Player-facing label for a cell, 1-based: `R1-C5`.
pub fn cell_label(pos: Position) -> String {
    format!("R{}-C{}", pos.row + 1, pos.col + 1)
}

pub fn direction_text(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "upwards",
        Direction::Down => "downwards",
        Direction::Left => "left",
        Direction::Right => "right",
    }
}

fn variant_char(variant: BoxVariant) -> char {
    match variant {
        BoxVariant::Regular => 'R',
        BoxVariant::Unchanging => 'U',
        BoxVariant::Fixed => 'X',
    }
}

/// `T-L-S`: variant, top letter, and `M` for a mystery box or `O` once opened.
pub fn cell_summary(cube: &Cube) -> String {
    let status = if cube.is_opened() { 'O' } else { 'M' };
    format!(
        "{}-{}-{}",
        variant_char(cube.variant()),
        cube.top().as_char(),
        status
    )
}

pub fn render_grid(grid: &Grid) -> String {
    let mut output = String::new();
    output.push_str("    ");
    for col in 0..GRID_SIZE {
        output.push_str(&format!("   C{}   ", col + 1));
    }
    output.push('\n');
    output.push_str(HORIZONTAL_LINE);
    output.push('\n');

    for (row, cells) in grid.rows().enumerate() {
        output.push_str(&format!("R{} |", row + 1));
        for cube in cells {
            output.push_str(&format!(" {} |", cell_summary(cube)));
        }
        output.push('\n');
        output.push_str(HORIZONTAL_LINE);
        output.push('\n');
    }
    output
}

/// All six faces laid out as a cross: back above, then left, top and right,
/// then front and bottom below.
pub fn render_box_net(cube: &Cube) -> String {
    let f = |face: Face| cube.face(face).as_char();
    let mut output = String::new();
    output.push_str("    -----\n");
    output.push_str(&format!("    | {} |\n", f(Face::Back)));
    output.push_str("-------------\n");
    output.push_str(&format!(
        "| {} | {} | {} |\n",
        f(Face::Left),
        f(Face::Top),
        f(Face::Right)
    ));
    output.push_str("-------------\n");
    output.push_str(&format!("    | {} |\n", f(Face::Front)));
    output.push_str("    -----\n");
    output.push_str(&format!("    | {} |\n", f(Face::Bottom)));
    output.push_str("    -----\n");
    output
}

pub fn render_welcome(target_letter: Letter) -> String {
    format!(
        "Welcome to Box Top Side Matching Puzzle App. An 8x8 box grid is being generated.\n\
         Your goal is to maximize the letter \"{}\" on the top sides of the boxes.\n",
        target_letter
    )
}

pub fn render_turn_header(turn: u32) -> String {
    format!("------> TURN {}:\n", turn)
}

pub fn render_stage_header(turn: u32, stage: Stage) -> String {
    let label = match stage {
        Stage::First => "FIRST",
        Stage::Second => "SECOND",
    };
    format!("---> TURN {} - {} STAGE:\n", turn, label)
}

/// Roll direction as it reads after "rolled".
fn roll_direction_text(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "upwards",
        Direction::Down => "downwards",
        Direction::Left => "to the left",
        Direction::Right => "to the right",
    }
}

pub fn render_roll_result(report: &RollReport) -> String {
    let ending = if report.blocked {
        " until a FixedBox has been reached."
    } else {
        "."
    };
    format!(
        "The chosen box and any box on its path have been rolled {}{}\n\
         The new state of the box grid:\n",
        roll_direction_text(report.direction),
        ending
    )
}

pub fn render_opened(tool: Option<ToolKind>, pos: Position) -> String {
    match tool {
        Some(tool) => format!(
            "The box on location {} is opened. It contains a SpecialTool --> {}\n",
            cell_label(pos),
            tool
        ),
        None => "BOX IS EMPTY! Continuing to the next turn...\n".to_string(),
    }
}

pub fn render_tool_applied(effect: &ToolEffect) -> String {
    let line = match (effect.tool, effect.target) {
        (ToolKind::Flip, ToolTarget::Cell(pos)) if effect.changed == 0 => format!(
            "The chosen box on location {} cannot be flipped and stays as it is.",
            cell_label(pos)
        ),
        (ToolKind::Flip, ToolTarget::Cell(pos)) => format!(
            "The chosen box on location {} has been flipped upside down.",
            cell_label(pos)
        ),
        (ToolKind::Fix, ToolTarget::Cell(pos)) => format!(
            "The box on location {} has been fixed and cannot be moved.",
            cell_label(pos)
        ),
        (ToolKind::StampPlus, ToolTarget::Cell(pos)) => format!(
            "Top sides of the chosen box ({}) and its surrounding boxes have been stamped.",
            cell_label(pos)
        ),
        (_, ToolTarget::Row(row)) => format!(
            "Top sides of all boxes in row {} have been stamped.",
            row + 1
        ),
        (_, ToolTarget::Column(col)) => format!(
            "Top sides of all boxes in column {} have been stamped.",
            col + 1
        ),
        (tool, ToolTarget::Cell(pos)) => format!("{} applied at {}!", tool, cell_label(pos)),
    };
    format!("{}\nThe new state of the box grid:\n", line)
}

fn describe_selection(reason: &SelectionError) -> String {
    match reason {
        SelectionError::OutOfBounds(pos) => {
            format!("{} is outside the grid.", cell_label(*pos))
        }
        SelectionError::IndexOutOfBounds(index) => {
            format!("{} is outside the grid. Choose 1 to {}.", index + 1, GRID_SIZE)
        }
        SelectionError::NotOnEdge(_) => {
            "The chosen box is not on any of the edges.".to_string()
        }
        SelectionError::MissingCornerDirection(pos) => {
            format!("The corner box on location {} needs a direction.", cell_label(*pos))
        }
        SelectionError::IllegalDirection { pos, direction } => format!(
            "The box on location {} cannot be rolled {}.",
            cell_label(*pos),
            direction_text(*direction)
        ),
        SelectionError::NotInRolledLine(_) => {
            "The chosen box was not rolled during the first stage.".to_string()
        }
        SelectionError::TargetMismatch { tool, .. } => {
            format!("{} cannot be used on that target.", tool)
        }
    }
}

/// Turn an error into the line shown to the player, with 1-based locations.
pub fn describe_error(error: &GameError) -> String {
    match error {
        GameError::ImmovableTarget(pos) => format!(
            "The box on location {} IS A FIXED BOX AND CANNOT BE MOVED. Continuing to the next turn...",
            cell_label(*pos)
        ),
        GameError::AlreadyFixed(pos) => format!(
            "The box on location {} is already a FixedBox. The tool has been used up.",
            cell_label(*pos)
        ),
        GameError::InvalidSelection(reason) => {
            format!("INCORRECT INPUT: {}", describe_selection(reason))
        }
        GameError::NoMovableEdge => {
            "Every edge box is a FixedBox. No more rolls are possible.".to_string()
        }
    }
}

pub fn render_game_end(grid: &Grid, target_letter: Letter, match_count: usize) -> String {
    format!(
        "\n******** GAME OVER ********\n\n\
         The final state of the box grid:\n{}\
         The total number of \"{}\" letters on top sides: {}.\n",
        render_grid(grid),
        target_letter,
        match_count
    )
}
