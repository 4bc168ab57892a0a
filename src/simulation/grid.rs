use log::debug;
use rand::Rng;

use crate::components::cube::Cube;
use crate::components::letter::Letter;
use crate::components::world::{Direction, Position, GRID_SIZE};
use crate::data::game_config::GameConfig;
use crate::error::{GameError, SelectionError};
use crate::simulation::generator::generate_cube;

/// The straight line a roll travelled along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolledLine {
    Row(usize),
    Column(usize),
}

impl RolledLine {
    pub fn through(start: Position, direction: Direction) -> Self {
        if direction.is_horizontal() {
            RolledLine::Row(start.row)
        } else {
            RolledLine::Column(start.col)
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.in_bounds()
            && match *self {
                RolledLine::Row(row) => pos.row == row,
                RolledLine::Column(col) => pos.col == col,
            }
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let line = *self;
        (0..GRID_SIZE).map(move |i| match line {
            RolledLine::Row(row) => Position::new(row, i),
            RolledLine::Column(col) => Position::new(i, col),
        })
    }
}

/// Outcome of a completed domino roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollReport {
    pub start: Position,
    pub direction: Direction,
    pub line: RolledLine,
    /// A fixed box stopped the roll before the far boundary.
    pub blocked: bool,
    pub rolled: usize,
}

/// 8x8 board of cubes, addressed by 0-based [`Position`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Cube; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    pub fn from_cells(cells: [[Cube; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    /// Every cell a clone of `cube`.
    pub fn filled(cube: Cube) -> Self {
        Self {
            cells: std::array::from_fn(|_| std::array::from_fn(|_| cube.clone())),
        }
    }

    pub fn generate(rng: &mut impl Rng, config: &GameConfig) -> Self {
        let cells = std::array::from_fn(|_| std::array::from_fn(|_| generate_cube(&mut *rng, config)));
        Self { cells }
    }

    pub fn get(&self, pos: Position) -> &Cube {
        &self.cells[pos.row][pos.col]
    }

    pub fn get_mut(&mut self, pos: Position) -> &mut Cube {
        &mut self.cells[pos.row][pos.col]
    }

    /// Put `cube` at `pos`, handing back the cube that was there.
    pub fn replace(&mut self, pos: Position, cube: Cube) -> Cube {
        std::mem::replace(&mut self.cells[pos.row][pos.col], cube)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cube; GRID_SIZE]> {
        self.cells.iter()
    }

    pub fn positions() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Position::new(row, col)))
    }

    pub fn edge_positions() -> impl Iterator<Item = Position> {
        Self::positions().filter(Position::is_edge)
    }

    /// Inward direction for a non-corner edge cell.
    pub fn edge_direction(pos: Position) -> Option<Direction> {
        if !pos.is_edge() || pos.is_corner() {
            return None;
        }
        if pos.row == 0 {
            Some(Direction::Down)
        } else if pos.row == GRID_SIZE - 1 {
            Some(Direction::Up)
        } else if pos.col == 0 {
            Some(Direction::Right)
        } else {
            Some(Direction::Left)
        }
    }

    /// The two inward directions of a corner cell.
    pub fn corner_directions(pos: Position) -> Option<[Direction; 2]> {
        const LAST: usize = GRID_SIZE - 1;
        match (pos.row, pos.col) {
            (0, 0) => Some([Direction::Right, Direction::Down]),
            (0, LAST) => Some([Direction::Left, Direction::Down]),
            (LAST, 0) => Some([Direction::Right, Direction::Up]),
            (LAST, LAST) => Some([Direction::Left, Direction::Up]),
            _ => None,
        }
    }

    /// Check the caller's direction choice against the cell's legal ones.
    pub fn resolve_direction(
        start: Position,
        chosen: Option<Direction>,
    ) -> Result<Direction, SelectionError> {
        if !start.in_bounds() {
            return Err(SelectionError::OutOfBounds(start));
        }
        if let Some(options) = Self::corner_directions(start) {
            return match chosen {
                Some(direction) if options.contains(&direction) => Ok(direction),
                Some(direction) => Err(SelectionError::IllegalDirection {
                    pos: start,
                    direction,
                }),
                None => Err(SelectionError::MissingCornerDirection(start)),
            };
        }
        let derived = Self::edge_direction(start).ok_or(SelectionError::NotOnEdge(start))?;
        match chosen {
            Some(direction) if direction != derived => Err(SelectionError::IllegalDirection {
                pos: start,
                direction,
            }),
            _ => Ok(derived),
        }
    }

    /// Domino roll from an edge cell. Either fails before touching any cube,
    /// or rolls every cube from `start` up to the first fixed box or the far
    /// boundary.
    pub fn roll_from_edge(
        &mut self,
        start: Position,
        chosen: Option<Direction>,
    ) -> Result<RollReport, GameError> {
        let direction = Self::resolve_direction(start, chosen)?;
        if self.get(start).is_fixed() {
            return Err(GameError::ImmovableTarget(start));
        }

        let mut rolled = 0;
        let mut blocked = false;
        let mut cursor = Some(start);
        while let Some(pos) = cursor {
            let cube = self.get_mut(pos);
            let caps = cube.capabilities();
            if caps.blocks_propagation {
                debug!("roll {} from {} stopped at fixed box {}", direction.label(), start, pos);
                blocked = true;
                break;
            }
            if caps.rotatable {
                cube.roll(direction).map_err(|err| err.at(pos))?;
                rolled += 1;
            }
            cursor = pos.step(direction);
        }

        debug!(
            "rolled {} boxes {} from {} (blocked={})",
            rolled,
            direction.label(),
            start,
            blocked
        );
        Ok(RollReport {
            start,
            direction,
            line: RolledLine::through(start, direction),
            blocked,
            rolled,
        })
    }

    pub fn count_matching(&self, letter: Letter) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cube| cube.top() == letter)
            .count()
    }

    pub fn has_movable_edge(&self) -> bool {
        Self::edge_positions().any(|pos| !self.get(pos).is_fixed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::cube::{Face, NUM_FACES};
    use crate::components::tool::ToolKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::components::letter::Letter::*;

    const FACES: [Letter; NUM_FACES] = [A, B, C, D, E, F];

    fn regular_grid() -> Grid {
        Grid::filled(Cube::regular(FACES, None))
    }

    #[test]
    fn unblocked_row_rolls_all_eight() {
        let mut grid = regular_grid();
        let report = grid.roll_from_edge(Position::new(2, 0), None).unwrap();
        assert_eq!(report.direction, Direction::Right);
        assert_eq!(report.line, RolledLine::Row(2));
        assert!(!report.blocked);
        assert_eq!(report.rolled, GRID_SIZE);
        for col in 0..GRID_SIZE {
            assert_eq!(grid.get(Position::new(2, col)).top(), E);
        }
        assert_eq!(grid.get(Position::new(1, 0)).top(), A);
    }

    #[test]
    fn fixed_box_blocks_rest_of_line() {
        let mut grid = regular_grid();
        grid.replace(Position::new(4, 3), Cube::fixed(FACES));
        let report = grid.roll_from_edge(Position::new(4, 7), None).unwrap();
        assert_eq!(report.direction, Direction::Left);
        assert!(report.blocked);
        assert_eq!(report.rolled, 4);
        for col in 4..GRID_SIZE {
            // rolling left brings the right face on top
            assert_eq!(grid.get(Position::new(4, col)).top(), F);
        }
        for col in 0..=3 {
            assert_eq!(grid.get(Position::new(4, col)).faces(), &FACES);
        }
    }

    #[test]
    fn vertical_roll_only_touches_its_column() {
        let mut grid = regular_grid();
        grid.roll_from_edge(Position::new(7, 5), None).unwrap();
        for pos in Grid::positions() {
            let expected = if pos.col == 5 { C } else { A };
            assert_eq!(grid.get(pos).face(Face::Top), expected, "{}", pos);
        }
    }

    #[test]
    fn fixed_start_fails_without_mutation() {
        let mut grid = regular_grid();
        grid.replace(Position::new(0, 4), Cube::fixed(FACES));
        let before = grid.clone();
        let err = grid.roll_from_edge(Position::new(0, 4), None).unwrap_err();
        assert_eq!(err, GameError::ImmovableTarget(Position::new(0, 4)));
        assert_eq!(grid, before);
    }

    #[test]
    fn unchanging_boxes_roll_along() {
        let mut grid = regular_grid();
        grid.replace(Position::new(0, 1), Cube::unchanging(FACES, ToolKind::Fix));
        let report = grid.roll_from_edge(Position::new(0, 1), None).unwrap();
        assert_eq!(report.direction, Direction::Down);
        assert_eq!(report.rolled, GRID_SIZE);
        assert_eq!(grid.get(Position::new(0, 1)).top(), D);
    }

    #[test]
    fn corners_require_a_legal_direction() {
        let mut grid = regular_grid();
        let before = grid.clone();
        let corner = Position::new(0, 0);
        assert!(matches!(
            grid.roll_from_edge(corner, None),
            Err(GameError::InvalidSelection(_))
        ));
        assert!(matches!(
            grid.roll_from_edge(corner, Some(Direction::Up)),
            Err(GameError::InvalidSelection(_))
        ));
        assert_eq!(grid, before);

        let report = grid.roll_from_edge(corner, Some(Direction::Down)).unwrap();
        assert_eq!(report.line, RolledLine::Column(0));
    }

    #[test]
    fn corner_direction_table() {
        assert_eq!(
            Grid::corner_directions(Position::new(0, 7)),
            Some([Direction::Left, Direction::Down])
        );
        assert_eq!(
            Grid::corner_directions(Position::new(7, 0)),
            Some([Direction::Right, Direction::Up])
        );
        assert_eq!(
            Grid::corner_directions(Position::new(7, 7)),
            Some([Direction::Left, Direction::Up])
        );
        assert_eq!(Grid::corner_directions(Position::new(0, 3)), None);
        assert_eq!(Grid::edge_direction(Position::new(0, 0)), None);
        assert_eq!(Grid::edge_direction(Position::new(3, 0)), Some(Direction::Right));
        assert_eq!(Grid::edge_direction(Position::new(3, 3)), None);
    }

    #[test]
    fn non_edge_and_wrong_direction_are_rejected() {
        let mut grid = regular_grid();
        assert!(matches!(
            grid.roll_from_edge(Position::new(3, 3), None),
            Err(GameError::InvalidSelection(_))
        ));
        assert!(matches!(
            grid.roll_from_edge(Position::new(0, 3), Some(Direction::Up)),
            Err(GameError::InvalidSelection(_))
        ));
        assert!(grid.roll_from_edge(Position::new(0, 3), Some(Direction::Down)).is_ok());
    }

    #[test]
    fn movable_edge_detection() {
        let mut grid = regular_grid();
        assert!(grid.has_movable_edge());
        for pos in Grid::edge_positions() {
            grid.replace(pos, Cube::fixed(FACES));
        }
        assert!(!grid.has_movable_edge());
        assert_eq!(Grid::edge_positions().count(), 28);
    }

    #[test]
    fn count_matching_counts_tops() {
        let mut grid = regular_grid();
        assert_eq!(grid.count_matching(A), 64);
        grid.get_mut(Position::new(0, 0)).stamp_top(H);
        assert_eq!(grid.count_matching(A), 63);
        assert_eq!(grid.count_matching(H), 1);
    }

    #[test]
    fn generated_grid_fills_every_cell() {
        let mut rng = StdRng::seed_from_u64(99);
        let grid = Grid::generate(&mut rng, &GameConfig::default());
        assert_eq!(Grid::positions().count(), 64);
        assert!(grid.rows().flatten().all(|cube| !cube.is_fixed() || cube.is_opened()));
        let again = Grid::generate(&mut StdRng::seed_from_u64(99), &GameConfig::default());
        assert_eq!(grid, again);
    }

    #[test]
    fn rolled_line_membership() {
        let line = RolledLine::through(Position::new(0, 5), Direction::Down);
        assert_eq!(line, RolledLine::Column(5));
        assert!(line.contains(Position::new(6, 5)));
        assert!(!line.contains(Position::new(6, 4)));
        assert_eq!(line.positions().count(), GRID_SIZE);
    }
}
