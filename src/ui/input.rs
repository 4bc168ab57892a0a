use crate::components::world::{Direction, Position};

/// `VIEW` asks for a box net instead of answering the prompt.
pub fn is_view_command(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("view")
}

/// 1-based number, optionally prefixed by `prefix` (case-insensitive).
/// Returns the 0-based index. Values past the grid are passed through so the
/// rules can report them.
fn parse_axis(raw: &str, prefix: char) -> Option<usize> {
    let raw = raw.trim();
    let digits = match raw.chars().next() {
        Some(first) if first.eq_ignore_ascii_case(&prefix) => &raw[first.len_utf8()..],
        _ => raw,
    };
    let value: usize = digits.trim().parse().ok()?;
    value.checked_sub(1)
}

/// Parse `R#-C#` or `#-#`, 1-based, into a 0-based position.
pub fn parse_position(raw: &str) -> Option<Position> {
    let (row, col) = raw.trim().split_once('-')?;
    Some(Position::new(parse_axis(row, 'r')?, parse_axis(col, 'c')?))
}

pub fn parse_row(raw: &str) -> Option<usize> {
    parse_axis(raw, 'r')
}

pub fn parse_column(raw: &str) -> Option<usize> {
    parse_axis(raw, 'c')
}

fn parse_direction_name(raw: &str) -> Option<Direction> {
    match raw.to_lowercase().as_str() {
        "up" | "upwards" => Some(Direction::Up),
        "down" | "downwards" => Some(Direction::Down),
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        _ => None,
    }
}

/// `1`/`2` pick from the offered pair; a direction name is taken as is.
pub fn parse_corner_direction(raw: &str, options: [Direction; 2]) -> Option<Direction> {
    match raw.trim() {
        "1" => Some(options[0]),
        "2" => Some(options[1]),
        other => parse_direction_name(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_accept_both_formats() {
        assert_eq!(parse_position("R1-C5"), Some(Position::new(0, 4)));
        assert_eq!(parse_position(" r8-c8 "), Some(Position::new(7, 7)));
        assert_eq!(parse_position("3-2"), Some(Position::new(2, 1)));
        assert_eq!(parse_position("R3-2"), Some(Position::new(2, 1)));
    }

    #[test]
    fn malformed_positions_are_rejected() {
        for raw in ["", "R1", "R0-C1", "A-B", "1-", "-1", "C1-R1", "1-2-3"] {
            assert_eq!(parse_position(raw), None, "{raw}");
        }
    }

    #[test]
    fn out_of_grid_values_pass_through() {
        assert_eq!(parse_position("9-1"), Some(Position::new(8, 0)));
        assert_eq!(parse_row("12"), Some(11));
    }

    #[test]
    fn rows_and_columns() {
        assert_eq!(parse_row("4"), Some(3));
        assert_eq!(parse_row("r4"), Some(3));
        assert_eq!(parse_column("C8"), Some(7));
        assert_eq!(parse_column("0"), None);
        assert_eq!(parse_column("x"), None);
    }

    #[test]
    fn corner_directions_by_number_or_name() {
        let options = [Direction::Right, Direction::Down];
        assert_eq!(parse_corner_direction("1", options), Some(Direction::Right));
        assert_eq!(parse_corner_direction(" 2", options), Some(Direction::Down));
        assert_eq!(parse_corner_direction("Downwards", options), Some(Direction::Down));
        assert_eq!(parse_corner_direction("up", options), Some(Direction::Up));
        assert_eq!(parse_corner_direction("3", options), None);
    }

    #[test]
    fn view_command() {
        assert!(is_view_command(" View\n"));
        assert!(!is_view_command("viewer"));
    }
}
