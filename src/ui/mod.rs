pub mod console;
pub mod input;
pub mod render;

pub use console::ConsolePresenter;
pub use input::{parse_column, parse_corner_direction, parse_position, parse_row};
pub use render::{describe_error, render_box_net, render_grid};
