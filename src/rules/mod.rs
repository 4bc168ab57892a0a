pub mod tools;

pub use tools::{
    apply_tool, fix_box, flip_box, stamp_column, stamp_plus, stamp_row, validate_target,
    ToolEffect, ToolPolicy, ToolTarget,
};
