use std::fmt;

use serde::{Deserialize, Serialize};

/// Single-use tools hidden inside cubes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Fix,
    Flip,
    StampRow,
    StampColumn,
    StampPlus,
}

/// What kind of address a tool needs once it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Cell,
    Row,
    Column,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Fix,
        ToolKind::Flip,
        ToolKind::StampRow,
        ToolKind::StampColumn,
        ToolKind::StampPlus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Fix => "BoxFixer",
            ToolKind::Flip => "BoxFlipper",
            ToolKind::StampRow => "MassRowStamp",
            ToolKind::StampColumn => "MassColumnStamp",
            ToolKind::StampPlus => "PlusShapeStamp",
        }
    }

    pub fn target_kind(self) -> TargetKind {
        match self {
            ToolKind::StampRow => TargetKind::Row,
            ToolKind::StampColumn => TargetKind::Column,
            ToolKind::Fix | ToolKind::Flip | ToolKind::StampPlus => TargetKind::Cell,
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
