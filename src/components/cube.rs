use serde::{Deserialize, Serialize};

use crate::components::letter::Letter;
use crate::components::tool::ToolKind;
use crate::components::world::Direction;
use crate::error::ImmovableCube;

pub const NUM_FACES: usize = 6;

/// Fixed labelling of the six faces. The discriminant is the index into
/// [`Cube::faces`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Top = 0,
    Bottom = 1,
    Front = 2,
    Back = 3,
    Left = 4,
    Right = 5,
}

impl Face {
    pub const ALL: [Face; NUM_FACES] = [
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Four faces visited by a roll, in tipping order: the letter on `cycle[i]`
/// moves to `cycle[i + 1]`. The remaining two faces stay where they are.
pub fn roll_cycle(direction: Direction) -> [Face; 4] {
    match direction {
        Direction::Right => [Face::Left, Face::Top, Face::Right, Face::Bottom],
        Direction::Left => [Face::Left, Face::Bottom, Face::Right, Face::Top],
        Direction::Up => [Face::Front, Face::Top, Face::Back, Face::Bottom],
        Direction::Down => [Face::Front, Face::Bottom, Face::Back, Face::Top],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxVariant {
    Regular,
    Unchanging,
    Fixed,
}

/// Per-variant behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub rotatable: bool,
    pub flippable: bool,
    pub stampable: bool,
    pub blocks_propagation: bool,
}

impl BoxVariant {
    pub const fn capabilities(self) -> Capabilities {
        match self {
            BoxVariant::Regular => Capabilities {
                rotatable: true,
                flippable: true,
                stampable: true,
                blocks_propagation: false,
            },
            BoxVariant::Unchanging => Capabilities {
                rotatable: true,
                flippable: true,
                stampable: false,
                blocks_propagation: false,
            },
            BoxVariant::Fixed => Capabilities {
                rotatable: false,
                flippable: false,
                stampable: false,
                blocks_propagation: true,
            },
        }
    }
}

/// Whether `Flip` rewrites the faces of an unchanging box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnchangingFlip {
    #[default]
    AffectsFaces,
    Ignored,
}

/// A six-sided box on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cube {
    faces: [Letter; NUM_FACES],
    variant: BoxVariant,
    tool: Option<ToolKind>,
    opened: bool,
}

impl Cube {
    /// Fixed boxes never hold a tool and start opened, whatever is passed in.
    pub fn new(variant: BoxVariant, faces: [Letter; NUM_FACES], tool: Option<ToolKind>) -> Self {
        let fixed = variant == BoxVariant::Fixed;
        Self {
            faces,
            variant,
            tool: if fixed { None } else { tool },
            opened: fixed,
        }
    }

    pub fn regular(faces: [Letter; NUM_FACES], tool: Option<ToolKind>) -> Self {
        Self::new(BoxVariant::Regular, faces, tool)
    }

    pub fn unchanging(faces: [Letter; NUM_FACES], tool: ToolKind) -> Self {
        Self::new(BoxVariant::Unchanging, faces, Some(tool))
    }

    pub fn fixed(faces: [Letter; NUM_FACES]) -> Self {
        Self::new(BoxVariant::Fixed, faces, None)
    }

    /// A fixed copy of this cube's current faces. Any tool inside is dropped.
    pub fn to_fixed(&self) -> Self {
        Self::fixed(self.faces)
    }

    pub fn faces(&self) -> &[Letter; NUM_FACES] {
        &self.faces
    }

    pub fn face(&self, face: Face) -> Letter {
        self.faces[face.index()]
    }

    pub fn top(&self) -> Letter {
        self.face(Face::Top)
    }

    pub fn variant(&self) -> BoxVariant {
        self.variant
    }

    pub fn capabilities(&self) -> Capabilities {
        self.variant.capabilities()
    }

    pub fn is_fixed(&self) -> bool {
        self.variant == BoxVariant::Fixed
    }

    pub fn tool(&self) -> Option<ToolKind> {
        self.tool
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    /// Tip the cube over one edge.
    pub fn roll(&mut self, direction: Direction) -> Result<(), ImmovableCube> {
        if !self.capabilities().rotatable {
            return Err(ImmovableCube);
        }
        let cycle = roll_cycle(direction);
        let before = self.faces;
        for (i, from) in cycle.iter().enumerate() {
            let to = cycle[(i + 1) % cycle.len()];
            self.faces[to.index()] = before[from.index()];
        }
        Ok(())
    }

    /// Swap top and bottom. Returns whether the faces actually changed hands.
    pub fn flip(&mut self, policy: UnchangingFlip) -> Result<bool, ImmovableCube> {
        if !self.capabilities().flippable {
            return Err(ImmovableCube);
        }
        if self.variant == BoxVariant::Unchanging && policy == UnchangingFlip::Ignored {
            return Ok(false);
        }
        self.faces.swap(Face::Top.index(), Face::Bottom.index());
        Ok(true)
    }

    /// Overwrite the top face on stampable cubes; a no-op on the others.
    pub fn stamp_top(&mut self, letter: Letter) -> bool {
        if !self.capabilities().stampable {
            return false;
        }
        self.faces[Face::Top.index()] = letter;
        true
    }

    /// Open the cube once. Yields the tool inside on the first opening only.
    pub fn open(&mut self) -> Option<ToolKind> {
        if self.opened {
            return None;
        }
        self.opened = true;
        self.tool.take()
    }
}
