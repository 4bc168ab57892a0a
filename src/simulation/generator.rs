//! Random generation of faces, variants, tools and the target letter.
//!
//! Every function draws from a caller-supplied [`Rng`], so a seeded
//! `StdRng` reproduces a whole grid.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::cube::{BoxVariant, Cube, NUM_FACES};
use crate::components::letter::Letter;
use crate::components::tool::ToolKind;
use crate::data::game_config::{GameConfig, VariantWeights};

/// Each letter may appear at most this many times on a fresh cube.
pub const MAX_LETTER_REPEATS: usize = 2;

/// Six letters taken from a shuffled pool holding every letter twice.
pub fn generate_faces(rng: &mut impl Rng) -> [Letter; NUM_FACES] {
    let mut pool: Vec<Letter> = Letter::ALL
        .iter()
        .flat_map(|letter| std::iter::repeat(*letter).take(MAX_LETTER_REPEATS))
        .collect();
    pool.shuffle(rng);
    let mut faces = [Letter::A; NUM_FACES];
    faces.copy_from_slice(&pool[..NUM_FACES]);
    faces
}

pub fn generate_variant(rng: &mut impl Rng, weights: &VariantWeights) -> BoxVariant {
    // unvalidated weights may overflow; saturate rather than wrap
    let total = weights.total().unwrap_or(u32::MAX).max(1);
    let roll = rng.random_range(0..total);
    if roll < weights.regular {
        BoxVariant::Regular
    } else if roll - weights.regular < weights.unchanging {
        BoxVariant::Unchanging
    } else {
        BoxVariant::Fixed
    }
}

pub fn generate_tool(rng: &mut impl Rng) -> ToolKind {
    ToolKind::ALL[rng.random_range(0..ToolKind::ALL.len())]
}

pub fn generate_target_letter(rng: &mut impl Rng) -> Letter {
    Letter::ALL[rng.random_range(0..Letter::ALL.len())]
}

/// True with probability `percent`/100.
pub fn check_chance(rng: &mut impl Rng, percent: u32) -> bool {
    rng.random_range(0..100) < percent
}

/// A new cube of the given variant with freshly drawn faces and tool.
pub fn generate_cube_of(rng: &mut impl Rng, variant: BoxVariant, config: &GameConfig) -> Cube {
    let faces = generate_faces(rng);
    let tool = match variant {
        BoxVariant::Regular => {
            check_chance(rng, config.regular_tool_chance).then(|| generate_tool(rng))
        }
        BoxVariant::Unchanging => {
            check_chance(rng, config.unchanging_tool_chance).then(|| generate_tool(rng))
        }
        BoxVariant::Fixed => None,
    };
    debug!("generated {:?} box faces={:?} tool={:?}", variant, faces, tool);
    Cube::new(variant, faces, tool)
}

pub fn generate_cube(rng: &mut impl Rng, config: &GameConfig) -> Cube {
    let variant = generate_variant(rng, &config.variant_weights);
    generate_cube_of(rng, variant, config)
}
