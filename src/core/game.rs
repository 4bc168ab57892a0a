use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::components::letter::Letter;
use crate::core::presenter::Presenter;
use crate::core::turn::{Turn, TurnOutcome};
use crate::data::game_config::GameConfig;
use crate::error::GameError;
use crate::rules::tools::ToolPolicy;
use crate::simulation::generator::generate_target_letter;
use crate::simulation::grid::Grid;

/// Why the game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    AllTurnsPlayed,
    NoMovableEdge,
    InputClosed,
}

/// Final tally handed back once the game is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub target_letter: Letter,
    pub score: usize,
    pub turns_played: u32,
    pub end: GameEnd,
    pub outcomes: Vec<TurnOutcome>,
}

/// Owns the grid and everything else that lives for one game.
pub struct Game {
    grid: Grid,
    target_letter: Letter,
    config: GameConfig,
    seed: u64,
    turns_played: u32,
    outcomes: Vec<TurnOutcome>,
}

impl Game {
    /// Create a new random game. Uses the configured seed, or draws one.
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = Grid::generate(&mut rng, &config);
        let target_letter = generate_target_letter(&mut rng);
        info!("new game: seed={} target={}", seed, target_letter);
        Self::from_parts(grid, target_letter, config, seed)
    }

    /// Start from a prepared grid, e.g. a hand-built scenario.
    pub fn with_grid(grid: Grid, target_letter: Letter, config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_default();
        Self::from_parts(grid, target_letter, config, seed)
    }

    fn from_parts(grid: Grid, target_letter: Letter, config: GameConfig, seed: u64) -> Self {
        Self {
            grid,
            target_letter,
            config,
            seed,
            turns_played: 0,
            outcomes: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn target_letter(&self) -> Letter {
        self.target_letter
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    pub fn score(&self) -> usize {
        self.grid.count_matching(self.target_letter)
    }

    pub fn is_over(&self) -> bool {
        self.turns_played >= self.config.turns || !self.grid.has_movable_edge()
    }

    fn policy(&self) -> ToolPolicy {
        ToolPolicy {
            unchanging_flip: self.config.unchanging_flip,
        }
    }

    /// Play the next turn. The turn counter advances whatever the outcome.
    pub fn play_turn<P: Presenter>(&mut self, presenter: &mut P) -> TurnOutcome {
        self.turns_played += 1;
        let number = self.turns_played;
        info!("turn {} of {}", number, self.config.turns);
        presenter.render_turn_header(number);

        let policy = self.policy();
        let outcome = Turn::new(number, &mut self.grid, self.target_letter, policy, presenter).run();
        if let TurnOutcome::Wasted(err) = &outcome {
            warn!("turn {} wasted: {}", number, err);
        }
        self.outcomes.push(outcome.clone());
        outcome
    }

    /// Play the whole game and report the final score.
    pub fn run<P: Presenter>(mut self, presenter: &mut P) -> GameSummary {
        presenter.render_welcome(self.target_letter);
        presenter.render_grid(&self.grid);

        let mut end = GameEnd::AllTurnsPlayed;
        while self.turns_played < self.config.turns {
            if !self.grid.has_movable_edge() {
                presenter.render_error(&GameError::NoMovableEdge);
                end = GameEnd::NoMovableEdge;
                break;
            }
            if self.play_turn(presenter) == TurnOutcome::InputClosed {
                end = GameEnd::InputClosed;
                break;
            }
        }

        let score = self.score();
        info!(
            "game over after {} turns ({:?}): {} x {}",
            self.turns_played, end, score, self.target_letter
        );
        presenter.render_game_end(&self.grid, self.target_letter, score);
        GameSummary {
            target_letter: self.target_letter,
            score,
            turns_played: self.turns_played,
            end,
            outcomes: self.outcomes,
        }
    }
}
