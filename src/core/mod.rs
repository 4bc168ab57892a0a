pub mod game;
pub mod presenter;
pub mod scripted;
pub mod turn;

pub use game::{Game, GameEnd, GameSummary};
pub use presenter::{Presenter, Stage};
pub use scripted::{PresenterEvent, ScriptedPresenter};
pub use turn::{Transition, Turn, TurnOutcome, TurnStage};
