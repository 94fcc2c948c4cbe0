pub mod action;
pub mod ai;
pub mod deck;
pub mod decision;
pub mod engine;
pub mod error;
pub mod player;

pub use action::{ActionSpec, ActionType};
pub use ai::{HeuristicDecider, RandomDecider};
pub use deck::Deck;
pub use decision::{DecisionMaker, PublicPlayer, ScriptedDecider};
pub use engine::{Game, GameEvent};
pub use error::GameError;
pub use player::{Influence, Player, Role};
