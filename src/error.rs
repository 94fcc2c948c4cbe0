use thiserror::Error;

use crate::action::ActionType;

/// Contract violations between the engine, its decision makers and the deck.
/// None of these are legitimate game states; callers should stop the game
/// loop when one surfaces.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("deck has {remaining} cards, cannot draw {requested}")]
    InsufficientCards { requested: usize, remaining: usize },

    #[error("player {player} has {coins} coins but {action:?} costs {cost}")]
    InsufficientFunds {
        player: usize,
        coins: u8,
        cost: u8,
        action: ActionType,
    },

    #[error("invalid target for {action:?}: {reason}")]
    InvalidTarget { action: ActionType, reason: String },

    #[error("invalid card selection: {0}")]
    InvalidSelection(String),

    #[error("player {0} has no hidden influence left")]
    NoHiddenInfluence(usize),

    #[error("player {player} chose {action:?}, which is not in their legal action set")]
    UnknownAction { player: usize, action: ActionType },

    #[error("player count must be between 3 and 10, got {0}")]
    InvalidPlayerCount(usize),
}
