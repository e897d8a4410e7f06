//! Error kinds raised by the engine.
//!
//! Every [`TurnError`] is local and recoverable: the action that raised it is
//! rejected and the snapshot it was given is left untouched.

use thiserror::Error;

/// Rejections produced by turn actions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TurnError {
    #[error("it is not {player}'s turn")]
    NotYourTurn { player: String },
    #[error("no player with id {player}")]
    UnknownPlayer { player: String },
    #[error("dice were already rolled this turn")]
    AlreadyRolled,
    #[error("roll the dice before passing the turn")]
    MustRollFirst,
    #[error("a card or donation decision is still pending")]
    DecisionPending,
    #[error("insufficient funds: need ${required}, have ${available}")]
    InsufficientFunds { required: i64, available: i64 },
    #[error("maximum number of children reached")]
    MaxChildrenReached,
    #[error("no pending decision matches this action")]
    InvalidDecision,
    #[error("the game has ended")]
    GameOver,
    #[error("a game needs at least one player")]
    NoPlayers,
    #[error("at most {max} players can join a game")]
    TooManyPlayers { max: usize },
    #[error("color {color} is already taken")]
    DuplicateColor { color: String },
    #[error("player id {player} is already taken")]
    DuplicatePlayer { player: String },
}

/// Errors raised when rule configuration or static data violates invariants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board has no spaces")]
    EmptyBoard,
    #[error("board space {index} reports position {position}")]
    NonContiguousBoard { index: usize, position: usize },
    #[error("board must contain exactly one exit space (found {found})")]
    ExitCount { found: usize },
    #[error("{catalog} catalog is empty")]
    EmptyCatalog { catalog: &'static str },
    #[error("failed to parse {what}: {message}")]
    Parse { what: &'static str, message: String },
}

impl ConfigError {
    pub(crate) fn parse(what: &'static str, err: &serde_json::Error) -> Self {
        Self::Parse {
            what,
            message: err.to_string(),
        }
    }
}
