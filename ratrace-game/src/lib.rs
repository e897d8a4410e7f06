//! Rat Race Game Engine
//!
//! Platform-agnostic rules for a turn-based personal-finance board game.
//! Players circle the Rat Race board collecting paydays, buying deals and
//! paying for doodads until their passive income covers their expenses.
//! This crate has no UI or storage backend of its own.

pub mod board;
pub mod cards;
pub mod config;
pub mod constants;
pub mod deck;
pub mod endgame;
pub mod error;
pub mod events;
pub mod finance;
pub mod numbers;
pub mod player;
pub mod professions;
pub mod state;
pub mod turn;

use thiserror::Error;

// Re-export commonly used types
pub use board::{Board, BoardSpace, Circle, SpaceKind};
pub use cards::{
    CardCatalog, DealSize, DoodadCard, DrawnCard, MarketAssetType, MarketCard, OpportunityCard,
};
pub use config::{CustomMode, EndgameRuleKind, GameConfig};
pub use deck::{Deck, Decks};
pub use endgame::{EndgameRule, FastTrackVictory, NoEndgame};
pub use error::{ConfigError, TurnError};
pub use events::{TurnEvent, TurnLog};
pub use finance::{
    can_exit_rat_race, cash_flow, net_worth, passive_income, recalculate, recalculated,
};
pub use player::{
    Assets, BankLoan, BusinessAsset, DiceRoll, FastTrackFinancials, Liabilities, Player, PlayerId,
    PlayerStatus, RatRaceFinancials, RealEstateAsset, StockAsset, TurnPhase,
};
pub use professions::{Profession, ProfessionList, assign_professions};
pub use state::{GamePhase, GameSnapshot, PendingDecision};
pub use turn::{ActionOutcome, DiceRoller, LoadedDice, SeededDice, TurnEngine};

/// Trait for abstracting save/load operations.
/// Platform-specific implementations should provide this.
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a game snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    fn save_game(&self, save_name: &str, snapshot: &GameSnapshot) -> Result<(), Self::Error>;

    /// Load a game snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read or parsed.
    fn load_game(&self, save_name: &str) -> Result<Option<GameSnapshot>, Self::Error>;

    /// Delete a saved game
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error>;
}

/// Failure of a session action.
#[derive(Debug, Error)]
pub enum SessionError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Turn(#[from] TurnError),
    /// The action was applied but the new snapshot could not be saved.
    #[error("failed to save game: {0}")]
    Storage(#[source] E),
}

/// What an accepted session action produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnReport {
    pub events: Vec<TurnEvent>,
    pub condition: Option<TurnError>,
}

/// Load a snapshot, treating any storage or parse failure as "no save".
///
/// A save with an empty roster also counts as no save.
pub fn load_snapshot<S: GameStorage>(storage: &S, save_name: &str) -> Option<GameSnapshot> {
    match storage.load_game(save_name) {
        Ok(Some(snapshot)) if snapshot.players.is_empty() => {
            log::debug!("ignoring save {save_name:?} with no players");
            None
        }
        Ok(snapshot) => snapshot,
        Err(err) => {
            log::warn!("ignoring unreadable save {save_name:?}: {err}");
            None
        }
    }
}

/// A running game bound to a storage slot.
///
/// Every accepted action replaces the snapshot, feeds the turn log and
/// saves. Rejected actions change nothing.
pub struct GameSession<S, D = SeededDice>
where
    S: GameStorage,
    D: DiceRoller,
{
    engine: TurnEngine<D>,
    storage: S,
    save_name: String,
    snapshot: GameSnapshot,
    log: TurnLog,
}

impl<S, D> GameSession<S, D>
where
    S: GameStorage,
    D: DiceRoller,
{
    /// Start a fresh game and save it.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster is invalid or the first save fails.
    pub fn start(
        mut engine: TurnEngine<D>,
        storage: S,
        save_name: impl Into<String>,
        players: Vec<Player>,
    ) -> Result<Self, SessionError<S::Error>> {
        let snapshot = engine.new_game(players)?;
        let session = Self {
            engine,
            storage,
            save_name: save_name.into(),
            snapshot,
            log: TurnLog::new(),
        };
        session.save()?;
        Ok(session)
    }

    /// Resume the game saved under `save_name`, if it can be read.
    #[must_use]
    pub fn load(mut engine: TurnEngine<D>, storage: S, save_name: impl Into<String>) -> Option<Self> {
        let save_name = save_name.into();
        let saved = load_snapshot(&storage, &save_name)?;
        let snapshot = engine.resume(saved);
        Some(Self {
            engine,
            storage,
            save_name,
            snapshot,
            log: TurnLog::new(),
        })
    }

    /// Resume a save when one exists, otherwise start with `players`.
    ///
    /// # Errors
    ///
    /// Returns an error if a new game must be started and that fails.
    pub fn resume_or_start(
        mut engine: TurnEngine<D>,
        storage: S,
        save_name: impl Into<String>,
        players: Vec<Player>,
    ) -> Result<Self, SessionError<S::Error>> {
        let save_name = save_name.into();
        if let Some(saved) = load_snapshot(&storage, &save_name) {
            let snapshot = engine.resume(saved);
            return Ok(Self {
                engine,
                storage,
                save_name,
                snapshot,
                log: TurnLog::new(),
            });
        }
        Self::start(engine, storage, save_name, players)
    }

    #[must_use]
    pub const fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub const fn log(&self) -> &TurnLog {
        &self.log
    }

    #[must_use]
    pub const fn engine(&self) -> &TurnEngine<D> {
        &self.engine
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&DrawnCard> {
        self.snapshot.current_card()
    }

    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.snapshot.active_player()
    }

    /// Roll for `player`.
    ///
    /// # Errors
    ///
    /// Returns the turn rejection, or a storage error after applying.
    pub fn roll(&mut self, player: &PlayerId) -> Result<TurnReport, SessionError<S::Error>> {
        let outcome = self.engine.roll(&self.snapshot, player)?;
        self.apply(outcome)
    }

    /// End `player`'s turn.
    ///
    /// # Errors
    ///
    /// Returns the turn rejection, or a storage error after applying.
    pub fn pass(&mut self, player: &PlayerId) -> Result<TurnReport, SessionError<S::Error>> {
        let outcome = self.engine.pass(&self.snapshot, player)?;
        self.apply(outcome)
    }

    /// Buy or decline the pending opportunity.
    ///
    /// # Errors
    ///
    /// Returns the turn rejection, or a storage error after applying.
    pub fn decide_opportunity(
        &mut self,
        player: &PlayerId,
        buy: bool,
    ) -> Result<TurnReport, SessionError<S::Error>> {
        let outcome = self.engine.decide_opportunity(&self.snapshot, player, buy)?;
        self.apply(outcome)
    }

    /// Accept or decline the pending charity donation.
    ///
    /// # Errors
    ///
    /// Returns the turn rejection, or a storage error after applying.
    pub fn confirm_charity(
        &mut self,
        player: &PlayerId,
        confirmed: bool,
    ) -> Result<TurnReport, SessionError<S::Error>> {
        let outcome = self
            .engine
            .confirm_charity(&self.snapshot, player, confirmed)?;
        self.apply(outcome)
    }

    /// Remove this session's save slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to delete.
    pub fn delete_save(&self) -> Result<(), S::Error> {
        self.storage.delete_save(&self.save_name)
    }

    #[must_use]
    pub fn into_snapshot(self) -> GameSnapshot {
        self.snapshot
    }

    fn apply(&mut self, outcome: ActionOutcome) -> Result<TurnReport, SessionError<S::Error>> {
        self.log.record(&outcome.events);
        self.snapshot = outcome.snapshot;
        self.save()?;
        Ok(TurnReport {
            events: outcome.events,
            condition: outcome.condition,
        })
    }

    fn save(&self) -> Result<(), SessionError<S::Error>> {
        self.storage
            .save_game(&self.save_name, &self.snapshot)
            .map_err(SessionError::Storage)
    }
}
