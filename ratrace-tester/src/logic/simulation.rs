use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use serde::Serialize;

use ratrace_game::{
    CustomMode, EndgameRuleKind, GameConfig, GameSession, GameSnapshot, GameStorage,
    PendingDecision, Player, SessionError, TurnEngine, TurnError, TurnEvent, TurnPhase,
    TurnReport,
};

use crate::logic::policy::{GameplayStrategy, PlayerPolicy};

const PLAYER_COLORS: [&str; 6] = [
    "#ef4444", "#3b82f6", "#22c55e", "#eab308", "#a855f7", "#f97316",
];

/// Configuration for a simulation session.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub seed: u64,
    pub players: usize,
    pub strategy: GameplayStrategy,
    pub custom_mode: bool,
    pub max_turns: u32,
    pub verbose: bool,
}

impl SimulationConfig {
    #[must_use]
    pub fn new(strategy: GameplayStrategy, seed: u64) -> Self {
        Self {
            seed,
            players: 2,
            strategy,
            custom_mode: false,
            max_turns: 500,
            verbose: false,
        }
    }

    #[must_use]
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    #[must_use]
    pub fn with_custom_mode(mut self, custom_mode: bool) -> Self {
        self.custom_mode = custom_mode;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn game_config(&self) -> GameConfig {
        GameConfig::with_seed(self.seed)
            .with_custom_mode(CustomMode::from_flag(self.custom_mode))
            .with_endgame(EndgameRuleKind::FastTrackVictory)
    }

    fn roster(&self) -> Vec<Player> {
        (0..self.players)
            .map(|i| {
                Player::new(
                    format!("bot-{}", i + 1),
                    format!("Bot {}", i + 1),
                    PLAYER_COLORS[i % PLAYER_COLORS.len()],
                )
            })
            .collect()
    }
}

/// End-of-run figures for one player.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub profession: Option<String>,
    pub cash: i64,
    pub passive_income: i64,
    pub total_expenses: i64,
    pub net_worth: i64,
    pub children: u8,
    pub on_fast_track: bool,
}

impl From<&Player> for PlayerSummary {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            profession: player.profession.clone(),
            cash: player.cash,
            passive_income: player.rat_race.passive_income,
            total_expenses: player.rat_race.total_expenses,
            net_worth: player.net_worth,
            children: player.rat_race.children,
            on_fast_track: player.on_fast_track,
        }
    }
}

/// Outcome of one seeded game.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub seed: u64,
    pub strategy: String,
    pub custom_mode: bool,
    pub turns: u32,
    pub finished: bool,
    pub winner: Option<String>,
    pub purchases: u32,
    pub donations: u32,
    pub skipped_turns: u32,
    pub blocked_charges: u32,
    pub players: Vec<PlayerSummary>,
}

/// Drives a [`GameSession`] with a policy until someone escapes or the
/// turn budget runs out.
pub struct SimulationSession<S: GameStorage> {
    session: GameSession<S>,
    policy: Box<dyn PlayerPolicy>,
    config: SimulationConfig,
    turns: u32,
    purchases: u32,
    donations: u32,
    skipped_turns: u32,
    blocked_charges: u32,
}

impl<S: GameStorage> SimulationSession<S> {
    /// Start a fresh game in the `seed-<n>` slot of `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the game cannot be created or first saved.
    pub fn new(config: SimulationConfig, storage: S) -> Result<Self> {
        let engine = TurnEngine::new(config.game_config());
        let session = GameSession::start(
            engine,
            storage,
            format!("seed-{}", config.seed),
            config.roster(),
        )
        .with_context(|| format!("failed to start game for seed {}", config.seed))?;
        Ok(Self {
            session,
            policy: config.strategy.create_policy(),
            config,
            turns: 0,
            purchases: 0,
            donations: 0,
            skipped_turns: 0,
            blocked_charges: 0,
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> &GameSnapshot {
        self.session.snapshot()
    }

    /// Play until the game ends or `max_turns` player-turns have elapsed.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects an action the policy chose.
    pub fn run(mut self) -> Result<SimulationResult> {
        while self.turns < self.config.max_turns && !self.snapshot().is_over() {
            self.play_turn()?;
        }
        Ok(self.finish())
    }

    /// Play one player-turn: roll, answer any decision, pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects an action.
    pub fn play_turn(&mut self) -> Result<()> {
        let active = self
            .session
            .active_player()
            .cloned()
            .ok_or_else(|| anyhow!("game has no players"))?;
        self.turns += 1;

        let skipping = matches!(active.turn, TurnPhase::Skipping { .. });
        let report = self.session.roll(&active.id)?;
        self.observe(&report);
        if skipping {
            self.skipped_turns += 1;
            return Ok(());
        }
        if self.snapshot().is_over() {
            return Ok(());
        }

        match self.snapshot().pending.clone() {
            Some(PendingDecision::Opportunity { card }) => {
                let player = self.current(&active)?;
                let buy = self.policy.buy_opportunity(&player, &card);
                let report = match self.session.decide_opportunity(&active.id, buy) {
                    Err(SessionError::Turn(TurnError::InsufficientFunds { .. })) => {
                        self.session.decide_opportunity(&active.id, false)?
                    }
                    other => other?,
                };
                self.observe(&report);
            }
            Some(PendingDecision::Charity { amount }) => {
                let player = self.current(&active)?;
                let donate = self.policy.donate(&player, amount);
                let report = self.session.confirm_charity(&active.id, donate)?;
                self.observe(&report);
            }
            None => {}
        }

        let report = self.session.pass(&active.id)?;
        self.observe(&report);
        Ok(())
    }

    fn current(&self, active: &Player) -> Result<Player> {
        self.snapshot()
            .player(&active.id)
            .cloned()
            .ok_or_else(|| anyhow!("player {} vanished", active.id))
    }

    fn observe(&mut self, report: &TurnReport) {
        for event in &report.events {
            match event {
                TurnEvent::AssetPurchased { .. } => self.purchases += 1,
                TurnEvent::CharityDonated { .. } => self.donations += 1,
                _ => {}
            }
            if self.config.verbose {
                eprintln!("   {} {}", format!("[{:>4}]", self.turns).dimmed(), event);
            }
        }
        if let Some(condition) = &report.condition {
            self.blocked_charges += 1;
            log::debug!("seed {}: {condition}", self.config.seed);
        }
    }

    fn finish(self) -> SimulationResult {
        let snapshot = self.session.snapshot();
        let winner = snapshot
            .winner
            .as_ref()
            .and_then(|id| snapshot.player(id))
            .map(|p| p.name.clone());
        SimulationResult {
            seed: self.config.seed,
            strategy: self.config.strategy.label().to_string(),
            custom_mode: self.config.custom_mode,
            turns: self.turns,
            finished: snapshot.is_over(),
            winner,
            purchases: self.purchases,
            donations: self.donations,
            skipped_turns: self.skipped_turns,
            blocked_charges: self.blocked_charges,
            players: snapshot.players.iter().map(PlayerSummary::from).collect(),
        }
    }
}

/// Run one seeded game against `storage`.
///
/// # Errors
///
/// Propagates engine and storage failures.
pub fn run_simulation<S: GameStorage>(config: SimulationConfig, storage: S) -> Result<SimulationResult> {
    SimulationSession::new(config, storage)?.run()
}
