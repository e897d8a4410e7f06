//! Turn state machine: dice, movement, space effects, decisions, and turn
//! advancement for the single active player.
//!
//! Every action borrows the current [`GameSnapshot`] and, on success, returns
//! a new one inside an [`ActionOutcome`]. A rejected action returns a
//! [`TurnError`] and the caller's snapshot is untouched.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::board::{Board, SpaceKind};
use crate::cards::{CardCatalog, DrawnCard};
use crate::config::GameConfig;
use crate::constants::{
    CHARITY_DICE, CHARITY_RATE_PCT, DIE_FACES, DOWNSIZE_SKIPS, FAST_TRACK_BUYOUT_MULTIPLIER,
    FAST_TRACK_DICE, FAST_TRACK_INCOME_GOAL_BONUS, MAX_CHILDREN, RAT_RACE_DICE,
};
use crate::deck::Decks;
use crate::endgame::{EndgameRule, rule_for};
use crate::error::TurnError;
use crate::events::TurnEvent;
use crate::finance;
use crate::numbers::floor_pct;
use crate::player::{DiceRoll, Player, PlayerId, PlayerStatus, RealEstateAsset, TurnPhase};
use crate::professions::{ProfessionList, assign_professions};
use crate::state::{GamePhase, GameSnapshot, PendingDecision, validate_roster};

const DICE_STREAM: u64 = 1;

/// Source of die faces.
pub trait DiceRoller {
    /// One face in `1..=6`.
    fn roll_die(&mut self) -> u8;

    fn roll(&mut self, count: usize) -> DiceRoll {
        (0..count).map(|_| self.roll_die()).collect()
    }
}

/// Uniform dice from a seeded ChaCha stream.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha20Rng,
}

impl SeededDice {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        rng.set_stream(DICE_STREAM);
        Self { rng }
    }
}

impl DiceRoller for SeededDice {
    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }
}

/// Replays a fixed face sequence, cycling when it runs out.
#[derive(Debug, Clone, Default)]
pub struct LoadedDice {
    faces: Vec<u8>,
    cursor: usize,
}

impl LoadedDice {
    #[must_use]
    pub fn new(faces: impl Into<Vec<u8>>) -> Self {
        Self {
            faces: faces.into(),
            cursor: 0,
        }
    }
}

impl DiceRoller for LoadedDice {
    fn roll_die(&mut self) -> u8 {
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.cursor % self.faces.len()];
        self.cursor = self.cursor.wrapping_add(1);
        face.clamp(1, DIE_FACES)
    }
}

/// Result of an accepted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub snapshot: GameSnapshot,
    pub events: Vec<TurnEvent>,
    /// A rule that blocked part of the resolution without rejecting the
    /// action, such as an unaffordable doodad.
    pub condition: Option<TurnError>,
}

/// Rules engine for one game.
pub struct TurnEngine<D = SeededDice> {
    board: Board,
    catalog: CardCatalog,
    professions: ProfessionList,
    config: GameConfig,
    rng: ChaCha20Rng,
    dice: D,
    endgame: Box<dyn EndgameRule>,
}

impl TurnEngine<SeededDice> {
    /// Standard board, cards and professions, seeded from `config`.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let dice = SeededDice::new(config.seed);
        Self::with_dice(config, dice)
    }
}

impl<D: DiceRoller> TurnEngine<D> {
    #[must_use]
    pub fn with_dice(config: GameConfig, dice: D) -> Self {
        Self {
            board: Board::rat_race(),
            catalog: CardCatalog::load_from_static(),
            professions: ProfessionList::load_from_static(),
            rng: ChaCha20Rng::seed_from_u64(config.seed),
            endgame: rule_for(config.endgame),
            config,
            dice,
        }
    }

    #[must_use]
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: CardCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn with_professions(mut self, professions: ProfessionList) -> Self {
        self.professions = professions;
        self
    }

    #[must_use]
    pub fn with_endgame(mut self, rule: Box<dyn EndgameRule>) -> Self {
        self.endgame = rule;
        self
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seat players, assign professions and shuffle fresh decks.
    ///
    /// # Errors
    ///
    /// Rejects an empty or oversized roster and duplicate ids or colors.
    pub fn new_game(&mut self, players: Vec<Player>) -> Result<GameSnapshot, TurnError> {
        validate_roster(&players)?;
        let seated = assign_professions(
            &players,
            &self.professions,
            self.config.custom_mode,
            &mut self.rng,
        );
        let mut snapshot = GameSnapshot::new(seated);
        snapshot.profession_deck = self.professions.clone();
        snapshot.decks = Decks::from_catalog(&self.catalog, &mut self.rng);
        snapshot.refresh_phase();
        log::debug!(
            "new game with {} players (custom mode: {})",
            snapshot.players.len(),
            self.config.custom_mode.is_enabled()
        );
        Ok(snapshot)
    }

    /// Normalize a loaded snapshot so play can continue.
    ///
    /// Players without a profession are assigned one, every player's dice
    /// are cleared, and any half-finished card or donation is dropped.
    #[must_use]
    pub fn resume(&mut self, snapshot: GameSnapshot) -> GameSnapshot {
        let mut next = snapshot;
        next.clamp_turn_index();
        if next.profession_deck.is_empty() {
            next.profession_deck = self.professions.clone();
        }
        if next.players.iter().any(|p| p.profession.is_none()) {
            log::debug!("re-running profession assignment for unassigned players");
            next.players = assign_professions(
                &next.players,
                &next.profession_deck,
                self.config.custom_mode,
                &mut self.rng,
            );
        }
        if next.decks.opportunity.catalog().is_empty() {
            next.decks = Decks::from_catalog(&self.catalog, &mut self.rng);
        }
        next.clear_all_dice();
        next.current_card = None;
        next.pending = None;
        for player in &mut next.players {
            finance::recalculate(player);
        }
        if next.game_phase == GamePhase::Setup {
            next.refresh_phase();
        }
        next
    }

    /// Roll for the active player, move, and resolve the landing space.
    ///
    /// A player sitting out a Downsize consumes one skip instead and the
    /// turn passes immediately.
    ///
    /// # Errors
    ///
    /// `GameOver`, `UnknownPlayer`, `NotYourTurn`, `AlreadyRolled` or
    /// `DecisionPending`.
    pub fn roll(
        &mut self,
        snapshot: &GameSnapshot,
        player: &PlayerId,
    ) -> Result<ActionOutcome, TurnError> {
        let (mut next, index) = Self::begin(snapshot, player)?;
        if next.players[index].has_rolled() {
            return Err(TurnError::AlreadyRolled);
        }
        if next.pending.is_some() {
            return Err(TurnError::DecisionPending);
        }
        let mut events = Vec::new();

        if let TurnPhase::Skipping { remaining } = next.players[index].turn {
            let left = remaining.saturating_sub(1);
            let active = &mut next.players[index];
            active.turn = TurnPhase::skipping(left);
            events.push(TurnEvent::TurnSkipped {
                player: active.name.clone(),
                remaining: left,
            });
            Self::advance_turn(&mut next, &mut events);
            return Ok(self.finish(next, events, None));
        }

        let active = &mut next.players[index];
        let count = if active.has_charity_bonus {
            active.has_charity_bonus = false;
            CHARITY_DICE
        } else if active.on_fast_track {
            FAST_TRACK_DICE
        } else {
            RAT_RACE_DICE
        };
        let dice = self.dice.roll(count);
        let distance: usize = dice.iter().map(|d| usize::from(*d)).sum();
        events.push(TurnEvent::Rolled {
            player: active.name.clone(),
            dice: dice.clone(),
        });
        active.turn = TurnPhase::Rolled {
            dice,
            skips_after: 0,
        };

        let condition = self.move_and_resolve(&mut next, index, distance, &mut events);
        Ok(self.finish(next, events, condition))
    }

    /// Buy or decline the pending opportunity.
    ///
    /// # Errors
    ///
    /// `InvalidDecision` without a pending opportunity; `InsufficientFunds`
    /// when buying a card the player cannot afford, which stays pending.
    pub fn decide_opportunity(
        &mut self,
        snapshot: &GameSnapshot,
        player: &PlayerId,
        buy: bool,
    ) -> Result<ActionOutcome, TurnError> {
        let (mut next, index) = Self::begin(snapshot, player)?;
        let Some(PendingDecision::Opportunity { card }) = next.pending.clone() else {
            return Err(TurnError::InvalidDecision);
        };
        let active = &mut next.players[index];
        let mut events = Vec::new();

        if buy {
            if active.cash < card.down_payment {
                return Err(TurnError::InsufficientFunds {
                    required: card.down_payment,
                    available: active.cash,
                });
            }
            let monthly_income = self.config.custom_mode.purchase_income(card.monthly_income);
            active.cash -= card.down_payment;
            let id = active.next_asset_id("re");
            active.rat_race.assets.real_estate.push(RealEstateAsset {
                id,
                name: card.name.clone(),
                down_payment: card.down_payment,
                total_cost: card.total_cost,
                monthly_income,
                current_value: card.total_value,
            });
            finance::recalculate(active);
            events.push(TurnEvent::AssetPurchased {
                player: active.name.clone(),
                asset: card.name,
                down_payment: card.down_payment,
                monthly_income,
            });
        } else {
            events.push(TurnEvent::OpportunityDeclined {
                player: active.name.clone(),
                card: card.name,
            });
        }
        next.pending = None;
        Ok(self.finish(next, events, None))
    }

    /// Accept or decline the pending charity donation.
    ///
    /// Confirming a donation the player cannot afford discards it and
    /// reports `InsufficientFunds` as the outcome's condition.
    ///
    /// # Errors
    ///
    /// `InvalidDecision` when no donation is pending.
    pub fn confirm_charity(
        &mut self,
        snapshot: &GameSnapshot,
        player: &PlayerId,
        confirmed: bool,
    ) -> Result<ActionOutcome, TurnError> {
        let (mut next, index) = Self::begin(snapshot, player)?;
        let Some(PendingDecision::Charity { amount }) = next.pending.clone() else {
            return Err(TurnError::InvalidDecision);
        };
        next.pending = None;
        let active = &mut next.players[index];
        let mut events = Vec::new();
        let mut condition = None;

        if !confirmed {
            events.push(TurnEvent::CharityDeclined {
                player: active.name.clone(),
            });
        } else if active.cash < amount {
            events.push(TurnEvent::CharityUnaffordable {
                player: active.name.clone(),
                amount,
            });
            condition = Some(TurnError::InsufficientFunds {
                required: amount,
                available: active.cash,
            });
        } else {
            active.cash -= amount;
            active.has_charity_bonus = true;
            finance::recalculate(active);
            events.push(TurnEvent::CharityDonated {
                player: active.name.clone(),
                amount,
            });
        }
        Ok(self.finish(next, events, condition))
    }

    /// End the active player's turn.
    ///
    /// An eligible player still in the Rat Race is moved to the Fast Track
    /// before the turn passes. Any card on display is cleared.
    ///
    /// # Errors
    ///
    /// `MustRollFirst` before rolling; `DecisionPending` while a buy or
    /// donation choice is open.
    pub fn pass(
        &mut self,
        snapshot: &GameSnapshot,
        player: &PlayerId,
    ) -> Result<ActionOutcome, TurnError> {
        let (mut next, index) = Self::begin(snapshot, player)?;
        if !next.players[index].has_rolled() {
            return Err(TurnError::MustRollFirst);
        }
        if next.pending.is_some() {
            return Err(TurnError::DecisionPending);
        }
        let mut events = Vec::new();
        next.current_card = None;
        Self::advance_turn(&mut next, &mut events);
        Ok(self.finish(next, events, None))
    }

    fn begin(
        snapshot: &GameSnapshot,
        player: &PlayerId,
    ) -> Result<(GameSnapshot, usize), TurnError> {
        if snapshot.is_over() {
            return Err(TurnError::GameOver);
        }
        let index = snapshot
            .player_index(player)
            .ok_or_else(|| TurnError::UnknownPlayer {
                player: player.to_string(),
            })?;
        if index != snapshot.current_player_index {
            return Err(TurnError::NotYourTurn {
                player: player.to_string(),
            });
        }
        Ok((snapshot.clone(), index))
    }

    fn finish(
        &self,
        mut next: GameSnapshot,
        mut events: Vec<TurnEvent>,
        condition: Option<TurnError>,
    ) -> ActionOutcome {
        next.refresh_phase();
        events.extend(self.endgame.evaluate(&mut next));
        for event in &events {
            log::debug!("{event}");
        }
        ActionOutcome {
            snapshot: next,
            events,
            condition,
        }
    }

    /// Move the active player and apply the space they land on.
    fn move_and_resolve(
        &mut self,
        next: &mut GameSnapshot,
        index: usize,
        distance: usize,
        events: &mut Vec<TurnEvent>,
    ) -> Option<TurnError> {
        let from = next.players[index].position;
        let to = self.board.advance(from, distance);
        let space = self.board.space(to).kind;
        let player = &mut next.players[index];
        player.position = to;
        events.push(TurnEvent::Moved {
            player: player.name.clone(),
            from,
            to,
            space,
        });

        // Only landing on Payday pays; passing it does not.
        match space {
            SpaceKind::Payday => {
                if !player.on_fast_track {
                    collect_payday(player, events);
                }
                None
            }
            SpaceKind::Opportunity => {
                if let Some(card) = next.decks.draw_opportunity(&mut self.rng) {
                    let player = &next.players[index];
                    events.push(TurnEvent::OpportunityOffered {
                        player: player.name.clone(),
                        card: card.name.clone(),
                        down_payment: card.down_payment,
                    });
                    if card.buyable {
                        next.pending = Some(PendingDecision::Opportunity { card: card.clone() });
                    }
                    next.current_card = Some(DrawnCard::Opportunity(card));
                }
                None
            }
            SpaceKind::Market => {
                if let Some(card) = next.decks.draw_market(&mut self.rng) {
                    events.push(TurnEvent::MarketOffer {
                        player: next.players[index].name.clone(),
                        asset: card.asset_name.clone(),
                        price: card.selling_price,
                    });
                    next.current_card = Some(DrawnCard::Market(card));
                }
                None
            }
            SpaceKind::Doodads => {
                let card = next.decks.draw_doodad(&mut self.rng)?;
                let player = &mut next.players[index];
                let condition = if player.cash < card.cost {
                    events.push(TurnEvent::DoodadUnaffordable {
                        player: player.name.clone(),
                        doodad: card.name.clone(),
                        cost: card.cost,
                        available: player.cash,
                    });
                    Some(TurnError::InsufficientFunds {
                        required: card.cost,
                        available: player.cash,
                    })
                } else {
                    player.cash -= card.cost;
                    player.rat_race.monthly_expenses += card.expense_increase;
                    finance::recalculate(player);
                    events.push(TurnEvent::DoodadPaid {
                        player: player.name.clone(),
                        doodad: card.name.clone(),
                        cost: card.cost,
                        expense_increase: card.expense_increase,
                    });
                    None
                };
                next.current_card = Some(DrawnCard::Doodad(card));
                condition
            }
            SpaceKind::Baby => {
                if player.rat_race.children >= MAX_CHILDREN {
                    events.push(TurnEvent::ChildLimitReached {
                        player: player.name.clone(),
                    });
                    return Some(TurnError::MaxChildrenReached);
                }
                player.rat_race.children += 1;
                finance::recalculate(player);
                events.push(TurnEvent::ChildBorn {
                    player: player.name.clone(),
                    children: player.rat_race.children,
                });
                None
            }
            SpaceKind::Downsize => {
                if let TurnPhase::Rolled { skips_after, .. } = &mut player.turn {
                    *skips_after = DOWNSIZE_SKIPS;
                }
                events.push(TurnEvent::Downsized {
                    player: player.name.clone(),
                    skips: DOWNSIZE_SKIPS,
                });
                None
            }
            SpaceKind::Charity => {
                let amount = floor_pct(player.rat_race.monthly_income, CHARITY_RATE_PCT);
                events.push(TurnEvent::CharityOffered {
                    player: player.name.clone(),
                    amount,
                });
                next.pending = Some(PendingDecision::Charity { amount });
                None
            }
            SpaceKind::Exit => {
                if player.on_fast_track {
                    return None;
                }
                if finance::can_exit_rat_race(player) {
                    enter_fast_track(player, events);
                } else {
                    events.push(TurnEvent::ExitBlocked {
                        player: player.name.clone(),
                        passive_income: player.rat_race.passive_income,
                        total_expenses: player.rat_race.total_expenses,
                    });
                }
                None
            }
        }
    }

    /// Hand the turn to the next active player and clear their dice.
    ///
    /// An outgoing player who now qualifies leaves the Rat Race first,
    /// whether they played the turn or sat it out.
    fn advance_turn(next: &mut GameSnapshot, events: &mut Vec<TurnEvent>) {
        let count = next.players.len();
        let current = next.current_player_index;
        if let Some(outgoing) = next.players.get_mut(current)
            && !outgoing.on_fast_track
            && finance::can_exit_rat_race(outgoing)
        {
            enter_fast_track(outgoing, events);
        }
        let Some(target) = (1..=count)
            .map(|step| (current + step) % count)
            .find(|&i| next.players[i].status == PlayerStatus::Active)
        else {
            return;
        };
        next.current_player_index = target;
        let incoming = &mut next.players[target];
        incoming.turn = incoming.turn.cleared();
        events.push(TurnEvent::TurnPassed {
            from: next.players[current].name.clone(),
            to: next.players[target].name.clone(),
        });
    }
}

fn collect_payday(player: &mut Player, events: &mut Vec<TurnEvent>) {
    let amount = player.rat_race.monthly_payday;
    player.cash += amount;
    finance::recalculate(player);
    events.push(TurnEvent::PaydayCollected {
        player: player.name.clone(),
        amount,
    });
}

/// One-way move onto the Fast Track, capturing buyout and income goal.
fn enter_fast_track(player: &mut Player, events: &mut Vec<TurnEvent>) {
    finance::recalculate(player);
    let passive = player.rat_race.passive_income;
    let buyout = FAST_TRACK_BUYOUT_MULTIPLIER * (passive - player.rat_race.total_expenses);
    player.on_fast_track = true;
    player.position = 0;
    player.fast_track.buyout = buyout;
    player.fast_track.income_goal = buyout + FAST_TRACK_INCOME_GOAL_BONUS;
    player.fast_track.current_income = passive;
    events.push(TurnEvent::EnteredFastTrack {
        player: player.name.clone(),
        buyout,
        income_goal: player.fast_track.income_goal,
    });
}
