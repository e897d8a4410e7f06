//! Player record, owned assets and liabilities, and per-player turn phase.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Dice faces rolled in a single turn (one to three dice).
pub type DiceRoll = SmallVec<[u8; 3]>;

/// Opaque, unique player identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    #[default]
    Active,
    Eliminated,
    Won,
}

/// Where the player is within their own turn.
///
/// `Rolled` remembers the skips earned this turn (Downsize) so they start
/// counting down once the turn passes on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "phase", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TurnPhase {
    #[default]
    Ready,
    Rolled { dice: DiceRoll, skips_after: u8 },
    Skipping { remaining: u8 },
}

impl TurnPhase {
    /// Phase a player enters when their dice are cleared for a new turn.
    #[must_use]
    pub fn cleared(&self) -> Self {
        match self {
            Self::Ready => Self::Ready,
            Self::Rolled { skips_after, .. } => Self::skipping(*skips_after),
            Self::Skipping { remaining } => Self::skipping(*remaining),
        }
    }

    #[must_use]
    pub const fn skipping(remaining: u8) -> Self {
        if remaining == 0 {
            Self::Ready
        } else {
            Self::Skipping { remaining }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealEstateAsset {
    pub id: String,
    pub name: String,
    pub down_payment: i64,
    pub total_cost: i64,
    pub monthly_income: i64,
    pub current_value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAsset {
    pub id: String,
    pub symbol: String,
    pub shares: u32,
    pub purchase_price: i64,
    pub current_value: i64,
    pub monthly_income: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessAsset {
    pub id: String,
    pub name: String,
    pub cost: i64,
    pub monthly_income: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankLoan {
    pub id: String,
    pub amount: i64,
    pub monthly_payment: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Assets {
    #[serde(default)]
    pub real_estate: Vec<RealEstateAsset>,
    #[serde(default)]
    pub stocks: Vec<StockAsset>,
    #[serde(default)]
    pub businesses: Vec<BusinessAsset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Liabilities {
    #[serde(default)]
    pub home_loan: i64,
    #[serde(default)]
    pub car_loan: i64,
    #[serde(default)]
    pub credit_card_debt: i64,
    #[serde(default)]
    pub bank_loans: Vec<BankLoan>,
}

/// Monthly finances while circling the Rat Race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RatRaceFinancials {
    pub monthly_income: i64,
    /// Base expenses before children and loan payments.
    pub monthly_expenses: i64,
    /// Cash flow floored at zero; what a Payday credits.
    pub monthly_payday: i64,
    pub passive_income: i64,
    pub total_expenses: i64,
    pub children: u8,
    pub credit_limit: i64,
    #[serde(default)]
    pub auditor_id: Option<PlayerId>,
    #[serde(default)]
    pub assets: Assets,
    #[serde(default)]
    pub liabilities: Liabilities,
}

/// Fast Track figures captured when a player leaves the Rat Race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastTrackFinancials {
    pub buyout: i64,
    pub income_goal: i64,
    pub current_income: i64,
    pub dream_price: i64,
    pub dream_price_multiplier: i64,
}

impl Default for FastTrackFinancials {
    fn default() -> Self {
        Self {
            buyout: 0,
            income_goal: 0,
            current_income: 0,
            dream_price: 0,
            dream_price_multiplier: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PlayerRecord", into = "PlayerRecord")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub profession: Option<String>,
    pub position: usize,
    pub on_fast_track: bool,
    pub rat_race: RatRaceFinancials,
    pub fast_track: FastTrackFinancials,
    pub cash: i64,
    pub net_worth: i64,
    pub status: PlayerStatus,
    pub has_charity_bonus: bool,
    pub turn: TurnPhase,
    pub next_asset_seq: u32,
}

/// Saved form of a [`Player`].
///
/// Besides `turn`, saves carry the flat `rolledDice` / `passesThisTurn`
/// pair. A save without `turn` rebuilds the phase from that pair.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerRecord {
    id: PlayerId,
    name: String,
    color: String,
    #[serde(default)]
    profession: Option<String>,
    #[serde(default)]
    position: usize,
    #[serde(default)]
    on_fast_track: bool,
    #[serde(default)]
    rat_race: RatRaceFinancials,
    #[serde(default)]
    fast_track: FastTrackFinancials,
    #[serde(default)]
    cash: i64,
    #[serde(default)]
    net_worth: i64,
    #[serde(default)]
    status: PlayerStatus,
    #[serde(default)]
    has_charity_bonus: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    turn: Option<TurnPhase>,
    #[serde(default)]
    rolled_dice: DiceRoll,
    #[serde(default)]
    passes_this_turn: u8,
    #[serde(default)]
    next_asset_seq: u32,
}

impl From<PlayerRecord> for Player {
    fn from(record: PlayerRecord) -> Self {
        let turn = record.turn.unwrap_or_else(|| {
            if record.rolled_dice.is_empty() {
                TurnPhase::skipping(record.passes_this_turn)
            } else {
                TurnPhase::Rolled {
                    dice: record.rolled_dice,
                    skips_after: record.passes_this_turn,
                }
            }
        });
        Self {
            id: record.id,
            name: record.name,
            color: record.color,
            profession: record.profession,
            position: record.position,
            on_fast_track: record.on_fast_track,
            rat_race: record.rat_race,
            fast_track: record.fast_track,
            cash: record.cash,
            net_worth: record.net_worth,
            status: record.status,
            has_charity_bonus: record.has_charity_bonus,
            turn,
            next_asset_seq: record.next_asset_seq,
        }
    }
}

impl From<Player> for PlayerRecord {
    fn from(player: Player) -> Self {
        let rolled_dice = DiceRoll::from_slice(player.rolled_dice());
        let passes_this_turn = player.passes_this_turn();
        Self {
            id: player.id,
            name: player.name,
            color: player.color,
            profession: player.profession,
            position: player.position,
            on_fast_track: player.on_fast_track,
            rat_race: player.rat_race,
            fast_track: player.fast_track,
            cash: player.cash,
            net_worth: player.net_worth,
            status: player.status,
            has_charity_bonus: player.has_charity_bonus,
            turn: Some(player.turn),
            rolled_dice,
            passes_this_turn,
            next_asset_seq: player.next_asset_seq,
        }
    }
}

impl Player {
    /// Fresh participant with no profession, sitting on Payday.
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            profession: None,
            position: 0,
            on_fast_track: false,
            rat_race: RatRaceFinancials::default(),
            fast_track: FastTrackFinancials::default(),
            cash: 0,
            net_worth: 0,
            status: PlayerStatus::Active,
            has_charity_bonus: false,
            turn: TurnPhase::Ready,
            next_asset_seq: 0,
        }
    }

    /// Dice rolled this turn; empty until the player rolls.
    #[must_use]
    pub fn rolled_dice(&self) -> &[u8] {
        match &self.turn {
            TurnPhase::Rolled { dice, .. } => dice.as_slice(),
            TurnPhase::Ready | TurnPhase::Skipping { .. } => &[],
        }
    }

    #[must_use]
    pub const fn has_rolled(&self) -> bool {
        matches!(self.turn, TurnPhase::Rolled { .. })
    }

    /// Turns this player still has to sit out.
    #[must_use]
    pub const fn passes_this_turn(&self) -> u8 {
        match self.turn {
            TurnPhase::Ready => 0,
            TurnPhase::Rolled { skips_after, .. } => skips_after,
            TurnPhase::Skipping { remaining } => remaining,
        }
    }

    /// Allocate an id for a newly acquired asset.
    pub fn next_asset_id(&mut self, prefix: &str) -> String {
        self.next_asset_seq = self.next_asset_seq.saturating_add(1);
        format!("{}-{prefix}-{}", self.id, self.next_asset_seq)
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
