//! Typed turn events and the capped, most-recent-first turn log.
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

use crate::board::SpaceKind;
use crate::constants::TURN_LOG_CAPACITY;
use crate::player::DiceRoll;

/// Something that happened while resolving an action.
///
/// Player fields hold display names, not ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TurnEvent {
    Rolled {
        player: String,
        dice: DiceRoll,
    },
    Moved {
        player: String,
        from: usize,
        to: usize,
        space: SpaceKind,
    },
    TurnSkipped {
        player: String,
        remaining: u8,
    },
    PaydayCollected {
        player: String,
        amount: i64,
    },
    OpportunityOffered {
        player: String,
        card: String,
        down_payment: i64,
    },
    AssetPurchased {
        player: String,
        asset: String,
        down_payment: i64,
        monthly_income: i64,
    },
    OpportunityDeclined {
        player: String,
        card: String,
    },
    MarketOffer {
        player: String,
        asset: String,
        price: i64,
    },
    DoodadPaid {
        player: String,
        doodad: String,
        cost: i64,
        expense_increase: i64,
    },
    DoodadUnaffordable {
        player: String,
        doodad: String,
        cost: i64,
        available: i64,
    },
    ChildBorn {
        player: String,
        children: u8,
    },
    ChildLimitReached {
        player: String,
    },
    Downsized {
        player: String,
        skips: u8,
    },
    CharityOffered {
        player: String,
        amount: i64,
    },
    CharityDonated {
        player: String,
        amount: i64,
    },
    CharityDeclined {
        player: String,
    },
    CharityUnaffordable {
        player: String,
        amount: i64,
    },
    ExitBlocked {
        player: String,
        passive_income: i64,
        total_expenses: i64,
    },
    EnteredFastTrack {
        player: String,
        buyout: i64,
        income_goal: i64,
    },
    TurnPassed {
        from: String,
        to: String,
    },
    PlayerWon {
        player: String,
    },
}

impl fmt::Display for TurnEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rolled { player, dice } => {
                let total: u32 = dice.iter().map(|d| u32::from(*d)).sum();
                if dice.len() == 1 {
                    write!(f, "{player} rolled {total}")
                } else {
                    let faces: Vec<String> = dice.iter().map(ToString::to_string).collect();
                    write!(f, "{player} rolled {} ({total})", faces.join(" + "))
                }
            }
            Self::Moved {
                player, to, space, ..
            } => write!(f, "{player} moved to space {to} ({space})"),
            Self::TurnSkipped { player, remaining } => {
                write!(f, "{player} sits out a turn ({remaining} left)")
            }
            Self::PaydayCollected { player, amount } => {
                write!(f, "{player} collected payday of ${amount}")
            }
            Self::OpportunityOffered {
                player,
                card,
                down_payment,
            } => write!(f, "{player} drew {card} (down payment ${down_payment})"),
            Self::AssetPurchased {
                player,
                asset,
                down_payment,
                monthly_income,
            } => write!(
                f,
                "{player} bought {asset} for ${down_payment} down (+${monthly_income}/mo)"
            ),
            Self::OpportunityDeclined { player, card } => write!(f, "{player} passed on {card}"),
            Self::MarketOffer {
                player,
                asset,
                price,
            } => write!(f, "{player} saw a market offer: {asset} at ${price}"),
            Self::DoodadPaid {
                player,
                doodad,
                cost,
                expense_increase,
            } => {
                write!(f, "{player} paid ${cost} for {doodad}")?;
                if *expense_increase > 0 {
                    write!(f, " (+${expense_increase}/mo expenses)")?;
                }
                Ok(())
            }
            Self::DoodadUnaffordable {
                player,
                doodad,
                cost,
                available,
            } => write!(
                f,
                "{player} cannot afford {doodad}: ${cost} needed, ${available} on hand"
            ),
            Self::ChildBorn { player, children } => {
                write!(f, "{player} had a baby ({children} children)")
            }
            Self::ChildLimitReached { player } => {
                write!(f, "{player} already has the maximum number of children")
            }
            Self::Downsized { player, skips } => {
                write!(f, "{player} was downsized and loses {skips} turns")
            }
            Self::CharityOffered { player, amount } => {
                write!(f, "{player} may donate ${amount} to charity")
            }
            Self::CharityDonated { player, amount } => write!(
                f,
                "{player} donated ${amount} and rolls three dice next turn"
            ),
            Self::CharityDeclined { player } => write!(f, "{player} declined to donate"),
            Self::CharityUnaffordable { player, amount } => {
                write!(f, "{player} cannot afford the ${amount} donation")
            }
            Self::ExitBlocked {
                player,
                passive_income,
                total_expenses,
            } => write!(
                f,
                "{player} cannot exit yet: passive ${passive_income} vs expenses ${total_expenses}"
            ),
            Self::EnteredFastTrack {
                player,
                buyout,
                income_goal,
            } => write!(
                f,
                "{player} escaped the Rat Race! Buyout ${buyout}, goal ${income_goal}"
            ),
            Self::TurnPassed { from, to } => write!(f, "{from} ended their turn; {to} is up"),
            Self::PlayerWon { player } => write!(f, "{player} wins the game"),
        }
    }
}

/// Display-only history of recent events, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl TurnLog {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(TURN_LOG_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_front(message.into());
        self.entries.truncate(self.capacity);
    }

    /// Append events in the order they happened.
    pub fn record(&mut self, events: &[TurnEvent]) {
        for event in events {
            self.push(event.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[must_use]
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for TurnLog {
    fn default() -> Self {
        Self::new()
    }
}
