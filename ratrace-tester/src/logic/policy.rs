use std::fmt;

use clap::ValueEnum;
use ratrace_game::{OpportunityCard, Player};

/// Decision hooks for an automated player.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Whether to buy the opportunity on offer.
    fn buy_opportunity(&mut self, player: &Player, card: &OpportunityCard) -> bool;

    /// Whether to donate `amount` to charity.
    fn donate(&mut self, player: &Player, amount: i64) -> bool;
}

/// Built-in gameplay strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum GameplayStrategy {
    /// Keep a three-month cushion and never donate
    Conservative,
    /// Buy anything affordable and always donate
    Aggressive,
    /// Buy income-producing deals, donate when comfortably covered
    Balanced,
}

impl GameplayStrategy {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GameplayStrategy::Conservative => "Conservative",
            GameplayStrategy::Aggressive => "Aggressive",
            GameplayStrategy::Balanced => "Balanced",
        }
    }

    #[must_use]
    pub fn create_policy(self) -> Box<dyn PlayerPolicy> {
        match self {
            GameplayStrategy::Conservative => Box::new(ConservativePolicy),
            GameplayStrategy::Aggressive => Box::new(AggressivePolicy),
            GameplayStrategy::Balanced => Box::new(BalancedPolicy),
        }
    }
}

impl fmt::Display for GameplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct ConservativePolicy;
struct AggressivePolicy;
struct BalancedPolicy;

/// Cash left after paying `cost` up front.
fn cash_after(player: &Player, cost: i64) -> i64 {
    player.cash - cost
}

impl PlayerPolicy for ConservativePolicy {
    fn name(&self) -> &'static str {
        "conservative"
    }

    fn buy_opportunity(&mut self, player: &Player, card: &OpportunityCard) -> bool {
        cash_after(player, card.down_payment) > 3 * player.rat_race.total_expenses
    }

    fn donate(&mut self, _player: &Player, _amount: i64) -> bool {
        false
    }
}

impl PlayerPolicy for AggressivePolicy {
    fn name(&self) -> &'static str {
        "aggressive"
    }

    fn buy_opportunity(&mut self, player: &Player, card: &OpportunityCard) -> bool {
        cash_after(player, card.down_payment) >= 0
    }

    fn donate(&mut self, _player: &Player, _amount: i64) -> bool {
        true
    }
}

impl PlayerPolicy for BalancedPolicy {
    fn name(&self) -> &'static str {
        "balanced"
    }

    fn buy_opportunity(&mut self, player: &Player, card: &OpportunityCard) -> bool {
        card.monthly_income > 0
            && cash_after(player, card.down_payment) >= player.rat_race.total_expenses
    }

    fn donate(&mut self, player: &Player, amount: i64) -> bool {
        player.cash >= 2 * amount
    }
}
