//! Profession templates and one-time assignment to players.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::CustomMode;
use crate::error::ConfigError;
use crate::finance;
use crate::player::Player;

const DEFAULT_PROFESSION_DATA: &str = include_str!("../data/professions.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionAssets {
    #[serde(default)]
    pub real_estate: i64,
    #[serde(default)]
    pub stocks: i64,
    #[serde(default)]
    pub cash: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionLiabilities {
    #[serde(default)]
    pub home_mortgage: i64,
    #[serde(default)]
    pub car_loan: i64,
    #[serde(default)]
    pub credit_card: i64,
    #[serde(default)]
    pub student_loan: i64,
}

/// Starting financial profile for a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profession {
    pub id: u32,
    pub name: String,
    pub career: String,
    pub salary: i64,
    /// Monthly income.
    pub paycheck: i64,
    pub expenses: i64,
    pub cash_flow: i64,
    #[serde(default)]
    pub assets: ProfessionAssets,
    #[serde(default)]
    pub liabilities: ProfessionLiabilities,
    #[serde(default)]
    pub credit_limit: i64,
}

impl Profession {
    /// Custom-mode variant: more starting cash, lower base expenses.
    ///
    /// The paycheck is unchanged; cash flow is recomputed from it.
    #[must_use]
    pub fn customized(&self, mode: CustomMode) -> Self {
        if !mode.scale_professions {
            return self.clone();
        }
        let expenses = mode.base_expenses(self.expenses);
        Self {
            assets: ProfessionAssets {
                cash: mode.starting_cash(self.assets.cash),
                ..self.assets.clone()
            },
            expenses,
            cash_flow: self.paycheck - expenses,
            ..self.clone()
        }
    }

    /// Seed a player's finances from this template and refresh derived fields.
    pub fn apply_to(&self, player: &mut Player) {
        player.profession = Some(self.name.clone());
        let rr = &mut player.rat_race;
        rr.monthly_income = self.paycheck;
        rr.monthly_expenses = self.expenses;
        rr.monthly_payday = self.cash_flow;
        rr.credit_limit = self.credit_limit;
        rr.liabilities.home_loan = self.liabilities.home_mortgage;
        rr.liabilities.car_loan = self.liabilities.car_loan;
        rr.liabilities.credit_card_debt = self.liabilities.credit_card;
        player.cash = self.assets.cash;
        finance::recalculate(player);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ProfessionList(pub Vec<Profession>);

impl ProfessionList {
    #[must_use]
    pub const fn empty() -> Self {
        Self(vec![])
    }

    /// Load professions from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|err| ConfigError::parse("professions", &err))
    }

    /// The six standard professions shipped with the game.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_PROFESSION_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Profession> {
        self.0.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Profession> {
        self.0.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a ProfessionList {
    type Item = &'a Profession;
    type IntoIter = std::slice::Iter<'a, Profession>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Give every player without a profession one from a shuffled catalog.
///
/// Player `i` receives `shuffled[i % len]`, so tables no larger than the
/// catalog get distinct professions. Newly seated players are audited by
/// their right-hand neighbour. Players that already hold a profession keep it.
pub fn assign_professions<R: Rng + ?Sized>(
    players: &[Player],
    catalog: &ProfessionList,
    mode: CustomMode,
    rng: &mut R,
) -> Vec<Player> {
    if catalog.is_empty() {
        log::warn!("profession catalog is empty; players keep blank finances");
        return players.to_vec();
    }
    let mut shuffled = catalog.0.clone();
    shuffled.shuffle(rng);
    let count = players.len();

    players
        .iter()
        .enumerate()
        .map(|(index, player)| {
            let mut next = player.clone();
            if next.profession.is_none() {
                let profession = shuffled[index % shuffled.len()].customized(mode);
                next.rat_race.auditor_id = Some(players[(index + 1) % count].id.clone());
                profession.apply_to(&mut next);
                log::debug!("{} assigned profession {}", next.name, profession.name);
            }
            next
        })
        .collect()
}
