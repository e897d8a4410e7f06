//! Game configuration: custom-mode multipliers and endgame selection.
use serde::{Deserialize, Serialize};

use crate::constants::{
    CUSTOM_BASE_EXPENSES_PCT, CUSTOM_PASSIVE_INCOME_PCT, CUSTOM_STARTING_CASH_PCT,
};
use crate::error::ConfigError;
use crate::numbers::scale_pct;

/// Optional multiplier transforms ("custom mode").
///
/// The two transforms are independent; [`CustomMode::from_flag`] maps the
/// single user-facing toggle onto both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CustomMode {
    /// Starting cash ×1.5 and base expenses ×0.8 on profession templates.
    #[serde(default)]
    pub scale_professions: bool,
    /// Newly purchased asset income ×1.2 at the moment of purchase.
    #[serde(default)]
    pub boost_passive_income: bool,
}

impl CustomMode {
    #[must_use]
    pub const fn from_flag(enabled: bool) -> Self {
        Self {
            scale_professions: enabled,
            boost_passive_income: enabled,
        }
    }

    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.scale_professions || self.boost_passive_income
    }

    /// Monthly income credited for a purchased asset.
    #[must_use]
    pub fn purchase_income(self, income: i64) -> i64 {
        if self.boost_passive_income {
            scale_pct(income, CUSTOM_PASSIVE_INCOME_PCT)
        } else {
            income
        }
    }

    #[must_use]
    pub fn starting_cash(self, cash: i64) -> i64 {
        if self.scale_professions {
            scale_pct(cash, CUSTOM_STARTING_CASH_PCT)
        } else {
            cash
        }
    }

    #[must_use]
    pub fn base_expenses(self, expenses: i64) -> i64 {
        if self.scale_professions {
            scale_pct(expenses, CUSTOM_BASE_EXPENSES_PCT)
        } else {
            expenses
        }
    }
}

/// Which terminal rule the engine evaluates after each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EndgameRuleKind {
    /// No player ever wins or is eliminated.
    #[default]
    None,
    /// The first player to reach the Fast Track wins.
    FastTrackVictory,
}

/// Top-level configuration for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GameConfig {
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub custom_mode: CustomMode,
    #[serde(default)]
    pub endgame: EndgameRuleKind,
}

impl GameConfig {
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_custom_mode(mut self, custom_mode: CustomMode) -> Self {
        self.custom_mode = custom_mode;
        self
    }

    #[must_use]
    pub const fn with_endgame(mut self, endgame: EndgameRuleKind) -> Self {
        self.endgame = endgame;
        self
    }

    /// Load configuration from JSON; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|err| ConfigError::parse("game config", &err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_enables_both_transforms() {
        let on = CustomMode::from_flag(true);
        assert!(on.scale_professions && on.boost_passive_income);
        assert!(!CustomMode::from_flag(false).is_enabled());
    }

    #[test]
    fn purchase_income_boost_rounds() {
        let on = CustomMode::from_flag(true);
        assert_eq!(on.purchase_income(500), 600);
        assert_eq!(on.purchase_income(333), 400);
        assert_eq!(CustomMode::default().purchase_income(333), 333);
    }

    #[test]
    fn transforms_are_independent() {
        let boost_only = CustomMode {
            scale_professions: false,
            boost_passive_income: true,
        };
        assert_eq!(boost_only.starting_cash(1000), 1000);
        assert_eq!(boost_only.base_expenses(4200), 4200);
        assert_eq!(boost_only.purchase_income(100), 120);
    }

    #[test]
    fn config_json_defaults_missing_fields() {
        let cfg = GameConfig::from_json(r#"{"seed": 42}"#).unwrap();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.custom_mode, CustomMode::default());
        assert_eq!(cfg.endgame, EndgameRuleKind::None);

        let cfg = GameConfig::from_json(
            r#"{"custom_mode": {"scale_professions": true}, "endgame": "fast_track_victory"}"#,
        )
        .unwrap();
        assert!(cfg.custom_mode.scale_professions);
        assert!(!cfg.custom_mode.boost_passive_income);
        assert_eq!(cfg.endgame, EndgameRuleKind::FastTrackVictory);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(matches!(
            GameConfig::from_json("{"),
            Err(ConfigError::Parse { .. })
        ));
    }
}
