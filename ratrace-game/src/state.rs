//! The serializable game snapshot exchanged with storage and the UI.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::cards::{DrawnCard, OpportunityCard};
use crate::constants::MAX_PLAYERS;
use crate::deck::Decks;
use crate::error::TurnError;
use crate::player::{Player, PlayerId};
use crate::professions::ProfessionList;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Setup,
    RatRace,
    FastTrack,
    Ended,
}

/// A choice the active player must make before passing the turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingDecision {
    Opportunity { card: OpportunityCard },
    Charity { amount: i64 },
}

/// Everything needed to resume a game.
///
/// Only `players`, `currentPlayerIndex`, `gamePhase` and `professionDeck` are
/// required in JSON; the rest default so minimal saves still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub game_phase: GamePhase,
    #[serde(default)]
    pub profession_deck: ProfessionList,
    #[serde(default)]
    pub decks: Decks,
    /// Card drawn this turn; cleared when the turn passes.
    #[serde(default)]
    pub current_card: Option<DrawnCard>,
    #[serde(default)]
    pub pending: Option<PendingDecision>,
    #[serde(default)]
    pub winner: Option<PlayerId>,
}

impl GameSnapshot {
    /// Empty snapshot in the setup phase.
    #[must_use]
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players,
            current_player_index: 0,
            game_phase: GamePhase::Setup,
            profession_deck: ProfessionList::empty(),
            decks: Decks::default(),
            current_card: None,
            pending: None,
            winner: None,
        }
    }

    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn player_index(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    /// Card drawn by the active player this turn, if any.
    #[must_use]
    pub const fn current_card(&self) -> Option<&DrawnCard> {
        self.current_card.as_ref()
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.game_phase, GamePhase::Ended)
    }

    /// `FastTrack` once anyone has left the Rat Race; `Ended` is sticky.
    pub fn refresh_phase(&mut self) {
        if self.is_over() {
            return;
        }
        self.game_phase = if self.players.iter().any(|p| p.on_fast_track) {
            GamePhase::FastTrack
        } else {
            GamePhase::RatRace
        };
    }

    /// Clear every player's dice, carrying pending skips forward.
    pub fn clear_all_dice(&mut self) {
        for player in &mut self.players {
            player.turn = player.turn.cleared();
        }
    }

    /// Keep the turn pointer inside the roster.
    pub fn clamp_turn_index(&mut self) {
        if self.players.is_empty() {
            self.current_player_index = 0;
        } else if self.current_player_index >= self.players.len() {
            log::warn!(
                "turn index {} out of range for {} players; resetting",
                self.current_player_index,
                self.players.len()
            );
            self.current_player_index = 0;
        }
    }
}

/// Check a roster before seating it.
///
/// # Errors
///
/// Rejects empty or oversized tables and duplicate ids or colors.
pub fn validate_roster(players: &[Player]) -> Result<(), TurnError> {
    if players.is_empty() {
        return Err(TurnError::NoPlayers);
    }
    if players.len() > MAX_PLAYERS {
        return Err(TurnError::TooManyPlayers { max: MAX_PLAYERS });
    }
    let mut ids = HashSet::new();
    let mut colors = HashSet::new();
    for player in players {
        if !ids.insert(&player.id) {
            return Err(TurnError::DuplicatePlayer {
                player: player.id.to_string(),
            });
        }
        if !colors.insert(player.color.as_str()) {
            return Err(TurnError::DuplicateColor {
                color: player.color.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::TurnPhase;
    use smallvec::smallvec;

    fn seat(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(format!("p{i}"), format!("P{i}"), format!("color-{i}")))
            .collect()
    }

    #[test]
    fn roster_limits() {
        assert_eq!(validate_roster(&[]), Err(TurnError::NoPlayers));
        assert_eq!(
            validate_roster(&seat(7)),
            Err(TurnError::TooManyPlayers { max: 6 })
        );
        assert!(validate_roster(&seat(6)).is_ok());
    }

    #[test]
    fn roster_rejects_duplicate_colors_and_ids() {
        let mut players = seat(3);
        players[2].color = players[0].color.clone();
        assert_eq!(
            validate_roster(&players),
            Err(TurnError::DuplicateColor {
                color: "color-0".into()
            })
        );

        let mut players = seat(2);
        players[1].id = players[0].id.clone();
        assert!(matches!(
            validate_roster(&players),
            Err(TurnError::DuplicatePlayer { .. })
        ));
    }

    #[test]
    fn phase_follows_fast_track_and_sticks_when_ended() {
        let mut snapshot = GameSnapshot::new(seat(2));
        snapshot.refresh_phase();
        assert_eq!(snapshot.game_phase, GamePhase::RatRace);

        snapshot.players[1].on_fast_track = true;
        snapshot.refresh_phase();
        assert_eq!(snapshot.game_phase, GamePhase::FastTrack);

        snapshot.game_phase = GamePhase::Ended;
        snapshot.refresh_phase();
        assert!(snapshot.is_over());
    }

    #[test]
    fn minimal_saved_shape_loads() {
        let json = r#"{
            "players": [{"id": "p1", "name": "Ada", "color": "red"}],
            "currentPlayerIndex": 0,
            "gamePhase": "rat_race",
            "professionDeck": []
        }"#;
        let snapshot: GameSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.players.len(), 1);
        assert!(snapshot.pending.is_none());
        assert!(snapshot.winner.is_none());
        assert_eq!(snapshot.decks.opportunity.remaining(), 0);
    }

    #[test]
    fn snapshot_uses_camel_case_keys() {
        let value = serde_json::to_value(GameSnapshot::new(seat(1))).unwrap();
        for key in ["players", "currentPlayerIndex", "gamePhase", "professionDeck"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["gamePhase"], "setup");
    }

    #[test]
    fn clearing_dice_turns_downsize_into_skips() {
        let mut snapshot = GameSnapshot::new(seat(2));
        snapshot.players[0].turn = TurnPhase::Rolled {
            dice: smallvec![6],
            skips_after: 2,
        };
        snapshot.players[1].turn = TurnPhase::Rolled {
            dice: smallvec![3],
            skips_after: 0,
        };
        snapshot.clear_all_dice();
        assert_eq!(snapshot.players[0].turn, TurnPhase::Skipping { remaining: 2 });
        assert_eq!(snapshot.players[1].turn, TurnPhase::Ready);
    }

    #[test]
    fn out_of_range_turn_index_is_reset() {
        let mut snapshot = GameSnapshot::new(seat(2));
        snapshot.current_player_index = 5;
        snapshot.clamp_turn_index();
        assert_eq!(snapshot.current_player_index, 0);
    }
}
