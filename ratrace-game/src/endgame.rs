//! Terminal-condition rules evaluated after every action.
use crate::config::EndgameRuleKind;
use crate::events::TurnEvent;
use crate::player::PlayerStatus;
use crate::state::{GamePhase, GameSnapshot};

/// Hook deciding whether the game is over.
///
/// Called with the post-action snapshot; may mark players and end the game.
pub trait EndgameRule {
    fn name(&self) -> &'static str;

    /// Apply the rule, returning any events it produced.
    fn evaluate(&self, snapshot: &mut GameSnapshot) -> Vec<TurnEvent>;
}

/// Never ends the game.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEndgame;

impl EndgameRule for NoEndgame {
    fn name(&self) -> &'static str {
        "none"
    }

    fn evaluate(&self, _snapshot: &mut GameSnapshot) -> Vec<TurnEvent> {
        Vec::new()
    }
}

/// The first player to reach the Fast Track wins outright.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastTrackVictory;

impl EndgameRule for FastTrackVictory {
    fn name(&self) -> &'static str {
        "fast_track_victory"
    }

    fn evaluate(&self, snapshot: &mut GameSnapshot) -> Vec<TurnEvent> {
        if snapshot.is_over() {
            return Vec::new();
        }
        let Some(player) = snapshot.players.iter_mut().find(|p| p.on_fast_track) else {
            return Vec::new();
        };
        player.status = PlayerStatus::Won;
        let winner = player.id.clone();
        let name = player.name.clone();
        log::debug!("{name} reached the Fast Track; game over");
        snapshot.winner = Some(winner);
        snapshot.game_phase = GamePhase::Ended;
        vec![TurnEvent::PlayerWon { player: name }]
    }
}

/// Instantiate the rule selected in configuration.
#[must_use]
pub fn rule_for(kind: EndgameRuleKind) -> Box<dyn EndgameRule> {
    match kind {
        EndgameRuleKind::None => Box::new(NoEndgame),
        EndgameRuleKind::FastTrackVictory => Box::new(FastTrackVictory),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;

    fn table() -> GameSnapshot {
        let mut snapshot = GameSnapshot::new(vec![
            Player::new("a", "Ada", "red"),
            Player::new("b", "Bo", "blue"),
        ]);
        snapshot.game_phase = GamePhase::RatRace;
        snapshot
    }

    #[test]
    fn no_endgame_never_fires() {
        let mut snapshot = table();
        snapshot.players[0].on_fast_track = true;
        assert!(NoEndgame.evaluate(&mut snapshot).is_empty());
        assert!(snapshot.winner.is_none());
        assert_eq!(snapshot.players[0].status, PlayerStatus::Active);
    }

    #[test]
    fn fast_track_victory_crowns_first_escapee() {
        let mut snapshot = table();
        assert!(FastTrackVictory.evaluate(&mut snapshot).is_empty());

        snapshot.players[1].on_fast_track = true;
        let events = FastTrackVictory.evaluate(&mut snapshot);
        assert_eq!(
            events,
            vec![TurnEvent::PlayerWon {
                player: "Bo".into()
            }]
        );
        assert_eq!(snapshot.winner, Some("b".into()));
        assert_eq!(snapshot.players[1].status, PlayerStatus::Won);
        assert!(snapshot.is_over());

        // Ended is terminal; a second escapee changes nothing.
        snapshot.players[0].on_fast_track = true;
        assert!(FastTrackVictory.evaluate(&mut snapshot).is_empty());
        assert_eq!(snapshot.players[0].status, PlayerStatus::Active);
    }

    #[test]
    fn rule_for_maps_config_kind() {
        assert_eq!(rule_for(EndgameRuleKind::None).name(), "none");
        assert_eq!(
            rule_for(EndgameRuleKind::FastTrackVictory).name(),
            "fast_track_victory"
        );
    }
}
