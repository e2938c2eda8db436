//! Game phase state machine
//!
//! ```text
//!   Menu --start--> Playing --fatal--> GameOver --restart--> Playing (respawn)
//!                      |
//!                      +--finish--> Won --restart--> Playing (new map)
//! ```
//!
//! Anything not drawn above is a no-op.

use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Player died; restart respawns at the last checkpoint
    GameOver,
    /// Finish reached; restart begins a fresh run
    Won,
}

/// Discrete actions that can move the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseAction {
    Start,
    Restart,
    /// Fatal collision or fell out of the level
    Died,
    ReachedFinish,
}

/// What the caller must do to the world when a transition fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// New map, score zeroed
    FullReset,
    /// Back to the last checkpoint, map and score kept
    Respawn,
    /// Phase changed, world untouched
    Enter,
}

impl GamePhase {
    /// Next phase and the reset it requires, or `None` if `action` is not
    /// legal here
    pub fn apply(self, action: PhaseAction) -> Option<(GamePhase, Transition)> {
        use GamePhase::*;
        use PhaseAction::*;
        match (self, action) {
            (Menu, Start) => Some((Playing, Transition::FullReset)),
            (Playing, Died) => Some((GameOver, Transition::Enter)),
            (Playing, ReachedFinish) => Some((Won, Transition::Enter)),
            (GameOver, Restart) => Some((Playing, Transition::Respawn)),
            (Won, Restart) => Some((Playing, Transition::FullReset)),
            _ => None,
        }
    }

    pub fn is_playing(self) -> bool {
        self == GamePhase::Playing
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert_eq!(
            GamePhase::Menu.apply(PhaseAction::Start),
            Some((GamePhase::Playing, Transition::FullReset))
        );
        assert_eq!(
            GamePhase::Playing.apply(PhaseAction::Died),
            Some((GamePhase::GameOver, Transition::Enter))
        );
        assert_eq!(
            GamePhase::Playing.apply(PhaseAction::ReachedFinish),
            Some((GamePhase::Won, Transition::Enter))
        );
        assert_eq!(
            GamePhase::GameOver.apply(PhaseAction::Restart),
            Some((GamePhase::Playing, Transition::Respawn))
        );
        assert_eq!(
            GamePhase::Won.apply(PhaseAction::Restart),
            Some((GamePhase::Playing, Transition::FullReset))
        );
    }

    #[test]
    fn test_everything_else_is_a_no_op() {
        let phases = [
            GamePhase::Menu,
            GamePhase::Playing,
            GamePhase::GameOver,
            GamePhase::Won,
        ];
        let actions = [
            PhaseAction::Start,
            PhaseAction::Restart,
            PhaseAction::Died,
            PhaseAction::ReachedFinish,
        ];
        let legal = phases
            .iter()
            .flat_map(|p| actions.iter().map(move |a| (*p, *a)))
            .filter(|(p, a)| p.apply(*a).is_some())
            .count();
        assert_eq!(legal, 5);

        assert_eq!(GamePhase::Playing.apply(PhaseAction::Restart), None);
        assert_eq!(GamePhase::Won.apply(PhaseAction::Died), None);
        assert_eq!(GamePhase::GameOver.apply(PhaseAction::ReachedFinish), None);
        assert_eq!(GamePhase::Menu.apply(PhaseAction::Restart), None);
    }

    #[test]
    fn test_phase_helpers() {
        assert!(GamePhase::Playing.is_playing());
        assert!(GamePhase::Won.is_terminal());
        assert!(!GamePhase::Menu.is_terminal());
    }
}
