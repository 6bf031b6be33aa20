#[cfg(feature = "serialization")]
use serde::{Serialize, Deserialize};

/// The phase a game is in.
///
/// ```text
/// Start --first reveal--> Playing --mine revealed--> Lose
///                                 --last safe tile--> Win
/// ```
///
/// Resetting or changing the difficulty brings any state back to `Start`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "lowercase"))]
pub enum GameState {
    /// No mines are placed yet; the board waits for the first click.
    #[default]
    Start,
    /// Mines are placed and the clock is running.
    Playing,
    /// Every safe tile has been opened.
    Win,
    /// A mine has been opened.
    Lose,
}
impl GameState {
    /// Returns `true` for `Win` and `Lose`, after which the board accepts no more moves.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Win | Self::Lose)
    }
    /// Returns `true` while flags can be toggled.
    #[inline]
    pub const fn accepts_flags(self) -> bool {
        matches!(self, Self::Playing)
    }
    /// Returns `true` while tiles can be revealed.
    #[inline]
    pub const fn accepts_reveals(self) -> bool {
        matches!(self, Self::Start | Self::Playing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_accept_nothing() {
        for state in [GameState::Win, GameState::Lose] {
            assert!(state.is_terminal());
            assert!(!state.accepts_flags());
            assert!(!state.accepts_reveals());
        }
        assert!(GameState::Start.accepts_reveals());
        assert!(!GameState::Start.accepts_flags());
        assert!(GameState::Playing.accepts_flags());
        assert_eq!(GameState::default(), GameState::Start);
    }
}
