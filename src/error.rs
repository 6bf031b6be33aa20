//! Error types.
//!
//! Gameplay never fails: out-of-bounds coordinates and actions issued in the wrong state are silently ignored. The only real failures are invalid configuration, which is rejected when the configuration is built, and sound playback, which is logged and otherwise ignored.

use core::fmt::{self, Display, Formatter};
use std::error::Error;

/// An invalid game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// The board would have no columns or no rows.
    ZeroDimension {
        width: usize,
        height: usize,
    },
    /// The board would have more tiles than can be addressed.
    TooLarge {
        width: usize,
        height: usize,
    },
    /// The mines would not fit: a board needs room for every mine plus the 3x3 first-click exclusion zone.
    TooManyMines {
        mines: usize,
        cells: usize,
    },
    /// A difficulty tag other than `easy`, `medium` or `hard`.
    UnknownDifficulty(String),
}
impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension { width, height } => write!(f,
                "a {}x{} board has no tiles", width, height),
            Self::TooLarge { width, height } => write!(f,
                "a {}x{} board has more tiles than can be stored", width, height),
            Self::TooManyMines { mines, cells } => write!(f,
                "{} mines do not fit a board of {} tiles (at most {} leave room for the first click)",
                mines, cells, cells.saturating_sub(9)),
            Self::UnknownDifficulty(tag) => write!(f,
                "unknown difficulty {:?}, expected one of easy, medium or hard", tag),
        }
    }
}
impl Error for ConfigError {}

/// A failure reported by an [`AudioService`][audio].
///
/// [audio]: trait.AudioService.html "AudioService — plays sound cues for the game"
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AudioError {
    message: String,
}
impl AudioError {
    /// Creates an error with the given description.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
    /// Returns the description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}
impl Display for AudioError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "sound playback failed: {}", self.message)
    }
}
impl Error for AudioError {}
