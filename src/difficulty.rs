//! Difficulty presets and their validation.

use core::{
    fmt::{self, Display, Formatter},
    num::NonZeroUsize,
    str::FromStr,
};
#[cfg(feature = "serialization")]
use serde::{Serialize, Deserialize};
use crate::{BoardDimensions, ConfigError};

/// The difficulty tag a game is started with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    /// 9x9 with 10 mines by default.
    #[default]
    Easy,
    /// 16x16 with 40 mines by default.
    Medium,
    /// 30x16 with 99 mines by default.
    Hard,
}
impl Difficulty {
    /// All difficulties, from the easiest one.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Returns the lowercase tag of the difficulty.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}
impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for Difficulty {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.iter()
            .copied()
            .find(|difficulty| difficulty.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownDifficulty(s.to_owned()))
    }
}

/// The board dimensions and mine count of a game.
///
/// Setups are validated on construction: both dimensions must be non-zero and the board must have at least `mines + 9` tiles, which guarantees that the mines always fit outside the first-click exclusion zone. Invalid setups never reach a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(try_from = "RawSetup", into = "RawSetup"))]
pub struct DifficultySetup {
    dimensions: BoardDimensions,
    mines: usize,
}
impl DifficultySetup {
    /// Validates and creates a setup.
    pub fn new(width: usize, height: usize, mines: usize) -> Result<Self, ConfigError> {
        let (w, h) = match (NonZeroUsize::new(width), NonZeroUsize::new(height)) {
            (Some(w), Some(h)) => (w, h),
            _ => return Err(ConfigError::ZeroDimension { width, height }),
        };
        let cells = width.checked_mul(height)
            .ok_or(ConfigError::TooLarge { width, height })?;
        if mines.saturating_add(9) > cells {
            return Err(ConfigError::TooManyMines { mines, cells });
        }
        Ok(Self { dimensions: [w, h], mines })
    }
    /// Returns the number of columns.
    #[inline(always)]
    pub const fn width(self) -> usize {
        self.dimensions[0].get()
    }
    /// Returns the number of rows.
    #[inline(always)]
    pub const fn height(self) -> usize {
        self.dimensions[1].get()
    }
    /// Returns the width and height as board dimensions.
    #[inline(always)]
    pub const fn dimensions(self) -> BoardDimensions {
        self.dimensions
    }
    /// Returns the number of mines.
    #[inline(always)]
    pub const fn mines(self) -> usize {
        self.mines
    }
    /// Returns the number of tiles without a mine.
    #[inline(always)]
    pub const fn safe_tiles(self) -> usize {
        self.width() * self.height() - self.mines
    }
    /// Builds a setup without validation, for hand-made layouts which would not leave room for a first click.
    #[cfg(test)]
    pub(crate) const fn unchecked(dimensions: BoardDimensions, mines: usize) -> Self {
        Self { dimensions, mines }
    }
}

/// The unvalidated wire form of a [`DifficultySetup`](struct.DifficultySetup.html).
#[cfg(feature = "serialization")]
#[derive(Serialize, Deserialize)]
struct RawSetup {
    width: usize,
    height: usize,
    mines: usize,
}
#[cfg(feature = "serialization")]
impl TryFrom<RawSetup> for DifficultySetup {
    type Error = ConfigError;
    fn try_from(raw: RawSetup) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height, raw.mines)
    }
}
#[cfg(feature = "serialization")]
impl From<DifficultySetup> for RawSetup {
    fn from(setup: DifficultySetup) -> Self {
        Self { width: setup.width(), height: setup.height(), mines: setup.mines() }
    }
}

/// Maps every difficulty to its setup.
///
/// The default table holds the classic presets; individual entries can be overridden, typically to get small deterministic boards in tests.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct DifficultyTable {
    easy: DifficultySetup,
    medium: DifficultySetup,
    hard: DifficultySetup,
}
impl DifficultyTable {
    /// Returns the setup of the given difficulty.
    pub const fn get(&self, difficulty: Difficulty) -> DifficultySetup {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
    /// Replaces the setup of one difficulty.
    #[must_use]
    pub fn with_setup(mut self, difficulty: Difficulty, setup: DifficultySetup) -> Self {
        *self.slot_mut(difficulty) = setup;
        self
    }
    /// Replaces the setup of one difficulty in place.
    pub fn set(&mut self, difficulty: Difficulty, setup: DifficultySetup) {
        *self.slot_mut(difficulty) = setup;
    }
    fn slot_mut(&mut self, difficulty: Difficulty) -> &mut DifficultySetup {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }
}
impl Default for DifficultyTable {
    fn default() -> Self {
        // The presets satisfy every validation rule, so they are built directly.
        const fn preset(width: usize, height: usize, mines: usize) -> DifficultySetup {
            match (NonZeroUsize::new(width), NonZeroUsize::new(height)) {
                (Some(w), Some(h)) => DifficultySetup { dimensions: [w, h], mines },
                _ => panic!("preset with a zero dimension"),
            }
        }
        Self {
            easy: preset(9, 9, 10),
            medium: preset(16, 16, 40),
            hard: preset(30, 16, 99),
        }
    }
}
