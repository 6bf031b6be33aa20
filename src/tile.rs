#[cfg(feature = "serialization")]
use serde::{Serialize, Deserialize};

/// A tile on a Minesweeper board.
///
/// Tiles start out closed, unflagged and without a mine. Mines are installed exactly once per game, when the board is populated on the first click, and the number of neighboring mines is computed right afterwards. Both never change again for the lifetime of the board.
///
/// A tile is never flagged and revealed at the same time: flags can only be toggled on closed tiles, and revealing skips flagged ones.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "camelCase"))]
pub struct Tile {
    /// Whether the tile has a mine inside.
    pub is_mine: bool,
    /// Whether the tile has been opened. Once set, this never reverts.
    pub is_revealed: bool,
    /// Whether the player has put a flag on the tile.
    pub is_flagged: bool,
    /// The number of mines among the up-to-8 neighbors. Meaningless for mines.
    pub mine_count: u8,
}
impl Tile {
    /// Returns `true` if the tile hasn't been opened yet, `false` otherwise.
    #[inline]
    pub const fn is_closed(self) -> bool {
        !self.is_revealed
    }
    /// Returns `true` if clicking this tile does not end the game, `false` otherwise.
    #[inline(always)]
    pub const fn is_safe(self) -> bool {
        !self.is_mine
    }
    /// Returns `true` if this tile has to be opened in order for the game to be won, `false` otherwise.
    ///
    /// This is `true` only for closed tiles without a mine, flagged or not.
    #[inline]
    pub const fn is_required_to_open(self) -> bool {
        !self.is_mine && !self.is_revealed
    }
    /// Returns `true` if opening this tile continues a flood fill into its neighbors.
    ///
    /// Only safe tiles without any neighboring mines do so.
    #[inline]
    pub const fn is_clearing(self) -> bool {
        !self.is_mine && self.mine_count == 0
    }
    /// Returns `true` if a flag can be toggled on this tile.
    #[inline]
    pub const fn is_flaggable(self) -> bool {
        !self.is_revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tile_is_closed_and_safe() {
        let tile = Tile::default();
        assert!(tile.is_closed());
        assert!(tile.is_safe());
        assert!(!tile.is_flagged);
        assert!(tile.is_required_to_open());
        assert!(tile.is_clearing());
    }

    #[test]
    fn mines_never_need_opening() {
        let mine = Tile { is_mine: true, ..Tile::default() };
        assert!(!mine.is_required_to_open());
        assert!(!mine.is_clearing());
        assert!(!mine.is_safe());
    }

    #[test]
    fn numbered_tile_stops_the_flood() {
        let number = Tile { mine_count: 3, ..Tile::default() };
        assert!(!number.is_clearing());
        assert!(number.is_safe());
    }

    #[test]
    fn revealed_tiles_cannot_be_flagged() {
        let open = Tile { is_revealed: true, ..Tile::default() };
        assert!(!open.is_flaggable());
        assert!(!open.is_required_to_open());
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn serializes_with_camel_case_keys() {
        let tile = Tile { is_mine: false, is_revealed: true, is_flagged: false, mine_count: 2 };
        let json = serde_json::to_value(tile).unwrap();
        assert_eq!(json["isRevealed"], true);
        assert_eq!(json["mineCount"], 2);
    }
}
