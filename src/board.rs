//! The playing board of a Minesweeper game.
//!
//! This module owns tile storage, neighbor lookups, mine placement and the adjacency counts. Reveal propagation lives in the [`reveal`][reveal] module, which extends `Board` with the flood-fill and chord planners.
//!
//! [reveal]: ../reveal/index.html "reveal — flood-fill and chord planning"

use core::{
    ops::{Index, IndexMut},
    num::NonZeroUsize,
};
use std::collections::HashSet;
use rand::Rng;
#[cfg(feature = "serialization")]
use serde::Serialize;
use crate::{
    Tile,
    Neighbors, RowIter, BoardRowsIter,
};

/// Represents a playing board.
///
/// Boards in Minesweeper are matrices of [tiles][tile] stored in row-major order. The dimensions are fixed for the lifetime of a board: starting a new game replaces the board wholesale instead of resizing it.
///
/// [tile]: struct.Tile.html "Tile — a tile on a Minesweeper board"
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct Board {
    dimensions: BoardDimensions,
    storage: Vec<Tile>,
}
/// The dimensions of a board.
///
/// The first element specifies the width (the number of columns), while the second one specifies the height (number of rows). As required by `NonZeroUsize`, a board cannot be smaller than 1x1.
pub type BoardDimensions = [NonZeroUsize; 2];
/// The coordinates of a tile on a board.
///
/// The first element specifies the column index (X coordinate), while the second one specifies the row index (Y coordinate). The coordinate system starts from zero, i.e. `[0, 0]` is the top left corner.
pub type Coordinates = [usize; 2];

impl Board {
    /// Creates an empty board filled with closed, mine-free tiles, with the given dimensions.
    #[must_use = "this performs a memory allocation as big as the area of the board"]
    pub fn empty(dimensions: BoardDimensions) -> Self {
        let area = dimensions[0].get() * dimensions[1].get();
        Self {
            storage: vec![Tile::default(); area],
            dimensions,
        }
    }
    /// Creates a board with the specified dimensions from the specified `Vec` of tiles, given in row-major order.
    ///
    /// Returns `None` if the amount of tiles does not match the area.
    #[must_use]
    pub fn from_dimensions_and_storage(dimensions: BoardDimensions, storage: Vec<Tile>) -> Option<Self> {
        let area = dimensions[0].get() * dimensions[1].get();
        if storage.len() == area {
            Some(Self { dimensions, storage })
        } else {
            None
        }
    }

    /// Returns the width and height of the board.
    #[inline(always)]
    pub const fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }
    /// Returns the number of columns.
    #[inline(always)]
    pub const fn width(&self) -> usize {
        self.dimensions[0].get()
    }
    /// Returns the number of rows.
    #[inline(always)]
    pub const fn height(&self) -> usize {
        self.dimensions[1].get()
    }
    /// Returns the total number of tiles.
    #[inline(always)]
    pub const fn area(&self) -> usize {
        self.width() * self.height()
    }
    /// Returns `true` if the coordinates point inside the board.
    #[inline(always)]
    pub const fn contains(&self, coordinates: Coordinates) -> bool {
        coordinates[0] < self.width() && coordinates[1] < self.height()
    }

    #[inline(always)]
    fn flat_index(&self, coordinates: Coordinates) -> Option<usize> {
        if self.contains(coordinates) {
            Some(coordinates[0] + coordinates[1] * self.width())
        } else {
            None
        }
    }
    /// Returns the tile at the column `coordinates[0]` and row `coordinates[1]`, both starting at zero, or `None` if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, coordinates: Coordinates) -> Option<&Tile> {
        let index = self.flat_index(coordinates)?;
        self.storage.get(index)
    }
    /// Returns a mutable reference to the tile at the given coordinates, or `None` if the coordinates are out of bounds.
    #[inline]
    pub fn get_mut(&mut self, coordinates: Coordinates) -> Option<&mut Tile> {
        let index = self.flat_index(coordinates)?;
        self.storage.get_mut(index)
    }
    /// Returns all tiles in row-major order.
    #[inline(always)]
    pub fn tiles(&self) -> &[Tile] {
        &self.storage
    }
    #[inline(always)]
    pub(crate) fn storage_mut(&mut self) -> &mut [Tile] {
        &mut self.storage
    }
    /// Iterates over every coordinate pair of the board in row-major order, together with the tile found there.
    pub fn enumerate(&self) -> impl Iterator<Item = (Coordinates, &Tile)> + '_ {
        let width = self.width();
        self.storage.iter()
            .enumerate()
            .map(move |(i, tile)| ([i % width, i / width], tile))
    }

    /// Returns an iterator over the coordinates of the up-to-8 tiles surrounding a spot.
    #[inline(always)]
    pub const fn neighbors(&self, coordinates: Coordinates) -> Neighbors {
        Neighbors::new(self.dimensions, coordinates)
    }
    /// Detects whether a location is a mine, or `None` if it's out of bounds.
    #[inline]
    pub fn is_mine(&self, coordinates: Coordinates) -> Option<bool> {
        self.get(coordinates).map(|tile| tile.is_mine)
    }
    /// Counts all neighboring mines around a spot.
    ///
    /// All directly and diagonally adjacent mines are considered neighboring. If the tile is a mine, the tile itself isn't counted.
    #[must_use]
    pub fn count_neighboring_mines(&self, coordinates: Coordinates) -> u8 {
        let count = self.neighbors(coordinates)
            .filter(|&spot| self.is_mine(spot) == Some(true))
            .count();
        // At most 8 neighbors.
        count as u8
    }
    /// Counts the flags placed around a spot.
    #[must_use]
    pub fn count_neighboring_flags(&self, coordinates: Coordinates) -> usize {
        self.neighbors(coordinates)
            .filter(|&spot| self.get(spot).map_or(false, |tile| tile.is_flagged))
            .count()
    }

    /// Returns the spots which can never receive a mine when the first click lands on `first_click`: the 3x3 neighborhood around it, clipped to the board.
    pub fn exclusion_zone(&self, first_click: Coordinates) -> HashSet<Coordinates> {
        let mut zone: HashSet<Coordinates> = self.neighbors(first_click).collect();
        if self.contains(first_click) {
            zone.insert(first_click);
        }
        zone
    }
    /// Installs `mines` mines at uniformly random spots outside the [exclusion zone][zone] of `first_click`, then computes the adjacency counts.
    ///
    /// Spots are sampled repeatedly and accepted only if they neither hold a mine yet nor belong to the exclusion zone, until exactly `mines` mines are placed.
    ///
    /// # Preconditions
    /// The board must be freshly created, and it must have at least `mines + 9` tiles, so that enough spots remain outside of any exclusion zone. [`DifficultySetup`][setup] upholds this for every preset; violating it on a hand-made board makes the sampling loop spin forever.
    ///
    /// [zone]: #method.exclusion_zone "exclusion_zone — the spots around the first click which stay mine-free"
    /// [setup]: struct.DifficultySetup.html "DifficultySetup — validated board dimensions and mine count"
    pub fn populate<R: Rng + ?Sized>(&mut self, rng: &mut R, mines: usize, first_click: Coordinates) {
        debug_assert!(mines + 9 <= self.area(), "{} mines do not fit a board of {} tiles", mines, self.area());
        let zone = self.exclusion_zone(first_click);
        let (width, area) = (self.width(), self.area());

        let mut placed = 0_usize;
        while placed < mines {
            let rnum: usize = rng.gen_range(0..area);
            let location = [rnum % width, rnum / width];
            if zone.contains(&location) {
                continue;
            }
            let tile = &mut self.storage[rnum];
            if tile.is_mine {
                continue;
            }
            tile.is_mine = true;
            placed += 1;
        }
        log::debug!("placed {} mines around the first click at {:?}", placed, first_click);
        self.compute_mine_counts();
    }
    /// Installs mines at exactly the given spots, then computes the adjacency counts. Out-of-bounds spots are ignored.
    ///
    /// Useful for fixed layouts, such as puzzles or reproducible scenarios.
    pub fn place_mines_at(&mut self, spots: &[Coordinates]) {
        for &spot in spots {
            if let Some(tile) = self.get_mut(spot) {
                tile.is_mine = true;
            }
        }
        self.compute_mine_counts();
    }
    /// Computes, for every non-mine tile, the number of mines among its neighbors.
    pub fn compute_mine_counts(&mut self) {
        let width = self.width();
        for i in 0..self.storage.len() {
            if self.storage[i].is_mine {
                continue;
            }
            let count = self.count_neighboring_mines([i % width, i / width]);
            self.storage[i].mine_count = count;
        }
    }

    /// Returns the amount of tiles holding a mine.
    #[must_use = "traversing the entire board is expensive"]
    pub fn mine_count(&self) -> usize {
        self.storage.iter().filter(|tile| tile.is_mine).count()
    }
    /// Returns the amount of flagged tiles.
    #[must_use = "traversing the entire board is expensive"]
    pub fn flag_count(&self) -> usize {
        self.storage.iter().filter(|tile| tile.is_flagged).count()
    }
    /// Returns the amount of tiles which have been already opened.
    #[must_use = "traversing the entire board is expensive"]
    pub fn count_open_tiles(&self) -> usize {
        self.storage.iter().filter(|tile| tile.is_revealed).count()
    }
    /// Returns the amount of opened tiles without a mine inside.
    #[must_use = "traversing the entire board is expensive"]
    pub fn revealed_safe_count(&self) -> usize {
        self.storage.iter().filter(|tile| tile.is_revealed && !tile.is_mine).count()
    }
    /// Returns the amount of tiles which the player needs to open in order to win the game.
    ///
    /// This does not include already opened tiles.
    #[must_use = "traversing the entire board is expensive"]
    pub fn tiles_to_open(&self) -> usize {
        self.storage.iter().filter(|tile| tile.is_required_to_open()).count()
    }
    /// Returns `true` if every safe tile has been opened (game win condition), `false` otherwise.
    #[must_use = "traversing the entire board is expensive"]
    pub fn solved(&self) -> bool {
        self.tiles_to_open() == 0
    }

    /// Returns an iterator over a single row.
    ///
    /// Said iterator can then also be indexed, thus serving as a versatile reference to a specific row.
    #[inline(always)]
    pub fn row(&self, row: usize) -> RowIter<'_> {
        RowIter::new(self, row)
    }
    /// Returns an iterator over the board's rows, top to bottom.
    #[inline(always)]
    pub fn rows(&self) -> BoardRowsIter<'_> {
        BoardRowsIter::new(self)
    }
}
impl Index<Coordinates> for Board {
    type Output = Tile;
    /// Returns the tile at the column `coordinates[0]` and row `coordinates[1]`, both starting at zero.
    ///
    /// # Panics
    /// Index checking is enabled for this method. For a version which returns an `Option` instead of panicking if the index is out of bounds, see `get`.
    #[inline(always)]
    fn index(&self, coordinates: Coordinates) -> &Self::Output {
        self.get(coordinates).expect("index out of bounds")
    }
}
impl IndexMut<Coordinates> for Board {
    /// Returns the tile at the column `coordinates[0]` and row `coordinates[1]`, both starting at zero.
    ///
    /// # Panics
    /// Index checking is enabled for this method. For a version which returns an `Option` instead of panicking if the index is out of bounds, see `get_mut`.
    #[inline(always)]
    fn index_mut(&mut self, coordinates: Coordinates) -> &mut Self::Output {
        self.get_mut(coordinates).expect("index out of bounds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn board(width: usize, height: usize) -> Board {
        Board::empty([NonZeroUsize::new(width).unwrap(), NonZeroUsize::new(height).unwrap()])
    }

    #[test]
    fn out_of_bounds_lookups_return_none() {
        let mut b = board(9, 9);
        assert!(b.get([8, 8]).is_some());
        assert!(b.get([9, 0]).is_none());
        assert!(b.get([0, 9]).is_none());
        assert!(b.get_mut([usize::MAX, 0]).is_none());
        assert_eq!(b.is_mine([10, 10]), None);
    }

    #[test]
    fn storage_is_row_major() {
        let mut b = board(4, 3);
        b[[1, 2]].is_flagged = true;
        assert!(b.tiles()[2 * 4 + 1].is_flagged);
        let (spot, _) = b.enumerate().find(|(_, tile)| tile.is_flagged).unwrap();
        assert_eq!(spot, [1, 2]);
    }

    #[test]
    fn storage_length_must_match_area() {
        let dims = [NonZeroUsize::new(2).unwrap(), NonZeroUsize::new(2).unwrap()];
        assert!(Board::from_dimensions_and_storage(dims, vec![Tile::default(); 4]).is_some());
        assert!(Board::from_dimensions_and_storage(dims, vec![Tile::default(); 3]).is_none());
    }

    #[test]
    fn exclusion_zone_is_clipped() {
        let b = board(9, 9);
        assert_eq!(b.exclusion_zone([4, 4]).len(), 9);
        assert_eq!(b.exclusion_zone([0, 0]).len(), 4);
        assert_eq!(b.exclusion_zone([0, 4]).len(), 6);
    }

    #[test]
    fn populate_places_exact_count_outside_the_zone() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut b = board(9, 9);
            b.populate(&mut rng, 10, [4, 4]);
            assert_eq!(b.mine_count(), 10);
            for x in 3..=5 {
                for y in 3..=5 {
                    assert!(!b[[x, y]].is_mine, "seed {}: mine at ({}, {})", seed, x, y);
                }
            }
        }
    }

    #[test]
    fn populate_fills_every_usable_spot_when_tight() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut b = board(4, 4);
        // 16 tiles, 9 excluded around (1, 1): all 7 remaining spots become mines.
        b.populate(&mut rng, 7, [1, 1]);
        assert_eq!(b.mine_count(), 7);
        assert!(b.exclusion_zone([1, 1]).iter().all(|&spot| !b[spot].is_mine));
    }

    #[test]
    fn mine_counts_are_symmetric() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut b = board(16, 16);
        b.populate(&mut rng, 40, [0, 0]);

        let sum: usize = b.tiles().iter()
            .filter(|tile| !tile.is_mine)
            .map(|tile| usize::from(tile.mine_count))
            .sum();
        let pairs: usize = b.enumerate()
            .filter(|(_, tile)| tile.is_mine)
            .map(|(spot, _)| b.neighbors(spot).filter(|&n| !b[n].is_mine).count())
            .sum();
        assert_eq!(sum, pairs);
    }

    #[test]
    fn fixed_layout_counts() {
        let mut b = board(3, 3);
        b.place_mines_at(&[[0, 0], [2, 2]]);
        assert_eq!(b[[1, 1]].mine_count, 2);
        assert_eq!(b[[1, 0]].mine_count, 1);
        assert_eq!(b[[2, 0]].mine_count, 0);
        assert_eq!(b[[0, 2]].mine_count, 0);
        assert_eq!(b.mine_count(), 2);
    }

    #[test]
    fn counters_follow_tile_state() {
        let mut b = board(3, 3);
        b.place_mines_at(&[[0, 0]]);
        assert_eq!(b.tiles_to_open(), 8);
        b[[1, 1]].is_revealed = true;
        b[[2, 2]].is_flagged = true;
        assert_eq!(b.count_open_tiles(), 1);
        assert_eq!(b.flag_count(), 1);
        assert_eq!(b.tiles_to_open(), 7);
        assert_eq!(b.count_neighboring_flags([1, 1]), 1);
        assert!(!b.solved());
        b[[0, 0]].is_revealed = true;
        assert_eq!(b.count_open_tiles(), 2);
        assert_eq!(b.revealed_safe_count(), 1);
    }
}
