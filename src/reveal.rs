//! Reveal propagation: flood fill and chording.
//!
//! Revealing happens in two steps. Planning walks the board without touching it and collects the spots which are about to open; committing then flips them all at once. This keeps every player action a single batch of tile mutations.

use std::collections::HashSet;
use crate::{Board, Coordinates};

/// The result of committing a batch of reveals.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RevealOutcome {
    /// The number of safe tiles which were opened by this batch.
    pub newly_revealed: usize,
    /// Whether any opened tile had a mine inside.
    pub hit_mine: bool,
}
impl RevealOutcome {
    /// Returns `true` if the batch did not change the board.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.newly_revealed == 0 && !self.hit_mine
    }
}

impl Board {
    /// Collects the spots opened by a flood fill starting at each of the `seeds`.
    ///
    /// Every candidate is visited at most once. Closed and unflagged candidates are collected; only safe tiles without neighboring mines expand the flood into their neighbors, while numbers and mines are collected but stop it. Seeds which are out of bounds, already open or flagged contribute nothing.
    ///
    /// The result is the same whatever order the spots are visited in, so it is returned in discovery order.
    pub fn flood_from<I>(&self, seeds: I) -> Vec<Coordinates>
    where I: IntoIterator<Item = Coordinates> {
        let mut visited = HashSet::<Coordinates>::new();
        let mut pending = Vec::new();
        let mut stack: Vec<Coordinates> = seeds.into_iter().collect();

        while let Some(spot) = stack.pop() {
            if !visited.insert(spot) {
                continue;
            }
            let tile = match self.get(spot) {
                Some(tile) => *tile,
                None => continue,
            };
            if tile.is_revealed || tile.is_flagged {
                continue;
            }
            pending.push(spot);
            if tile.is_clearing() {
                stack.extend(self.neighbors(spot).filter(|n| !visited.contains(n)));
            }
        }
        pending
    }
    /// Returns the flood seeds of a chord on the open tile at `coordinates`, or `None` if the chord is not allowed.
    ///
    /// Chord operations in Minesweeper are convenience operations ran on number tiles. If the number of flags around a tile is exactly equal to its number, all other closed tiles around it can be opened, causing a loss if the flags were placed incorrectly. The seeds are exactly those closed, unflagged neighbors.
    pub fn chord_seeds(&self, coordinates: Coordinates) -> Option<Vec<Coordinates>> {
        let tile = self.get(coordinates)?;
        if !tile.is_revealed || tile.is_mine {
            return None;
        }
        let (flagged, unflagged): (Vec<Coordinates>, Vec<Coordinates>) = self.neighbors(coordinates)
            .filter(|&n| !self[n].is_revealed)
            .partition(|&n| self[n].is_flagged);
        if flagged.len() != usize::from(tile.mine_count) {
            return None; // We can't chord without enough flags or with too many.
        }
        Some(unflagged)
    }
    /// Opens every given spot which is still closed and unflagged.
    pub fn reveal_all(&mut self, spots: &[Coordinates]) -> RevealOutcome {
        let mut outcome = RevealOutcome::default();
        for &spot in spots {
            let tile = match self.get_mut(spot) {
                Some(tile) => tile,
                None => continue,
            };
            if tile.is_revealed || tile.is_flagged {
                continue;
            }
            tile.is_revealed = true;
            if tile.is_mine {
                outcome.hit_mine = true;
            } else {
                outcome.newly_revealed += 1;
            }
        }
        outcome
    }
    /// Opens every mine on the board, flagged or not, so the player can inspect the layout after a loss.
    ///
    /// Flags on mines are removed so that no tile ends up both flagged and revealed. Returns the number of mines which were opened by this call.
    pub fn reveal_mines(&mut self) -> usize {
        let mut opened = 0;
        for tile in self.storage_mut().iter_mut().filter(|tile| tile.is_mine && !tile.is_revealed) {
            tile.is_flagged = false;
            tile.is_revealed = true;
            opened += 1;
        }
        opened
    }
}
