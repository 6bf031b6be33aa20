//! Iterators useful for traversing a board.
//!
//! Currently available:
//! - [`Neighbors`][neighbors] — iterates over the coordinates of the up-to-8 tiles surrounding a spot
//! - [`RowIter`][rowiter] — iterates over a single board row
//! - [`BoardRowsIter`][bri] — iterates over the rows of a board (each item is a [`RowIter`][rowiter])
//!
//! [neighbors]: struct.Neighbors.html "Neighbors — iterates over the tiles surrounding a spot"
//! [rowiter]: struct.RowIter.html "RowIter — iterates over a single board row"
//! [bri]: struct.BoardRowsIter.html "BoardRowsIter — an iterator over the rows of a board"

use core::{
    ops::{Range, Index},
    iter::FusedIterator,
};
use crate::{Board, BoardDimensions, Coordinates, Tile};

/// The directly and diagonally adjacent offsets, in clockwise order starting from top-left: ↖, ↑, ↗, →, ↘, ↓, ↙, ←.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (1, 0),
    (1, 1), (0, 1), (-1, 1),
    (-1, 0),
];

/// Iterates over the coordinates of the tiles surrounding a spot.
///
/// Neighbors are 8-connected and clipped at the board edges, so a corner has 3 of them, an edge tile 5 and any other tile 8. The spot itself is never yielded.
///
/// # Usage
/// ```
/// # use sweeper_engine::Neighbors;
/// # use core::num::NonZeroUsize;
/// let dimensions = [NonZeroUsize::new(9).unwrap(), NonZeroUsize::new(9).unwrap()];
/// assert_eq!(Neighbors::new(dimensions, [0, 0]).count(), 3);
/// assert_eq!(Neighbors::new(dimensions, [4, 0]).count(), 5);
/// assert_eq!(Neighbors::new(dimensions, [4, 4]).count(), 8);
/// ```
#[derive(Clone, Debug)]
pub struct Neighbors {
    dimensions: BoardDimensions,
    center: Coordinates,
    offset: usize,
}
impl Neighbors {
    /// Creates an iterator over the neighbors of `center` on a board with the given dimensions.
    #[inline(always)]
    pub const fn new(dimensions: BoardDimensions, center: Coordinates) -> Self {
        Self { dimensions, center, offset: 0 }
    }
    /// Returns the spot whose neighbors are being iterated over.
    #[inline(always)]
    pub const fn center(&self) -> Coordinates {
        self.center
    }
}
impl Iterator for Neighbors {
    type Item = Coordinates;
    fn next(&mut self) -> Option<Self::Item> {
        let (width, height) = (self.dimensions[0].get(), self.dimensions[1].get());
        while let Some(&(dx, dy)) = OFFSETS.get(self.offset) {
            self.offset += 1;
            let x = self.center[0].checked_add_signed(dx);
            let y = self.center[1].checked_add_signed(dy);
            if let (Some(x), Some(y)) = (x, y) {
                if x < width && y < height {
                    return Some([x, y]);
                }
            }
        }
        None
    }
    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(OFFSETS.len() - self.offset.min(OFFSETS.len())))
    }
}
impl FusedIterator for Neighbors {}

/// Iterates over a single board row.
///
/// Can also be indexed to pull arbitrary tiles from the row, regardless of the iterator state.
#[derive(Clone)]
pub struct RowIter<'b> {
    board: &'b Board,
    row: usize,
    index: Range<usize>,
}
impl<'b> RowIter<'b> {
    /// Creates an iterator over the specified row of the specified board.
    #[inline(always)]
    pub fn new(board: &'b Board, row: usize) -> Self {
        Self { board, row, index: 0..board.width() }
    }
    /// Returns the tile at the specified column, or `None` if such a column doesn't exist. The row for which the iterator was created is used.
    #[inline(always)]
    pub fn get(&self, column: usize) -> Option<Tile> {
        self.board.get([column, self.row]).copied()
    }
    /// Returns the index of the row this iterator walks.
    #[inline(always)]
    pub const fn row(&self) -> usize {
        self.row
    }
    /// Returns the board which the iterator iterates over.
    #[inline(always)]
    pub const fn board(&self) -> &'b Board {
        self.board
    }
}
impl Iterator for RowIter<'_> {
    type Item = Tile;
    fn next(&mut self) -> Option<Self::Item> {
        if self.index.is_empty() {
            return None;
        }
        let el = self.board.get([self.index.start, self.row]);
        self.index.start += 1;
        el.copied()
    }
    /// Returns the remaining amount of tiles to iterate upon.
    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}
impl DoubleEndedIterator for RowIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index.is_empty() {
            return None;
        }
        self.index.end -= 1;
        self.board.get([self.index.end, self.row]).copied()
    }
}
impl ExactSizeIterator for RowIter<'_> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.index.end - self.index.start
    }
}
impl FusedIterator for RowIter<'_> {}
impl Index<usize> for RowIter<'_> {
    type Output = Tile;
    /// Returns the tile at the specified column.
    ///
    /// # Panics
    /// Panics if the column is out of bounds.
    #[inline(always)]
    fn index(&self, column: usize) -> &Tile {
        &self.board[[column, self.row]]
    }
}

/// An iterator over the rows of a board.
///
/// Each item is a [`RowIter`][rowiter], from the top row to the bottom one.
///
/// [rowiter]: struct.RowIter.html "RowIter — iterates over a single board row"
#[derive(Clone)]
pub struct BoardRowsIter<'b> {
    board: &'b Board,
    index: Range<usize>,
}
impl<'b> BoardRowsIter<'b> {
    /// Creates an iterator over the rows of the specified board.
    #[inline(always)]
    pub fn new(board: &'b Board) -> Self {
        Self { board, index: 0..board.height() }
    }
}
impl<'b> Iterator for BoardRowsIter<'b> {
    type Item = RowIter<'b>;
    fn next(&mut self) -> Option<Self::Item> {
        let row = self.index.next()?;
        Some(RowIter::new(self.board, row))
    }
    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.index.size_hint()
    }
}
impl DoubleEndedIterator for BoardRowsIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let row = self.index.next_back()?;
        Some(RowIter::new(self.board, row))
    }
}
impl ExactSizeIterator for BoardRowsIter<'_> {}
impl FusedIterator for BoardRowsIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use core::num::NonZeroUsize;

    fn dims(width: usize, height: usize) -> BoardDimensions {
        [NonZeroUsize::new(width).unwrap(), NonZeroUsize::new(height).unwrap()]
    }

    #[test]
    fn center_has_eight_neighbors() {
        let neighbors: Vec<_> = Neighbors::new(dims(9, 9), [4, 4]).collect();
        assert_eq!(neighbors.len(), 8);
        for expected in [
            [3, 3], [4, 3], [5, 3],
            [3, 4],         [5, 4],
            [3, 5], [4, 5], [5, 5],
        ] {
            assert!(neighbors.contains(&expected), "missing neighbor {:?}", expected);
        }
        assert!(!neighbors.contains(&[4, 4]));
    }

    #[test]
    fn corners_are_clipped() {
        let top_left: Vec<_> = Neighbors::new(dims(9, 9), [0, 0]).collect();
        assert_eq!(top_left.len(), 3);
        assert!(top_left.contains(&[1, 0]));
        assert!(top_left.contains(&[0, 1]));
        assert!(top_left.contains(&[1, 1]));

        let bottom_right: Vec<_> = Neighbors::new(dims(9, 9), [8, 8]).collect();
        assert_eq!(bottom_right.len(), 3);
        assert!(bottom_right.contains(&[7, 7]));
    }

    #[test]
    fn single_tile_board_has_no_neighbors() {
        assert_eq!(Neighbors::new(dims(1, 1), [0, 0]).count(), 0);
    }

    #[test]
    fn rows_walk_top_to_bottom() {
        let mut board = Board::empty(dims(3, 2));
        board[[2, 1]].is_flagged = true;
        let rows: Vec<Vec<Tile>> = board.rows().map(Iterator::collect).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert!(rows[1][2].is_flagged);
        assert!(!rows[0][2].is_flagged);
    }

    #[test]
    fn row_iter_is_double_ended_and_indexable() {
        let mut board = Board::empty(dims(4, 1));
        board[[0, 0]].mine_count = 1;
        board[[3, 0]].mine_count = 4;
        let mut row = board.row(0);
        assert_eq!(row[3].mine_count, 4);
        assert_eq!(row.next_back().map(|t| t.mine_count), Some(4));
        assert_eq!(row.next().map(|t| t.mine_count), Some(1));
        assert_eq!(row.len(), 2);
    }
}
