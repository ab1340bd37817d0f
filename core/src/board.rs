use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;

use crate::*;

/// Rectangular grid of [`Cell`]s, stored row-major and addressed by `(x, y)`.
///
/// The shape is fixed once the board exists.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// All-safe, all-hidden board of the given `(columns, rows)` size.
    pub fn empty(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        Ok(Self {
            cells: Array2::default(size.to_nd_index()),
        })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::empty(size)?;
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board.place_mine(coords);
        }
        Ok(board)
    }

    /// Rebuilds a board from row-major cell rows, checking them against the declared size.
    pub fn from_rows(size: Coord2, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let (columns, row_count) = size;
        if columns == 0 || row_count == 0 {
            return Err(GameError::InvalidSize);
        }
        if rows.len() != usize::from(row_count)
            || rows.iter().any(|row| row.len() != usize::from(columns))
        {
            return Err(GameError::InvalidBoardShape);
        }

        let flat: Vec<Cell> = rows.into_iter().flatten().collect();
        let cells = Array2::from_shape_vec(size.to_nd_index(), flat)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { cells })
    }

    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.cells.dim();
        (columns as Coord, rows as Coord)
    }

    pub fn columns(&self) -> Coord {
        self.size().0
    }

    pub fn rows(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (columns, rows) = self.size();
        mult(columns, rows)
    }

    pub fn mine_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_mine).count() as CellCount
    }

    pub fn flag_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_flagged).count() as CellCount
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        let (columns, rows) = self.size();
        x < columns && y < rows
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.contains(coords).then(|| self[coords])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Every cell with its coordinates, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((y, x), &cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos].is_mine).count() as u8
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos].is_flagged).count() as u8
    }

    /// All mines flagged and every safe cell revealed.
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|cell| {
            if cell.is_mine {
                cell.is_flagged
            } else {
                cell.is_revealed
            }
        })
    }

    /// Checks the per-cell invariants a generated board always satisfies, ignoring the counts
    /// stored on mines.
    pub fn check_consistency(&self) -> Result<()> {
        for (coords, cell) in self.iter_cells() {
            if cell.is_revealed && cell.is_flagged {
                return Err(GameError::RevealedAndFlagged);
            }
            // mine counts are never read
            if !cell.is_mine && cell.adjacent_mines != self.count_adjacent_mines(coords) {
                return Err(GameError::InconsistentAdjacency);
            }
        }
        Ok(())
    }

    /// Turns `coords` into a mine and bumps its neighbors, returns false if it already was one.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        if self[coords].is_mine {
            return false;
        }
        self[coords].is_mine = true;
        for pos in self.iter_neighbors(coords) {
            self[pos].adjacent_mines += 1;
        }
        true
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
