//! Board substrate: a fixed 8x8 array of optional pieces.
//!
//! The grid enforces only "one occupant per square" and bounds checking.
//! Placing a piece records its square in `Piece::position`, removing it clears
//! that field, so the cell and the piece always agree.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::*;
use crate::game_state::piece::Piece;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Option<Piece>; BOARD_COLUMNS as usize]; BOARD_ROWS as usize],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Grid {
            cells: [[None; BOARD_COLUMNS as usize]; BOARD_ROWS as usize],
        }
    }

    #[inline]
    pub fn rows(&self) -> u8 {
        BOARD_ROWS
    }

    #[inline]
    pub fn columns(&self) -> u8 {
        BOARD_COLUMNS
    }

    /// Pure bounds predicate over signed coordinates.
    #[inline]
    pub fn in_bounds(&self, row: i16, column: i16) -> bool {
        (0..self.rows() as i16).contains(&row) && (0..self.columns() as i16).contains(&column)
    }

    /// The square `(d_row, d_column)` away from `from`, if it is on the board.
    #[inline]
    pub fn step(&self, from: SquarePosition, d_row: i8, d_column: i8) -> Option<SquarePosition> {
        let row = from.row as i16 + d_row as i16;
        let column = from.column as i16 + d_column as i16;
        if self.in_bounds(row, column) {
            Some(SquarePosition {
                row: row as u8,
                column: column as u8,
            })
        } else {
            None
        }
    }

    fn check_bounds(&self, square: SquarePosition) -> Result<(), ChessErrors> {
        if self.in_bounds(square.row as i16, square.column as i16) {
            Ok(())
        } else {
            Err(ChessErrors::OutOfBounds(square))
        }
    }

    pub fn occupant_at(&self, square: SquarePosition) -> Result<Option<&Piece>, ChessErrors> {
        self.check_bounds(square)?;
        Ok(self.cells[square.row as usize][square.column as usize].as_ref())
    }

    pub fn is_occupied(&self, square: SquarePosition) -> Result<bool, ChessErrors> {
        Ok(self.occupant_at(square)?.is_some())
    }

    /// Put `piece` on `square` and record the square on the piece.
    pub fn place(&mut self, mut piece: Piece, square: SquarePosition) -> Result<(), ChessErrors> {
        if self.is_occupied(square)? {
            return Err(ChessErrors::SquareOccupied(square));
        }
        piece.position = Some(square);
        self.cells[square.row as usize][square.column as usize] = Some(piece);
        Ok(())
    }

    /// Take the occupant off `square`, detaching its position.
    pub fn remove(&mut self, square: SquarePosition) -> Result<Option<Piece>, ChessErrors> {
        self.check_bounds(square)?;
        let taken = self.cells[square.row as usize][square.column as usize].take();
        Ok(taken.map(|mut piece| {
            piece.position = None;
            piece
        }))
    }

    /// Every piece on the board, scanning rows from rank 8 down to rank 1.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten().flatten()
    }

    /// Every occupied cell together with the square it sits on.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (SquarePosition, &Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(column, cell)| {
                cell.as_ref().map(|piece| {
                    (
                        SquarePosition {
                            row: row as u8,
                            column: column as u8,
                        },
                        piece,
                    )
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_and_remove_keep_position_in_sync() -> Result<(), ChessErrors> {
        let mut grid = Grid::new();
        let c1 = SquarePosition::new(7, 2)?;
        grid.place(Piece::new(7, PieceKind::Rook, Color::White), c1)?;

        let placed = grid.occupant_at(c1)?.copied();
        assert_eq!(placed.and_then(|p| p.position), Some(c1));

        let removed = grid.remove(c1)?.ok_or(ChessErrors::NoPieceAtSource(c1))?;
        assert_eq!(removed.id, 7);
        assert_eq!(removed.position, None);
        assert!(!grid.is_occupied(c1)?);
        assert_eq!(grid.remove(c1)?, None);
        Ok(())
    }

    #[test]
    fn place_on_occupied_square_fails() -> Result<(), ChessErrors> {
        let mut grid = Grid::new();
        let d1 = SquarePosition::new(7, 3)?;
        grid.place(Piece::new(1, PieceKind::King, Color::White), d1)?;
        let err = grid
            .place(Piece::new(2, PieceKind::Rook, Color::White), d1)
            .expect_err("second placement must fail");
        assert_eq!(err, ChessErrors::SquareOccupied(d1));
        Ok(())
    }

    #[test]
    fn out_of_bounds_access_is_rejected() {
        let grid = Grid::new();
        let off = SquarePosition { row: 8, column: 0 };
        assert_eq!(grid.occupant_at(off), Err(ChessErrors::OutOfBounds(off)));
        assert!(!grid.in_bounds(-1, 3));
        assert!(grid.in_bounds(7, 7));
    }

    #[test]
    fn step_stops_at_edges() {
        let grid = Grid::new();
        let a8 = SquarePosition { row: 0, column: 0 };
        assert_eq!(grid.step(a8, -1, 0), None);
        assert_eq!(grid.step(a8, 1, 2), Some(SquarePosition { row: 1, column: 2 }));
    }

    #[test]
    fn occupied_cells_reports_squares() -> Result<(), ChessErrors> {
        let mut grid = Grid::new();
        let e1 = SquarePosition::new(7, 4)?;
        let e8 = SquarePosition::new(0, 4)?;
        grid.place(Piece::new(1, PieceKind::King, Color::White), e1)?;
        grid.place(Piece::new(2, PieceKind::King, Color::Black), e8)?;
        let cells: Vec<SquarePosition> = grid.occupied_cells().map(|(sq, _)| sq).collect();
        assert_eq!(cells, vec![e8, e1]);
        assert_eq!(grid.pieces().count(), 2);
        Ok(())
    }
}
