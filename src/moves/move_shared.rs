//! Helpers shared by every per-piece generator: step tables, occupancy
//! predicates and the ray/leap tracers.
//!
//! Everything here is a pure read of the grid.

use crate::game_state::chess_types::*;
use crate::game_state::grid::Grid;

/// Read-only match facts a generator needs besides the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveContext {
    /// Pawn that double-stepped on the previous move, if any.
    pub en_passant: Option<PieceId>,
    /// Whether the side being generated for is currently in check.
    pub in_check: bool,
}

pub const ORTHOGONAL_STEPS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAGONAL_STEPS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const KING_STEPS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];
pub const KNIGHT_STEPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

#[inline]
pub fn is_empty_at(grid: &Grid, square: SquarePosition) -> bool {
    matches!(grid.occupant_at(square), Ok(None))
}

/// `true` when `square` holds a piece of the other color than `color`.
#[inline]
pub fn is_opponent_at(grid: &Grid, square: SquarePosition, color: Color) -> bool {
    matches!(grid.occupant_at(square), Ok(Some(piece)) if piece.color != color)
}

/// Empty or enemy-occupied.
#[inline]
pub fn can_land_on(grid: &Grid, square: SquarePosition, color: Color) -> bool {
    is_empty_at(grid, square) || is_opponent_at(grid, square, color)
}

/// Slide along each step direction until the edge, a friendly piece
/// (excluded) or an enemy piece (included, then stop).
pub fn trace_rays(grid: &Grid, from: SquarePosition, color: Color, steps: &[(i8, i8)]) -> SquareSet {
    let mut out = SquareSet::empty();
    for &(d_row, d_column) in steps {
        let mut cursor = grid.step(from, d_row, d_column);
        while let Some(square) = cursor {
            if is_empty_at(grid, square) {
                out.insert(square);
            } else {
                if is_opponent_at(grid, square, color) {
                    out.insert(square);
                }
                break;
            }
            cursor = grid.step(square, d_row, d_column);
        }
    }
    out
}

/// One hop per step offset; each target is checked independently.
pub fn leap(grid: &Grid, from: SquarePosition, color: Color, steps: &[(i8, i8)]) -> SquareSet {
    steps
        .iter()
        .filter_map(|&(d_row, d_column)| grid.step(from, d_row, d_column))
        .filter(|&square| can_land_on(grid, square, color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::piece::Piece;

    #[test]
    fn occupancy_predicates() -> Result<(), ChessErrors> {
        let mut grid = Grid::new();
        let d5 = SquarePosition::new(3, 3)?;
        let e5 = SquarePosition::new(3, 4)?;
        grid.place(Piece::new(1, PieceKind::Pawn, Color::Black), d5)?;

        assert!(is_opponent_at(&grid, d5, Color::White));
        assert!(!is_opponent_at(&grid, d5, Color::Black));
        assert!(!is_empty_at(&grid, d5));
        assert!(is_empty_at(&grid, e5));
        assert!(can_land_on(&grid, d5, Color::White));
        assert!(!can_land_on(&grid, d5, Color::Black));
        assert!(!is_empty_at(&grid, SquarePosition { row: 9, column: 9 }));
        Ok(())
    }

    #[test]
    fn rays_stop_on_blockers() -> Result<(), ChessErrors> {
        let mut grid = Grid::new();
        let a1 = SquarePosition::new(7, 0)?;
        let a4 = SquarePosition::new(4, 0)?;
        let c1 = SquarePosition::new(7, 2)?;
        grid.place(Piece::new(1, PieceKind::Pawn, Color::Black), a4)?;
        grid.place(Piece::new(2, PieceKind::Pawn, Color::White), c1)?;

        let set = trace_rays(&grid, a1, Color::White, &ORTHOGONAL_STEPS);
        // a2 a3 a4 up the file, b1 along the rank
        assert_eq!(set.len(), 4);
        assert!(set.contains(a4));
        assert!(!set.contains(SquarePosition::new(3, 0)?));
        assert!(!set.contains(c1));
        Ok(())
    }
}
