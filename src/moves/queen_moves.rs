use crate::game_state::chess_types::*;
use crate::game_state::grid::Grid;
use crate::game_state::piece::Piece;
use crate::moves::move_shared::{trace_rays, KING_STEPS};

/// Rook and bishop rays combined; `KING_STEPS` lists all eight directions.
#[inline]
pub fn queen_moves(piece: &Piece, from: SquarePosition, grid: &Grid) -> SquareSet {
    trace_rays(grid, from, piece.color, &KING_STEPS)
}
