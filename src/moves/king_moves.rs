//! King steps and castling candidates.
//!
//! Castling is offered when the king has never moved, is not in check, a
//! never-moved rook of the same color stands exactly 3 columns to the right
//! (short side) or 4 columns to the left (long side) on the same row, and every
//! square strictly between them is empty. The king's transit squares are not
//! tested for attack here; `MatchConfig::castling_transit` decides whether the
//! match adds that test on top.

use crate::game_state::chess_types::*;
use crate::game_state::grid::Grid;
use crate::game_state::piece::Piece;
use crate::moves::move_shared::{is_empty_at, leap, MoveContext, KING_STEPS};

/// Column offset of the short-side rook from the king.
pub const SHORT_CASTLE_ROOK_OFFSET: i8 = 3;
/// Column offset of the long-side rook from the king.
pub const LONG_CASTLE_ROOK_OFFSET: i8 = -4;

pub fn king_moves(
    piece: &Piece,
    from: SquarePosition,
    grid: &Grid,
    context: &MoveContext,
) -> SquareSet {
    let mut out = leap(grid, from, piece.color, &KING_STEPS);

    if piece.move_count == 0 && !context.in_check {
        for rook_offset in [SHORT_CASTLE_ROOK_OFFSET, LONG_CASTLE_ROOK_OFFSET] {
            if let Some(target) = castling_target(piece, from, grid, rook_offset) {
                out.insert(target);
            }
        }
    }

    out
}

fn castling_target(
    king: &Piece,
    from: SquarePosition,
    grid: &Grid,
    rook_offset: i8,
) -> Option<SquarePosition> {
    let rook_square = grid.step(from, 0, rook_offset)?;
    let rook_ready = matches!(
        grid.occupant_at(rook_square),
        Ok(Some(rook)) if rook.kind == PieceKind::Rook
            && rook.color == king.color
            && rook.move_count == 0
    );
    if !rook_ready {
        return None;
    }

    let direction = rook_offset.signum();
    let path_clear = (1..rook_offset.abs()).all(|distance| {
        grid.step(from, 0, direction * distance)
            .map(|square| is_empty_at(grid, square))
            .unwrap_or(false)
    });
    if !path_clear {
        return None;
    }

    grid.step(from, 0, 2 * direction)
}
