//! Piece model and the single candidate-move dispatch.

use crate::game_state::chess_types::*;
use crate::game_state::grid::Grid;
use crate::moves::bishop_moves::bishop_moves;
use crate::moves::king_moves::king_moves;
use crate::moves::knight_moves::knight_moves;
use crate::moves::move_shared::MoveContext;
use crate::moves::pawn_moves::pawn_moves;
use crate::moves::queen_moves::queen_moves;
use crate::moves::rook_moves::rook_moves;

/// A piece and its per-game state.
///
/// `position` mirrors the grid cell holding the piece and is `None` once the
/// piece is off the board. `move_count` is incremented on every executed move
/// and decremented on undo; it answers "has this piece ever moved" for
/// castling and the pawn double step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub position: Option<SquarePosition>,
    pub move_count: u32,
}

impl Piece {
    pub fn new(id: PieceId, kind: PieceKind, color: Color) -> Self {
        Piece {
            id,
            kind,
            color,
            position: None,
            move_count: 0,
        }
    }

    #[inline]
    pub fn descriptor(&self) -> PieceDescriptor {
        PieceDescriptor {
            kind: self.kind,
            color: self.color,
        }
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.move_count > 0
    }

    /// Every square this piece could move to, ignoring whose turn it is and
    /// whether its own king would be left attacked. Empty when off the board.
    pub fn candidate_moves(&self, grid: &Grid, context: &MoveContext) -> SquareSet {
        let Some(from) = self.position else {
            return SquareSet::empty();
        };
        match self.kind {
            PieceKind::Pawn => pawn_moves(self, from, grid, context),
            PieceKind::Knight => knight_moves(self, from, grid),
            PieceKind::Bishop => bishop_moves(self, from, grid),
            PieceKind::Rook => rook_moves(self, from, grid),
            PieceKind::Queen => queen_moves(self, from, grid),
            PieceKind::King => king_moves(self, from, grid, context),
        }
    }

    /// Cheap membership test used by attack detection.
    #[inline]
    pub fn can_reach(&self, grid: &Grid, context: &MoveContext, target: SquarePosition) -> bool {
        self.candidate_moves(grid, context).contains(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_board_piece_has_no_candidates() {
        let grid = Grid::new();
        let rook = Piece::new(1, PieceKind::Rook, Color::White);
        assert!(rook.candidate_moves(&grid, &MoveContext::default()).is_empty());
    }

    #[test]
    fn placed_piece_dispatches_by_kind() -> Result<(), crate::chess_errors::ChessErrors> {
        let mut grid = Grid::new();
        let d4 = SquarePosition::new(4, 3)?;
        grid.place(Piece::new(1, PieceKind::Knight, Color::White), d4)?;
        let knight = grid
            .occupant_at(d4)?
            .copied()
            .ok_or(crate::chess_errors::ChessErrors::NoPieceAtSource(d4))?;
        assert_eq!(knight.candidate_moves(&grid, &MoveContext::default()).len(), 8);
        assert!(!knight.has_moved());
        Ok(())
    }
}
