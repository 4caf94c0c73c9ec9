use crate::game_state::chess_types::*;

/// Kind of side effect a move carried beyond "piece goes from A to B".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialMove {
    DoublePawnPush,
    EnPassant,
    CastleShort,
    CastleLong,
}

/// Single undo record for `execute_move` / `undo_move`.
///
/// Every field written by `execute_move` has a counterpart here so the undo is
/// an exact structural inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub from: SquarePosition,
    pub to: SquarePosition,
    pub moved_piece: PieceId,
    /// Square the captured piece stood on. For en passant this is the
    /// victim's own square, not the destination.
    pub captured_square: Option<SquarePosition>,
    /// Rook relocation of a castling move: (corner, square the king crossed).
    pub castling_rook: Option<(SquarePosition, SquarePosition)>,
    pub special: Option<SpecialMove>,
    pub prev_en_passant: Option<PieceId>,
}
