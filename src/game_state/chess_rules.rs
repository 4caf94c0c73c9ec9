//! Canonical chess-rule constants.
//!
//! Starting layouts use the piece-placement field of Forsyth-Edwards Notation,
//! read by `utils::layout_parser`.

use crate::game_state::chess_types::PieceKind;

/// Full 16-piece armies.
pub const STANDARD_LAYOUT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Reduced setup of six non-pawn pieces per side: rooks on c1 c2 d2 e2 e1 and
/// the king on d1, mirrored for Black.
pub const REFERENCE_LAYOUT: &str = "2rkr3/2rrr3/8/8/8/8/2RRR3/2RKR3";

/// Pieces a pawn may promote to.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Turn number of the first move.
pub const FIRST_TURN: u32 = 1;
