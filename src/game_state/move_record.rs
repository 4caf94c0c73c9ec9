//! History entry for a completed move.

use crate::game_state::chess_types::*;
use crate::game_state::undo_state::SpecialMove;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub turn: u32,
    pub color: Color,
    pub piece: PieceKind,
    pub from: SquarePosition,
    pub to: SquarePosition,
    pub captured: Option<PieceDescriptor>,
    pub special: Option<SpecialMove>,
    pub promotion: Option<PieceKind>,
    pub gives_check: bool,
    pub checkmate: bool,
}

impl MoveRecord {
    /// Long algebraic form, e.g. `e2e4` or `e7e8q`.
    pub fn long_algebraic(&self) -> String {
        let mut out = format!("{}{}", self.from, self.to);
        if let Some(kind) = self.promotion {
            out.push(kind.letter().to_ascii_lowercase());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotion_letter_is_appended() {
        let record = MoveRecord {
            turn: 9,
            color: Color::White,
            piece: PieceKind::Pawn,
            from: SquarePosition { row: 1, column: 4 },
            to: SquarePosition { row: 0, column: 4 },
            captured: None,
            special: None,
            promotion: Some(PieceKind::Knight),
            gives_check: false,
            checkmate: false,
        };
        assert_eq!(record.long_algebraic(), "e7e8n");
    }
}
