use crate::game_state::chess_types::*;
use crate::game_state::grid::Grid;
use crate::game_state::piece::Piece;
use crate::moves::move_shared::{leap, KNIGHT_STEPS};

#[inline]
pub fn knight_moves(piece: &Piece, from: SquarePosition, grid: &Grid) -> SquareSet {
    leap(grid, from, piece.color, &KNIGHT_STEPS)
}

#[cfg(test)]
mod tests {
    use super::knight_moves;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_types::*;
    use crate::game_state::grid::Grid;
    use crate::game_state::piece::Piece;

    #[test]
    fn knight_in_corner_has_two_targets() -> Result<(), ChessErrors> {
        let grid = Grid::new();
        let knight = Piece::new(1, PieceKind::Knight, Color::White);
        assert_eq!(knight_moves(&knight, SquarePosition::new(7, 0)?, &grid).len(), 2);
        Ok(())
    }

    #[test]
    fn knight_jumps_over_but_not_onto_friends() -> Result<(), ChessErrors> {
        let mut grid = Grid::new();
        let b1 = SquarePosition::new(7, 1)?;
        let d2 = SquarePosition::new(6, 3)?;
        let c3 = SquarePosition::new(5, 2)?;
        let a3 = SquarePosition::new(5, 0)?;
        grid.place(Piece::new(2, PieceKind::Pawn, Color::White), d2)?;
        grid.place(Piece::new(3, PieceKind::Pawn, Color::Black), c3)?;
        grid.place(Piece::new(4, PieceKind::Pawn, Color::White), SquarePosition::new(6, 1)?)?;
        let knight = Piece::new(1, PieceKind::Knight, Color::White);

        let moves = knight_moves(&knight, b1, &grid);
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(c3));
        assert!(moves.contains(a3));
        Ok(())
    }
}
