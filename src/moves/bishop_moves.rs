use crate::game_state::chess_types::*;
use crate::game_state::grid::Grid;
use crate::game_state::piece::Piece;
use crate::moves::move_shared::{trace_rays, DIAGONAL_STEPS};

#[inline]
pub fn bishop_moves(piece: &Piece, from: SquarePosition, grid: &Grid) -> SquareSet {
    trace_rays(grid, from, piece.color, &DIAGONAL_STEPS)
}

#[cfg(test)]
mod tests {
    use super::bishop_moves;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_types::*;
    use crate::game_state::grid::Grid;
    use crate::game_state::piece::Piece;

    #[test]
    fn bishop_from_d4_sees_thirteen_squares() -> Result<(), ChessErrors> {
        let grid = Grid::new();
        let bishop = Piece::new(1, PieceKind::Bishop, Color::Black);
        assert_eq!(bishop_moves(&bishop, SquarePosition::new(4, 3)?, &grid).len(), 13);
        Ok(())
    }

    #[test]
    fn friendly_piece_is_excluded() -> Result<(), ChessErrors> {
        let mut grid = Grid::new();
        let c1 = SquarePosition::new(7, 2)?;
        let d2 = SquarePosition::new(6, 3)?;
        grid.place(Piece::new(2, PieceKind::Pawn, Color::White), d2)?;
        let bishop = Piece::new(1, PieceKind::Bishop, Color::White);

        let moves = bishop_moves(&bishop, c1, &grid);
        assert!(!moves.contains(d2));
        // only the b2-a3 diagonal remains
        assert_eq!(moves.len(), 2);
        Ok(())
    }
}
