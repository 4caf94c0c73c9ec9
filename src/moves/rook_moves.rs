use crate::game_state::chess_types::*;
use crate::game_state::grid::Grid;
use crate::game_state::piece::Piece;
use crate::moves::move_shared::{trace_rays, ORTHOGONAL_STEPS};

#[inline]
pub fn rook_moves(piece: &Piece, from: SquarePosition, grid: &Grid) -> SquareSet {
    trace_rays(grid, from, piece.color, &ORTHOGONAL_STEPS)
}

#[cfg(test)]
mod tests {
    use super::rook_moves;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_types::*;
    use crate::game_state::grid::Grid;
    use crate::game_state::piece::Piece;

    #[test]
    fn rook_on_empty_board_has_fourteen_squares() -> Result<(), ChessErrors> {
        let grid = Grid::new();
        let rook = Piece::new(1, PieceKind::Rook, Color::White);
        let d4 = SquarePosition::new(4, 3)?;
        assert_eq!(rook_moves(&rook, d4, &grid).len(), 14);
        Ok(())
    }

    #[test]
    fn rook_blocker_stops_ray() -> Result<(), ChessErrors> {
        let mut grid = Grid::new();
        let a1 = SquarePosition::new(7, 0)?;
        let a4 = SquarePosition::new(4, 0)?;
        let a5 = SquarePosition::new(3, 0)?;
        grid.place(Piece::new(2, PieceKind::Knight, Color::Black), a4)?;
        let rook = Piece::new(1, PieceKind::Rook, Color::White);

        let moves = rook_moves(&rook, a1, &grid);
        assert!(moves.contains(a4));
        assert!(!moves.contains(a5));
        Ok(())
    }
}
