use crate::game_state::chess_types::*;
use crate::game_state::grid::Grid;
use crate::game_state::piece::Piece;
use crate::moves::move_shared::{is_empty_at, is_opponent_at, MoveContext};

/// Pawn pushes, diagonal captures and en passant.
///
/// The double step needs the pawn on its start row with a zero move counter
/// and both squares ahead empty. En passant is offered when the pawn stands on
/// its en-passant row next to the enemy pawn named by `context.en_passant`;
/// the destination is the empty square behind that pawn.
pub fn pawn_moves(
    piece: &Piece,
    from: SquarePosition,
    grid: &Grid,
    context: &MoveContext,
) -> SquareSet {
    let color = piece.color;
    let forward = color.forward_step();
    let mut out = SquareSet::empty();

    if let Some(one_step) = grid.step(from, forward, 0) {
        if is_empty_at(grid, one_step) {
            out.insert(one_step);

            if piece.move_count == 0 && from.row == color.pawn_start_row() {
                if let Some(two_step) = grid.step(from, 2 * forward, 0) {
                    if is_empty_at(grid, two_step) {
                        out.insert(two_step);
                    }
                }
            }
        }
    }

    for d_column in [-1i8, 1i8] {
        if let Some(target) = grid.step(from, forward, d_column) {
            if is_opponent_at(grid, target, color) {
                out.insert(target);
            }
        }
    }

    if from.row == color.en_passant_row() {
        if let Some(vulnerable) = context.en_passant {
            for d_column in [-1i8, 1i8] {
                let Some(side) = grid.step(from, 0, d_column) else {
                    continue;
                };
                let is_target = matches!(
                    grid.occupant_at(side),
                    Ok(Some(other)) if other.id == vulnerable
                        && other.kind == PieceKind::Pawn
                        && other.color != color
                );
                if !is_target {
                    continue;
                }
                if let Some(behind) = grid.step(side, forward, 0) {
                    if is_empty_at(grid, behind) {
                        out.insert(behind);
                    }
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::pawn_moves;
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_types::*;
    use crate::game_state::grid::Grid;
    use crate::game_state::piece::Piece;
    use crate::moves::move_shared::MoveContext;

    fn placed(grid: &mut Grid, piece: Piece, square: SquarePosition) -> Result<Piece, ChessErrors> {
        grid.place(piece, square)?;
        grid.occupant_at(square)?
            .copied()
            .ok_or(ChessErrors::NoPieceAtSource(square))
    }

    #[test]
    fn unmoved_white_pawn_has_single_and_double_step() -> Result<(), ChessErrors> {
        let mut grid = Grid::new();
        let e2 = SquarePosition::new(6, 4)?;
        let pawn = placed(&mut grid, Piece::new(1, PieceKind::Pawn, Color::White), e2)?;

        let moves = pawn_moves(&pawn, e2, &grid, &MoveContext::default());
        let names: Vec<String> = moves.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["e4", "e3"]);
        Ok(())
    }

    #[test]
    fn moved_pawn_has_no_double_step() -> Result<(), ChessErrors> {
        let mut grid = Grid::new();
        let e2 = SquarePosition::new(6, 4)?;
        let mut pawn = Piece::new(1, PieceKind::Pawn, Color::White);
        pawn.move_count = 2;
        let pawn = placed(&mut grid, pawn, e2)?;
        assert_eq!(pawn_moves(&pawn, e2, &grid, &MoveContext::default()).len(), 1);
        Ok(())
    }

    #[test]
    fn blocked_pawn_cannot_jump() -> Result<(), ChessErrors> {
        let mut grid = Grid::new();
        let d7 = SquarePosition::new(1, 3)?;
        let d6 = SquarePosition::new(2, 3)?;
        let pawn = placed(&mut grid, Piece::new(1, PieceKind::Pawn, Color::Black), d7)?;
        grid.place(Piece::new(2, PieceKind::Knight, Color::White), d6)?;
        assert!(pawn_moves(&pawn, d7, &grid, &MoveContext::default()).is_empty());
        Ok(())
    }

    #[test]
    fn pawn_captures_diagonally_forward_only() -> Result<(), ChessErrors> {
        let mut grid = Grid::new();
        let d4 = SquarePosition::new(4, 3)?;
        let mut pawn = Piece::new(1, PieceKind::Pawn, Color::White);
        pawn.move_count = 1;
        let pawn = placed(&mut grid, pawn, d4)?;
        let e5 = SquarePosition::new(3, 4)?;
        let c3 = SquarePosition::new(5, 2)?;
        grid.place(Piece::new(2, PieceKind::Bishop, Color::Black), e5)?;
        grid.place(Piece::new(3, PieceKind::Bishop, Color::Black), c3)?;

        let moves = pawn_moves(&pawn, d4, &grid, &MoveContext::default());
        assert!(moves.contains(e5));
        assert!(!moves.contains(c3));
        assert_eq!(moves.len(), 2);
        Ok(())
    }

    #[test]
    fn en_passant_requires_the_vulnerable_pawn() -> Result<(), ChessErrors> {
        let mut grid = Grid::new();
        let e5 = SquarePosition::new(3, 4)?;
        let d5 = SquarePosition::new(3, 3)?;
        let d6 = SquarePosition::new(2, 3)?;
        let mut pawn = Piece::new(1, PieceKind::Pawn, Color::White);
        pawn.move_count = 2;
        let pawn = placed(&mut grid, pawn, e5)?;
        grid.place(Piece::new(9, PieceKind::Pawn, Color::Black), d5)?;

        let stale = MoveContext::default();
        assert!(!pawn_moves(&pawn, e5, &grid, &stale).contains(d6));

        let fresh = MoveContext {
            en_passant: Some(9),
            in_check: false,
        };
        assert!(pawn_moves(&pawn, e5, &grid, &fresh).contains(d6));
        Ok(())
    }

    #[test]
    fn black_en_passant_targets_row_behind() -> Result<(), ChessErrors> {
        let mut grid = Grid::new();
        let f4 = SquarePosition::new(4, 5)?;
        let e4 = SquarePosition::new(4, 4)?;
        let e3 = SquarePosition::new(5, 4)?;
        let mut pawn = Piece::new(1, PieceKind::Pawn, Color::Black);
        pawn.move_count = 2;
        let pawn = placed(&mut grid, pawn, f4)?;
        grid.place(Piece::new(4, PieceKind::Pawn, Color::White), e4)?;

        let context = MoveContext {
            en_passant: Some(4),
            in_check: false,
        };
        let moves = pawn_moves(&pawn, f4, &grid, &context);
        assert!(moves.contains(e3));
        assert!(moves.contains(SquarePosition::new(5, 5)?));
        Ok(())
    }
}
