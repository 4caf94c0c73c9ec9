use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::*;
use crate::game_state::grid::Grid;
use crate::moves::move_shared::MoveContext;

/// Square of the unique king of `color`. A missing king is an invariant
/// violation, never a user error.
pub fn king_square(grid: &Grid, color: Color) -> Result<SquarePosition, ChessErrors> {
    grid.occupied_cells()
        .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
        .map(|(square, _)| square)
        .ok_or_else(|| ChessErrors::InvariantViolation(format!("there is no {color} king on the board")))
}

/// Whether any piece of `attacker_color` has `square` among its candidates.
pub fn is_square_attacked(
    grid: &Grid,
    square: SquarePosition,
    attacker_color: Color,
    context: &MoveContext,
) -> bool {
    grid.pieces()
        .filter(|piece| piece.color == attacker_color)
        .any(|piece| piece.can_reach(grid, context, square))
}

/// Whether the king of `color` is attacked.
pub fn is_attacked(grid: &Grid, color: Color, context: &MoveContext) -> Result<bool, ChessErrors> {
    let king = king_square(grid, color)?;
    Ok(is_square_attacked(grid, king, color.opposite(), context))
}
