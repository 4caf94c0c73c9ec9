//! Move execution and its exact inverse.
//!
//! `execute_move` performs one logical move (including the rook hop of
//! castling and the side capture of en passant) and returns the `UndoState`
//! that `undo_move` needs to put every touched field back. Neither function
//! checks chess legality; callers validate first.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_match::ChessMatch;
use crate::game_state::chess_types::*;
use crate::game_state::undo_state::{SpecialMove, UndoState};
use crate::moves::king_moves::{LONG_CASTLE_ROOK_OFFSET, SHORT_CASTLE_ROOK_OFFSET};

pub fn execute_move(
    game: &mut ChessMatch,
    from: SquarePosition,
    to: SquarePosition,
) -> Result<UndoState, ChessErrors> {
    let mut piece = game.grid.remove(from)?.ok_or_else(|| {
        ChessErrors::InvariantViolation(format!("execute_move found no piece on {from}"))
    })?;
    piece.move_count += 1;
    let moved = piece;

    let mut captured_square = None;
    if let Some(victim) = game.grid.remove(to)? {
        game.captured.push(victim);
        captured_square = Some(to);
    }
    game.grid.place(piece, to)?;

    let column_shift = to.column as i8 - from.column as i8;
    let row_shift = to.row as i8 - from.row as i8;
    let mut special = None;
    let mut castling_rook = None;

    match moved.kind {
        PieceKind::King if column_shift.abs() == 2 => {
            let (rook_offset, kind) = if column_shift > 0 {
                (SHORT_CASTLE_ROOK_OFFSET, SpecialMove::CastleShort)
            } else {
                (LONG_CASTLE_ROOK_OFFSET, SpecialMove::CastleLong)
            };
            let corner = game.grid.step(from, 0, rook_offset).ok_or_else(|| {
                ChessErrors::InvariantViolation(format!("castling from {from} has no rook corner"))
            })?;
            let crossed = game.grid.step(from, 0, column_shift.signum()).ok_or_else(|| {
                ChessErrors::InvariantViolation(format!("castling from {from} leaves the board"))
            })?;
            let mut rook = game.grid.remove(corner)?.ok_or_else(|| {
                ChessErrors::InvariantViolation(format!("castling rook missing on {corner}"))
            })?;
            rook.move_count += 1;
            game.grid.place(rook, crossed)?;
            castling_rook = Some((corner, crossed));
            special = Some(kind);
        }
        PieceKind::Pawn if column_shift != 0 && captured_square.is_none() => {
            let victim_square = SquarePosition {
                row: from.row,
                column: to.column,
            };
            let victim = game.grid.remove(victim_square)?.ok_or_else(|| {
                ChessErrors::InvariantViolation(format!(
                    "en passant capture found no pawn on {victim_square}"
                ))
            })?;
            game.captured.push(victim);
            captured_square = Some(victim_square);
            special = Some(SpecialMove::EnPassant);
        }
        PieceKind::Pawn if row_shift.abs() == 2 => {
            special = Some(SpecialMove::DoublePawnPush);
        }
        _ => {}
    }

    Ok(UndoState {
        from,
        to,
        moved_piece: moved.id,
        captured_square,
        castling_rook,
        special,
        prev_en_passant: game.en_passant,
    })
}

pub fn undo_move(game: &mut ChessMatch, undo: UndoState) -> Result<(), ChessErrors> {
    let mut piece = game.grid.remove(undo.to)?.ok_or_else(|| {
        ChessErrors::InvariantViolation(format!("undo found no piece on {}", undo.to))
    })?;
    if piece.id != undo.moved_piece {
        return Err(ChessErrors::InvariantViolation(format!(
            "undo expected piece {} on {} but found {}",
            undo.moved_piece, undo.to, piece.id
        )));
    }
    piece.move_count = piece.move_count.checked_sub(1).ok_or_else(|| {
        ChessErrors::InvariantViolation(format!("move counter underflow for piece {}", piece.id))
    })?;
    game.grid.place(piece, undo.from)?;

    if let Some(square) = undo.captured_square {
        let victim = game.captured.pop().ok_or_else(|| {
            ChessErrors::InvariantViolation("undo expected a captured piece".to_owned())
        })?;
        game.grid.place(victim, square)?;
    }

    if let Some((corner, crossed)) = undo.castling_rook {
        let mut rook = game.grid.remove(crossed)?.ok_or_else(|| {
            ChessErrors::InvariantViolation(format!("undo found no castled rook on {crossed}"))
        })?;
        rook.move_count = rook.move_count.checked_sub(1).ok_or_else(|| {
            ChessErrors::InvariantViolation(format!("move counter underflow for rook {}", rook.id))
        })?;
        game.grid.place(rook, corner)?;
    }

    game.en_passant = undo.prev_en_passant;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::match_config::MatchConfig;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> SquarePosition {
        algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn capture_then_undo_is_exact() -> Result<(), ChessErrors> {
        let mut game =
            ChessMatch::from_layout(MatchConfig::default(), "4k3/8/8/3p4/4P3/8/8/4K3")?;
        let before = game.clone();

        let undo = execute_move(&mut game, sq("e4"), sq("d5"))?;
        assert_eq!(undo.captured_square, Some(sq("d5")));
        assert_eq!(game.captured.len(), 1);
        assert_eq!(
            game.grid.occupant_at(sq("d5"))?.map(|p| (p.kind, p.move_count)),
            Some((PieceKind::Pawn, 1))
        );

        undo_move(&mut game, undo)?;
        assert_eq!(game, before);
        Ok(())
    }

    #[test]
    fn castling_moves_rook_and_undo_restores_it() -> Result<(), ChessErrors> {
        let mut game = ChessMatch::from_layout(MatchConfig::default(), "r3k3/8/8/8/8/8/8/4K2R")?;
        let before = game.clone();

        let undo = execute_move(&mut game, sq("e1"), sq("g1"))?;
        assert_eq!(undo.special, Some(SpecialMove::CastleShort));
        let rook = game.grid.occupant_at(sq("f1"))?.copied();
        assert_eq!(rook.map(|r| (r.kind, r.move_count)), Some((PieceKind::Rook, 1)));
        assert!(!game.grid.is_occupied(sq("h1"))?);

        undo_move(&mut game, undo)?;
        assert_eq!(game, before);

        let undo = execute_move(&mut game, sq("e8"), sq("c8"))?;
        assert_eq!(undo.special, Some(SpecialMove::CastleLong));
        assert!(game.grid.is_occupied(sq("d8"))?);
        undo_move(&mut game, undo)?;
        assert_eq!(game, before);
        Ok(())
    }

    #[test]
    fn castled_rook_counter_underflow_is_reported() -> Result<(), ChessErrors> {
        let mut game = ChessMatch::from_layout(MatchConfig::default(), "4k3/8/8/8/8/8/8/4K2R")?;
        let undo = execute_move(&mut game, sq("e1"), sq("g1"))?;

        let mut rook = game.grid.remove(sq("f1"))?.expect("castled rook on f1");
        rook.move_count = 0;
        game.grid.place(rook, sq("f1"))?;

        assert!(matches!(
            undo_move(&mut game, undo),
            Err(ChessErrors::InvariantViolation(_))
        ));
        Ok(())
    }

    #[test]
    fn en_passant_restores_victim_on_its_own_square() -> Result<(), ChessErrors> {
        let mut game = ChessMatch::from_layout(MatchConfig::default(), "4k3/8/8/3pP3/8/8/8/4K3")?;
        let before = game.clone();

        let undo = execute_move(&mut game, sq("e5"), sq("d6"))?;
        assert_eq!(undo.special, Some(SpecialMove::EnPassant));
        assert_eq!(undo.captured_square, Some(sq("d5")));
        assert!(!game.grid.is_occupied(sq("d5"))?);

        undo_move(&mut game, undo)?;
        assert!(!game.grid.is_occupied(sq("d6"))?);
        assert_eq!(game, before);
        Ok(())
    }
}
