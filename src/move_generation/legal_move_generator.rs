//! Legal move filtering.
//!
//! Candidates come from the per-piece generators; a candidate is legal when
//! executing it does not leave the mover's king attacked. Every test runs
//! through `speculate`, which always restores the match before returning.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_match::ChessMatch;
use crate::game_state::chess_types::*;
use crate::game_state::match_config::CastlingTransit;
use crate::move_generation::legal_move_apply::{execute_move, undo_move};
use crate::move_generation::legal_move_checks::is_attacked;
use crate::moves::move_shared::MoveContext;

/// Execute `from -> to`, evaluate `probe` on the resulting position, then undo.
///
/// The undo happens whether or not `probe` fails, so the match observed by
/// the caller is identical before and after.
pub fn speculate<R, F>(
    game: &mut ChessMatch,
    from: SquarePosition,
    to: SquarePosition,
    probe: F,
) -> Result<R, ChessErrors>
where
    F: FnOnce(&ChessMatch) -> Result<R, ChessErrors>,
{
    let undo = execute_move(game, from, to)?;
    let outcome = probe(game);
    undo_move(game, undo)?;
    outcome
}

/// Whether `color` would still be safe after `from -> to`.
fn leaves_king_safe(
    game: &mut ChessMatch,
    color: Color,
    from: SquarePosition,
    to: SquarePosition,
) -> Result<bool, ChessErrors> {
    speculate(game, from, to, |after| {
        Ok(!is_attacked(&after.grid, color, &after.attack_context())?)
    })
}

/// Raw candidates of the piece on `from`, turn and king safety ignored.
pub fn candidate_destinations(
    game: &ChessMatch,
    from: SquarePosition,
) -> Result<SquareSet, ChessErrors> {
    let piece = game
        .grid
        .occupant_at(from)?
        .ok_or(ChessErrors::NoPieceAtSource(from))?;
    Ok(piece.candidate_moves(&game.grid, &game.move_context(piece.color)))
}

/// Candidates of the piece on `from` that keep its own king safe.
///
/// With `CastlingTransit::Verified` a castling move is also dropped when the
/// square the king crosses is attacked.
pub fn legal_destinations_from(
    game: &mut ChessMatch,
    from: SquarePosition,
) -> Result<SquareSet, ChessErrors> {
    let piece = *game
        .grid
        .occupant_at(from)?
        .ok_or(ChessErrors::NoPieceAtSource(from))?;
    let candidates = piece.candidate_moves(&game.grid, &game.move_context(piece.color));

    let mut legal = SquareSet::empty();
    for to in candidates {
        if !leaves_king_safe(game, piece.color, from, to)? {
            continue;
        }
        if piece.kind == PieceKind::King
            && from.column.abs_diff(to.column) == 2
            && game.config.castling_transit == CastlingTransit::Verified
        {
            let crossed = SquarePosition {
                row: from.row,
                column: (from.column + to.column) / 2,
            };
            if !leaves_king_safe(game, piece.color, from, crossed)? {
                continue;
            }
        }
        legal.insert(to);
    }
    Ok(legal)
}

/// Whether `color` is checkmated: in check with no candidate of any of its
/// pieces leaving the king safe.
pub fn is_checkmate(game: &mut ChessMatch, color: Color) -> Result<bool, ChessErrors> {
    if !is_attacked(&game.grid, color, &game.attack_context())? {
        return Ok(false);
    }

    let context = MoveContext {
        en_passant: game.en_passant,
        in_check: true,
    };
    let movers: Vec<(SquarePosition, SquareSet)> = game
        .grid
        .occupied_cells()
        .filter(|(_, piece)| piece.color == color)
        .map(|(square, piece)| (square, piece.candidate_moves(&game.grid, &context)))
        .collect();

    for (from, candidates) in movers {
        for to in candidates {
            if leaves_king_safe(game, color, from, to)? {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Every legal `(from, to)` pair of the side on move, in square order.
/// Empty once the match is over.
pub fn all_legal_moves(
    game: &mut ChessMatch,
) -> Result<Vec<(SquarePosition, SquarePosition)>, ChessErrors> {
    if game.checkmate {
        return Ok(Vec::new());
    }

    let color = game.current_player;
    let sources: Vec<SquarePosition> = game
        .grid
        .occupied_cells()
        .filter(|(_, piece)| piece.color == color)
        .map(|(square, _)| square)
        .collect();

    let mut moves = Vec::with_capacity(sources.len() * 4);
    for from in sources {
        for to in legal_destinations_from(game, from)? {
            moves.push((from, to));
        }
    }
    Ok(moves)
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
    fn opening_position_has_twenty_moves() -> Result<(), ChessErrors> {
        let mut game = ChessMatch::new();
        assert_eq!(all_legal_moves(&mut game)?.len(), 20);
        Ok(())
    }

    #[test]
    fn speculation_leaves_match_untouched() -> Result<(), ChessErrors> {
        let mut game = ChessMatch::new();
        let before = game.clone();
        let occupied = speculate(&mut game, sq("e2"), sq("e4"), |after| {
            after.grid.is_occupied(sq("e4"))
        })?;
        assert!(occupied);
        assert_eq!(game, before);
        Ok(())
    }

    #[test]
    fn pinned_piece_has_no_legal_moves() -> Result<(), ChessErrors> {
        // white bishop on e2 is pinned by the rook on e8
        let mut game = ChessMatch::from_layout(MatchConfig::default(), "k3r3/8/8/8/8/8/4B3/4K3 w")?;
        assert!(!candidate_destinations(&game, sq("e2"))?.is_empty());
        assert!(legal_destinations_from(&mut game, sq("e2"))?.is_empty());
        Ok(())
    }

    #[test]
    fn king_cannot_step_into_attack() -> Result<(), ChessErrors> {
        let mut game = ChessMatch::from_layout(MatchConfig::default(), "k4r2/8/8/8/8/8/8/4K3 w")?;
        let legal = legal_destinations_from(&mut game, sq("e1"))?;
        assert!(!legal.contains(sq("f1")));
        assert!(!legal.contains(sq("f2")));
        assert!(legal.contains(sq("d1")));
        Ok(())
    }

    #[test]
    fn castling_transit_rule_is_configurable() -> Result<(), ChessErrors> {
        // f1 is covered by the rook on f8, g1 is not
        let layout = "k4r2/8/8/8/8/8/8/4K2R w";

        let mut lenient = ChessMatch::from_layout(MatchConfig::default(), layout)?;
        assert!(legal_destinations_from(&mut lenient, sq("e1"))?.contains(sq("g1")));

        let strict_config = MatchConfig::default().with_castling_transit(CastlingTransit::Verified);
        let mut strict = ChessMatch::from_layout(strict_config, layout)?;
        assert!(!legal_destinations_from(&mut strict, sq("e1"))?.contains(sq("g1")));
        Ok(())
    }

    #[test]
    fn back_rank_mate_is_detected() -> Result<(), ChessErrors> {
        let mut game = ChessMatch::from_layout(MatchConfig::default(), "R5k1/5ppp/8/8/8/8/8/6K1 b")?;
        assert!(is_checkmate(&mut game, Color::Black)?);
        assert!(!is_checkmate(&mut game, Color::White)?);
        Ok(())
    }

    #[test]
    fn check_with_an_escape_is_not_mate() -> Result<(), ChessErrors> {
        let mut game = ChessMatch::from_layout(MatchConfig::default(), "R5k1/5pp1/8/8/8/8/8/6K1 b")?;
        assert!(!is_checkmate(&mut game, Color::Black)?);
        Ok(())
    }
}
