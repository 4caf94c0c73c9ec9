//! Legal-move path counter.
//!
//! Walks the match tree with the match's own move semantics: every legal
//! `(from, to)` pair is one child, so a promotion counts once (as the default
//! piece) rather than once per promotion kind.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_match::ChessMatch;
use crate::game_state::undo_state::SpecialMove;
use crate::move_generation::legal_move_generator::all_legal_moves;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

pub fn perft(game: &ChessMatch, depth: u8) -> Result<PerftCounts, ChessErrors> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }

    let mut root = game.clone();
    perft_recurse(&mut root, depth, &mut counts)?;
    Ok(counts)
}

fn perft_recurse(game: &mut ChessMatch, depth: u8, counts: &mut PerftCounts) -> Result<(), ChessErrors> {
    for (from, to) in all_legal_moves(game)? {
        let mut child = game.clone();
        child.perform_move_at(from, to)?;

        if depth > 1 {
            perft_recurse(&mut child, depth - 1, counts)?;
            continue;
        }

        counts.nodes += 1;
        let Some(record) = child.history().last() else {
            continue;
        };
        if record.captured.is_some() {
            counts.captures += 1;
        }
        match record.special {
            Some(SpecialMove::EnPassant) => counts.en_passant += 1,
            Some(SpecialMove::CastleShort | SpecialMove::CastleLong) => counts.castles += 1,
            _ => {}
        }
        if record.promotion.is_some() {
            counts.promotions += 1;
        }
        if record.gives_check {
            counts.checks += 1;
        }
        if record.checkmate {
            counts.checkmates += 1;
        }
    }
    Ok(())
}
