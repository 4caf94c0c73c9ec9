//! End-to-end match scenarios driven through the public API.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_match::ChessMatch;
use crate::game_state::chess_types::*;
use crate::game_state::match_config::{CastlingTransit, MatchConfig};
use crate::move_generation::legal_move_apply::{execute_move, undo_move};
use crate::move_generation::legal_move_generator::all_legal_moves;
use crate::utils::algebraic::BoardPosition;
use crate::utils::render_game_state::render_snapshot;

fn pos(text: &str) -> BoardPosition {
    text.parse().expect("test position should parse")
}

fn play(game: &mut ChessMatch, moves: &[(&str, &str)]) -> Result<(), ChessErrors> {
    for (from, to) in moves {
        game.perform_move(pos(from), pos(to))?;
    }
    Ok(())
}

fn piece_at(game: &ChessMatch, text: &str) -> Option<PieceDescriptor> {
    let square = pos(text).to_square();
    game.board_snapshot()[square.row as usize][square.column as usize]
}

fn white(kind: PieceKind) -> Option<PieceDescriptor> {
    Some(PieceDescriptor {
        kind,
        color: Color::White,
    })
}

#[test]
fn short_castle_relocates_rook() -> Result<(), ChessErrors> {
    let mut game = ChessMatch::from_layout(MatchConfig::default(), "4k3/8/8/8/8/8/8/4K2R w")?;
    assert!(game.legal_destinations(pos("e1"))?.contains(&pos("g1")));

    game.perform_move(pos("e1"), pos("g1"))?;
    assert_eq!(piece_at(&game, "g1"), white(PieceKind::King));
    assert_eq!(piece_at(&game, "f1"), white(PieceKind::Rook));
    assert_eq!(piece_at(&game, "h1"), None);
    assert_eq!(piece_at(&game, "e1"), None);
    assert_eq!(game.status().active_color, Color::Black);
    assert_eq!(game.history()[0].long_algebraic(), "e1g1");
    game.verify_integrity()
}

#[test]
fn castling_rights_vanish_once_the_rook_has_moved() -> Result<(), ChessErrors> {
    let mut game = ChessMatch::from_layout(MatchConfig::default(), "4k3/8/8/8/8/8/8/4K2R w")?;
    play(&mut game, &[("h1", "h2"), ("e8", "d8"), ("h2", "h1"), ("d8", "e8")])?;
    assert!(!game.legal_destinations(pos("e1"))?.contains(&pos("g1")));
    Ok(())
}

#[test]
fn verified_transit_rejects_castling_through_attack() -> Result<(), ChessErrors> {
    let config = MatchConfig::default().with_castling_transit(CastlingTransit::Verified);
    let mut game = ChessMatch::from_layout(config, "k4r2/8/8/8/8/8/8/4K2R w")?;
    let before = game.clone();

    assert_eq!(
        game.perform_move(pos("e1"), pos("g1")),
        Err(ChessErrors::SelfCheckViolation)
    );
    assert_eq!(game, before);
    Ok(())
}

#[test]
fn opening_pawn_has_single_and_double_step() -> Result<(), ChessErrors> {
    let mut game = ChessMatch::new();
    let mut destinations = game.legal_destinations(pos("e2"))?;
    destinations.sort();
    assert_eq!(destinations, vec![pos("e3"), pos("e4")]);
    Ok(())
}

#[test]
fn en_passant_is_offered_on_the_next_move() -> Result<(), ChessErrors> {
    let mut game = ChessMatch::new();
    play(&mut game, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")])?;
    assert!(game.legal_destinations(pos("e5"))?.contains(&pos("d6")));

    let captured = game.perform_move(pos("e5"), pos("d6"))?;
    assert_eq!(
        captured,
        Some(PieceDescriptor {
            kind: PieceKind::Pawn,
            color: Color::Black
        })
    );
    assert_eq!(piece_at(&game, "d5"), None);
    assert_eq!(piece_at(&game, "d6"), white(PieceKind::Pawn));
    game.verify_integrity()
}

#[test]
fn black_pawn_takes_en_passant_after_double_step() -> Result<(), ChessErrors> {
    let mut game = ChessMatch::from_layout(MatchConfig::default(), "4k3/8/8/8/3p4/8/4P3/4K3 w")?;
    game.perform_move(pos("e2"), pos("e4"))?;
    assert!(game.legal_destinations(pos("d4"))?.contains(&pos("e3")));

    let captured = game.perform_move(pos("d4"), pos("e3"))?;
    assert_eq!(captured, white(PieceKind::Pawn));
    assert_eq!(piece_at(&game, "e4"), None);
    assert_eq!(
        piece_at(&game, "e3"),
        Some(PieceDescriptor {
            kind: PieceKind::Pawn,
            color: Color::Black
        })
    );
    assert_eq!(game.captured_pieces(), vec![white(PieceKind::Pawn).expect("white pawn")]);
    assert_eq!(game.history()[1].long_algebraic(), "d4e3");
    game.verify_integrity()
}

#[test]
fn en_passant_expires_after_one_move() -> Result<(), ChessErrors> {
    let mut game = ChessMatch::new();
    play(
        &mut game,
        &[
            ("e2", "e4"),
            ("a7", "a6"),
            ("e4", "e5"),
            ("d7", "d5"),
            ("h2", "h3"),
            ("h7", "h6"),
        ],
    )?;
    assert!(!game.legal_destinations(pos("e5"))?.contains(&pos("d6")));
    assert!(matches!(
        game.perform_move(pos("e5"), pos("d6")),
        Err(ChessErrors::IllegalDestination(_))
    ));
    Ok(())
}

#[test]
fn en_passant_can_answer_a_pawn_check() -> Result<(), ChessErrors> {
    // b2-b4 checks the king on a5; every flight square is covered and only
    // c4xb3 en passant removes the checker.
    let mut game = ChessMatch::from_layout(MatchConfig::default(), "1R6/8/7R/k7/2p5/8/1PB5/7K w")?;
    game.perform_move(pos("b2"), pos("b4"))?;

    let status = game.status();
    assert!(status.in_check);
    assert!(!status.in_checkmate, "{}", render_snapshot(&game.board_snapshot()));
    assert_eq!(
        game.legal_destinations(pos("a5")),
        Err(ChessErrors::NoLegalMoves(pos("a5").to_square()))
    );
    assert_eq!(game.legal_destinations(pos("c4"))?, vec![pos("b3")]);

    let captured = game.perform_move(pos("c4"), pos("b3"))?;
    assert_eq!(captured, white(PieceKind::Pawn));
    assert!(!game.status().in_check);
    game.verify_integrity()
}

#[test]
fn promotion_waits_for_a_valid_choice() -> Result<(), ChessErrors> {
    let mut game = ChessMatch::from_layout(MatchConfig::default(), "k7/4P3/8/8/8/8/8/4K3 w")?;
    game.perform_move(pos("e7"), pos("e8"))?;

    // default queen on e8 already checks along the back rank
    assert_eq!(game.pending_promotion(), white(PieceKind::Queen));
    assert!(game.status().in_check);

    let unchanged = game.resolve_promotion("X")?;
    assert_eq!(Some(unchanged), white(PieceKind::Queen));
    assert_eq!(game.pending_promotion(), white(PieceKind::Queen));

    let promoted = game.resolve_promotion("q")?;
    assert_eq!(Some(promoted), white(PieceKind::Queen));
    assert_eq!(game.pending_promotion(), None);
    assert_eq!(game.resolve_promotion("Q"), Err(ChessErrors::NoPendingPromotion));
    game.verify_integrity()
}

#[test]
fn underpromotion_re_evaluates_check() -> Result<(), ChessErrors> {
    let mut game = ChessMatch::from_layout(MatchConfig::default(), "k7/4P3/8/8/8/8/8/4K3 w")?;
    game.perform_move(pos("e7"), pos("e8"))?;
    assert!(game.status().in_check);

    let knight = game.resolve_promotion("N")?;
    assert_eq!(Some(knight), white(PieceKind::Knight));
    assert_eq!(piece_at(&game, "e8"), white(PieceKind::Knight));

    let status = game.status();
    assert!(!status.in_check);
    assert_eq!(status.turn_number, 2);
    assert_eq!(status.active_color, Color::Black);
    assert_eq!(game.history()[0].long_algebraic(), "e7e8n");
    game.verify_integrity()
}

#[test]
fn pending_promotion_clears_on_the_next_move() -> Result<(), ChessErrors> {
    let mut game = ChessMatch::from_layout(MatchConfig::default(), "k7/4P3/8/8/8/8/8/4K3 w")?;
    game.perform_move(pos("e7"), pos("e8"))?;

    // rejected request keeps the slot
    assert!(game.perform_move(pos("a8"), pos("b8")).is_err());
    assert!(game.pending_promotion().is_some());

    game.perform_move(pos("a8"), pos("a7"))?;
    assert_eq!(game.pending_promotion(), None);
    assert_eq!(piece_at(&game, "e8"), white(PieceKind::Queen));
    Ok(())
}

#[test]
fn self_check_is_rolled_back() -> Result<(), ChessErrors> {
    // rook e2 is pinned to its king by the rook on e8
    let mut game = ChessMatch::from_layout(MatchConfig::default(), "k3r3/8/8/8/8/8/4R3/4K3 w")?;
    let before = game.clone();

    assert_eq!(
        game.perform_move(pos("e2"), pos("d2")),
        Err(ChessErrors::SelfCheckViolation)
    );
    assert_eq!(game, before);

    game.perform_move(pos("e2"), pos("e8"))?;
    assert_eq!(game.captured_pieces().len(), 1);
    Ok(())
}

#[test]
fn layout_with_the_idle_king_in_check_is_rejected() {
    // white to move could simply take the black king on e8
    let result = ChessMatch::from_layout(MatchConfig::default(), "4k3/8/8/8/8/8/8/K3R3 w");
    assert!(matches!(result, Err(ChessErrors::InvalidLayout(_))));

    let flipped = ChessMatch::from_layout(MatchConfig::default(), "4k3/8/8/8/8/8/8/K3R3 b")
        .expect("black to move in check is a legal position");
    assert!(flipped.status().in_check);
    assert!(!flipped.status().in_checkmate);
}

#[test]
fn turns_alternate_only_on_success() -> Result<(), ChessErrors> {
    let mut game = ChessMatch::new();
    assert!(game.perform_move(pos("e7"), pos("e5")).is_err());
    assert_eq!(game.status().turn_number, 1);

    game.perform_move(pos("e2"), pos("e4"))?;
    assert_eq!(game.status().turn_number, 2);
    assert_eq!(game.status().active_color, Color::Black);

    assert!(game.perform_move(pos("e4"), pos("e5")).is_err());
    assert_eq!(game.status().turn_number, 2);

    game.perform_move(pos("e7"), pos("e5"))?;
    assert_eq!(game.status().turn_number, 3);
    assert_eq!(game.status().active_color, Color::White);
    Ok(())
}

#[test]
fn fools_mate_ends_the_match() -> Result<(), ChessErrors> {
    let mut game = ChessMatch::new();
    play(&mut game, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")])?;

    let status = game.status();
    assert!(status.in_check);
    assert!(status.in_checkmate);
    assert_eq!(status.turn_number, 4);
    assert_eq!(status.active_color, Color::Black);
    assert!(game.history()[3].checkmate);

    assert_eq!(game.perform_move(pos("a2"), pos("a3")), Err(ChessErrors::MatchTerminated));
    assert!(all_legal_moves(&mut game)?.is_empty());
    assert!(game.status().in_checkmate);
    game.verify_integrity()
}

#[test]
fn execute_then_undo_restores_every_field() -> Result<(), ChessErrors> {
    let mut game = ChessMatch::from_layout(
        MatchConfig::default(),
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w",
    )?;
    play(&mut game, &[("a2", "a4")])?;

    for (from, to) in all_legal_moves(&mut game)? {
        let before = game.clone();
        let undo = execute_move(&mut game, from, to)?;
        undo_move(&mut game, undo)?;
        assert_eq!(game, before, "{from}{to} was not undone exactly");
    }
    Ok(())
}
