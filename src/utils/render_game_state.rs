//! Terminal-oriented Unicode board renderer.
//!
//! Builds a human-readable view of a board snapshot for debugging, test
//! failure messages and diagnostics in text environments.

use crate::game_state::chess_match::ChessMatch;
use crate::game_state::chess_types::*;

pub type BoardSnapshot = [[Option<PieceDescriptor>; BOARD_COLUMNS as usize]; BOARD_ROWS as usize];

/// Render a snapshot with rank 8 on top, as seen from White's side.
pub fn render_snapshot(snapshot: &BoardSnapshot) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for (row, cells) in snapshot.iter().enumerate() {
        let rank = char::from(b'8' - row as u8);
        out.push(rank);
        out.push(' ');

        for (column, cell) in cells.iter().enumerate() {
            match cell {
                Some(descriptor) => out.push(piece_to_unicode(descriptor.color, descriptor.kind)),
                None => out.push('·'),
            }

            if column + 1 < cells.len() {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

/// Board plus a status line.
pub fn render_match(game: &ChessMatch) -> String {
    let status = game.status();
    let mut out = render_snapshot(&game.board_snapshot());
    out.push_str(&format!(
        "\nturn {} {} to move{}",
        status.turn_number,
        status.active_color,
        if status.in_checkmate {
            " (checkmate)"
        } else if status.in_check {
            " (check)"
        } else {
            ""
        }
    ));
    out
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}
