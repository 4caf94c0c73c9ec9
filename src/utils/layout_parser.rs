//! Board layout parser.
//!
//! Reads the piece-placement field of Forsyth-Edwards Notation, optionally
//! followed by the side to move (`w` or `b`, default `w`):
//! `"4k3/8/8/8/8/8/8/4K2R w"`. Used for starting setups and test fixtures.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::*;

/// One piece to put on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub square: SquarePosition,
    pub kind: PieceKind,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub placements: Vec<Placement>,
    pub active_color: Color,
}

pub fn parse_layout(layout: &str) -> Result<Layout, ChessErrors> {
    let mut parts = layout.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| ChessErrors::InvalidLayout("missing piece placement".to_owned()))?;
    let active_color = match parts.next() {
        None => Color::White,
        Some(side) => parse_side_to_move(side)?,
    };

    if parts.next().is_some() {
        return Err(ChessErrors::InvalidLayout(
            "layout has extra trailing fields".to_owned(),
        ));
    }

    Ok(Layout {
        placements: parse_board(board_part)?,
        active_color,
    })
}

fn parse_board(board_part: &str) -> Result<Vec<Placement>, ChessErrors> {
    let rows: Vec<&str> = board_part.split('/').collect();
    if rows.len() != BOARD_ROWS as usize {
        return Err(ChessErrors::InvalidLayout(format!(
            "board layout must contain {BOARD_ROWS} ranks, found {}",
            rows.len()
        )));
    }

    let mut placements = Vec::new();
    for (row, row_str) in rows.iter().enumerate() {
        let mut column = 0u8;

        for ch in row_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidLayout(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                column += empty_count as u8;
                if column > BOARD_COLUMNS {
                    return Err(ChessErrors::InvalidLayout(format!(
                        "rank '{row_str}' has too many files"
                    )));
                }
                continue;
            }

            let (color, kind) = piece_from_layout_char(ch).ok_or_else(|| {
                ChessErrors::InvalidLayout(format!("invalid piece character '{ch}'"))
            })?;
            if column >= BOARD_COLUMNS {
                return Err(ChessErrors::InvalidLayout(format!(
                    "rank '{row_str}' has too many files"
                )));
            }
            placements.push(Placement {
                square: SquarePosition {
                    row: row as u8,
                    column,
                },
                kind,
                color,
            });
            column += 1;
        }

        if column != BOARD_COLUMNS {
            return Err(ChessErrors::InvalidLayout(format!(
                "rank '{row_str}' does not sum to {BOARD_COLUMNS} files"
            )));
        }
    }

    Ok(placements)
}

fn parse_side_to_move(side: &str) -> Result<Color, ChessErrors> {
    match side {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessErrors::InvalidLayout(format!(
            "invalid side-to-move field: {side}"
        ))),
    }
}

pub fn piece_from_layout_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, kind))
}
