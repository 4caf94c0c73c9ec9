//! Conversions between user-facing board positions (`e4`) and internal
//! square positions.
//!
//! `row = 8 - rank` and `column = file - 'a'`, so row 0 is rank 8. The
//! conversion is purely presentational.

use std::fmt;
use std::str::FromStr;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::{SquarePosition, BOARD_ROWS};

/// File letter `a..=h` plus rank `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardPosition {
    file: char,
    rank: u8,
}

impl BoardPosition {
    pub fn new(file: char, rank: u8) -> Result<Self, ChessErrors> {
        if !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
            return Err(ChessErrors::InvalidBoardPosition(format!("{file}{rank}")));
        }
        Ok(BoardPosition { file, rank })
    }

    #[inline]
    pub fn file(&self) -> char {
        self.file
    }

    #[inline]
    pub fn rank(&self) -> u8 {
        self.rank
    }

    #[inline]
    pub fn to_square(self) -> SquarePosition {
        SquarePosition {
            row: BOARD_ROWS - self.rank,
            column: self.file as u8 - b'a',
        }
    }

    pub fn from_square(square: SquarePosition) -> Result<Self, ChessErrors> {
        if !square.is_on_board() {
            return Err(ChessErrors::OutOfBounds(square));
        }
        BoardPosition::new(char::from(b'a' + square.column), BOARD_ROWS - square.row)
    }
}

impl FromStr for BoardPosition {
    type Err = ChessErrors;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        algebraic_to_square(text).and_then(BoardPosition::from_square)
    }
}

impl fmt::Display for BoardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

impl From<BoardPosition> for SquarePosition {
    fn from(position: BoardPosition) -> Self {
        position.to_square()
    }
}

/// Convert a coordinate such as `"e4"` to a square position. Surrounding
/// whitespace is ignored; anything else outside `a1..h8` is rejected.
pub fn algebraic_to_square(text: &str) -> Result<SquarePosition, ChessErrors> {
    let trimmed = text.trim();
    let bytes = trimmed.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidBoardPosition(text.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidBoardPosition(text.to_owned()));
    }

    Ok(SquarePosition {
        row: BOARD_ROWS - (rank - b'0'),
        column: file - b'a',
    })
}

/// Convert an on-board square position to its coordinate text.
pub fn square_to_algebraic(square: SquarePosition) -> Result<String, ChessErrors> {
    Ok(BoardPosition::from_square(square)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_conversions() {
        assert_eq!(
            algebraic_to_square("a8").expect("a8 should parse"),
            SquarePosition { row: 0, column: 0 }
        );
        assert_eq!(
            algebraic_to_square("h1").expect("h1 should parse"),
            SquarePosition { row: 7, column: 7 }
        );
        assert_eq!(
            square_to_algebraic(SquarePosition { row: 4, column: 4 }).expect("e4 converts"),
            "e4"
        );
    }

    #[test]
    fn parse_rejects_out_of_range_text() {
        for bad in ["i1", "a9", "a0", "e", "e44", "E4", ""] {
            assert!(
                matches!(bad.parse::<BoardPosition>(), Err(ChessErrors::InvalidBoardPosition(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn board_position_maps_rank_to_row() {
        let e2: BoardPosition = "e2".parse().expect("e2 should parse");
        assert_eq!(e2.file(), 'e');
        assert_eq!(e2.rank(), 2);
        assert_eq!(e2.to_square(), SquarePosition { row: 6, column: 4 });
        assert_eq!(e2.to_string(), "e2");
    }

    #[test]
    fn off_board_square_has_no_board_position() {
        assert!(matches!(
            BoardPosition::from_square(SquarePosition { row: 8, column: 1 }),
            Err(ChessErrors::OutOfBounds(_))
        ));
    }
}
