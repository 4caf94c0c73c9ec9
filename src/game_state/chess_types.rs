//! Core value types shared by the grid, the per-piece move generators and the
//! match state machine.
//!
//! Squares are addressed internally as zero-based `(row, column)` pairs with
//! row 0 holding rank 8, so White pawns advance towards row 0.

use std::fmt;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::PROMOTION_KINDS;

/// Number of rows on the board.
pub const BOARD_ROWS: u8 = 8;
/// Number of columns on the board.
pub const BOARD_COLUMNS: u8 = 8;

/// Side owning a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn advance.
    #[inline]
    pub const fn forward_step(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row the pawns of this color start on.
    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Farthest row for this color's pawns.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Row a pawn of this color must stand on to capture en passant, i.e. the
    /// row next to the opponent's double-step landing row.
    #[inline]
    pub const fn en_passant_row(self) -> u8 {
        match self {
            Color::White => 3,
            Color::Black => 4,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "WHITE"),
            Color::Black => write!(f, "BLACK"),
        }
    }
}

/// Piece variant. The set is closed so every dispatch is an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Upper-case letter used by layouts and the renderer.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Promotion choice from its one-letter form (`R`, `N`, `B`, `Q`, any case).
    pub fn from_promotion_letter(letter: &str) -> Option<PieceKind> {
        let mut chars = letter.trim().chars();
        let first = chars.next()?.to_ascii_uppercase();
        if chars.next().is_some() {
            return None;
        }
        PROMOTION_KINDS.into_iter().find(|kind| kind.letter() == first)
    }

    #[inline]
    pub fn is_promotion_target(self) -> bool {
        PROMOTION_KINDS.contains(&self)
    }
}

/// Identity of a piece for the lifetime of a match.
pub type PieceId = u32;

/// Zero-based internal coordinate. Fields are public, so a value may lie off
/// the board; the grid rejects such squares with `ChessErrors::OutOfBounds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SquarePosition {
    pub row: u8,
    pub column: u8,
}

impl SquarePosition {
    pub fn new(row: u8, column: u8) -> Result<Self, ChessErrors> {
        let square = SquarePosition { row, column };
        if row >= BOARD_ROWS || column >= BOARD_COLUMNS {
            return Err(ChessErrors::OutOfBounds(square));
        }
        Ok(square)
    }

    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.row < BOARD_ROWS && self.column < BOARD_COLUMNS
    }

    /// Bit index used by `SquareSet` (`row * 8 + column`).
    #[inline]
    pub const fn index(self) -> usize {
        (self.row as usize) * (BOARD_COLUMNS as usize) + self.column as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        SquarePosition {
            row: (index / BOARD_COLUMNS as usize) as u8,
            column: (index % BOARD_COLUMNS as usize) as u8,
        }
    }
}

impl fmt::Display for SquarePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            let file = char::from(b'a' + self.column);
            let rank = BOARD_ROWS - self.row;
            write!(f, "{file}{rank}")
        } else {
            write!(f, "({}, {})", self.row, self.column)
        }
    }
}

/// Set of on-board squares packed one bit per square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    #[inline]
    pub const fn empty() -> Self {
        SquareSet(0)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn insert(&mut self, square: SquarePosition) {
        if square.is_on_board() {
            self.0 |= 1u64 << square.index();
        }
    }

    #[inline]
    pub fn remove(&mut self, square: SquarePosition) {
        if square.is_on_board() {
            self.0 &= !(1u64 << square.index());
        }
    }

    #[inline]
    pub fn contains(self, square: SquarePosition) -> bool {
        square.is_on_board() && (self.0 & (1u64 << square.index())) != 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn union(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 | other.0)
    }

    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

impl FromIterator<SquarePosition> for SquareSet {
    fn from_iter<T: IntoIterator<Item = SquarePosition>>(iter: T) -> Self {
        let mut set = SquareSet::empty();
        for square in iter {
            set.insert(square);
        }
        set
    }
}

impl IntoIterator for SquareSet {
    type Item = SquarePosition;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterates squares in ascending bit order (a8, b8, ... h1).
pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = SquarePosition;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(SquarePosition::from_index(index))
    }
}

/// Read-only view of a piece handed to callers outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceDescriptor {
    pub kind: PieceKind,
    pub color: Color,
}

impl fmt::Display for PieceDescriptor {
    /// White pieces print upper case, Black pieces lower case.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.kind.letter();
        match self.color {
            Color::White => write!(f, "{letter}"),
            Color::Black => write!(f, "{}", letter.to_ascii_lowercase()),
        }
    }
}
