//! Errors used throughout the chess match engine.
//!
//! `ChessErrors` is the single error type of the crate. Variants fall in two
//! classes:
//! - recoverable user-input errors (bad source square, illegal destination,
//!   self-check, ...). The match state is unchanged when one of these is
//!   returned and the message is suitable for showing to a player;
//! - invariant violations (missing king, grid/position mismatch, placing on an
//!   occupied square). These indicate an engine bug, never bad input, and
//!   callers should let them propagate and halt.
//!
//! Use `ChessErrors::is_recoverable` to tell the two classes apart.

use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::SquarePosition;

/// Unified error type for the chess match engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// The source square holds no piece.
    NoPieceAtSource(SquarePosition),

    /// The source piece belongs to the side not on move.
    WrongOwner(SquarePosition),

    /// The source piece has no move that keeps its own king safe.
    NoLegalMoves(SquarePosition),

    /// The destination is not reachable by the source piece.
    ///
    /// Payload: (source, destination)
    IllegalDestination((SquarePosition, SquarePosition)),

    /// The move would leave the mover's own king attacked. The move has been
    /// rolled back before this is reported.
    SelfCheckViolation,

    /// `resolve_promotion` was called with no promotion pending.
    NoPendingPromotion,

    /// The match already ended in checkmate.
    MatchTerminated,

    /// A user-facing coordinate could not be parsed (valid range a1..h8).
    InvalidBoardPosition(String),

    /// A board layout string is malformed.
    InvalidLayout(String),

    /// A `MatchConfig` field holds an unusable value.
    InvalidConfig(String),

    /// Tried to place a piece on an occupied square.
    SquareOccupied(SquarePosition),

    /// A square outside the 8x8 grid was addressed.
    OutOfBounds(SquarePosition),

    /// Internal state is corrupted (for example a side has no king). Never
    /// caused by caller input.
    InvariantViolation(String),
}

impl ChessErrors {
    /// `true` for expected, user-input failures that leave the match intact.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ChessErrors::NoPieceAtSource(_)
            | ChessErrors::WrongOwner(_)
            | ChessErrors::NoLegalMoves(_)
            | ChessErrors::IllegalDestination(_)
            | ChessErrors::SelfCheckViolation
            | ChessErrors::NoPendingPromotion
            | ChessErrors::MatchTerminated
            | ChessErrors::InvalidBoardPosition(_)
            | ChessErrors::InvalidLayout(_)
            | ChessErrors::InvalidConfig(_) => true,
            ChessErrors::SquareOccupied(_)
            | ChessErrors::OutOfBounds(_)
            | ChessErrors::InvariantViolation(_) => false,
        }
    }
}

impl fmt::Display for ChessErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessErrors::NoPieceAtSource(square) => {
                write!(f, "there is no piece on source position {square}")
            }
            ChessErrors::WrongOwner(square) => {
                write!(f, "the chosen piece on {square} is not yours")
            }
            ChessErrors::NoLegalMoves(square) => {
                write!(f, "there are no possible moves for the chosen piece on {square}")
            }
            ChessErrors::IllegalDestination((from, to)) => {
                write!(f, "the chosen piece on {from} cannot move to {to}")
            }
            ChessErrors::SelfCheckViolation => write!(f, "you can't put yourself in check"),
            ChessErrors::NoPendingPromotion => write!(f, "there is no piece to be promoted"),
            ChessErrors::MatchTerminated => write!(f, "the match is over (checkmate)"),
            ChessErrors::InvalidBoardPosition(text) => write!(
                f,
                "invalid board position '{text}': valid values are from a1 to h8"
            ),
            ChessErrors::InvalidLayout(msg) => write!(f, "invalid board layout: {msg}"),
            ChessErrors::InvalidConfig(msg) => write!(f, "invalid match configuration: {msg}"),
            ChessErrors::SquareOccupied(square) => {
                write!(f, "there is already a piece on position {square}")
            }
            ChessErrors::OutOfBounds(square) => write!(f, "position {square} not on the board"),
            ChessErrors::InvariantViolation(msg) => write!(f, "engine invariant violated: {msg}"),
        }
    }
}

impl Error for ChessErrors {}
