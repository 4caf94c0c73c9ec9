//! Match orchestrator.
//!
//! `ChessMatch` owns the grid and every piece of match state: turn number,
//! active color, check and checkmate flags, the en-passant slot, the pending
//! promotion, captured pieces and the move history. All mutation goes through
//! `perform_move` and `resolve_promotion`; legality tests use scoped
//! execute/undo so a rejected request leaves the match exactly as it was.

use std::collections::HashSet;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::FIRST_TURN;
use crate::game_state::chess_types::*;
use crate::game_state::grid::Grid;
use crate::game_state::match_config::MatchConfig;
use crate::game_state::move_record::MoveRecord;
use crate::game_state::piece::Piece;
use crate::game_state::undo_state::SpecialMove;
use crate::move_generation::legal_move_apply::{execute_move, undo_move};
use crate::move_generation::legal_move_checks::is_attacked;
use crate::move_generation::legal_move_generator::{
    candidate_destinations, is_checkmate, legal_destinations_from,
};
use crate::moves::move_shared::MoveContext;
use crate::utils::algebraic::BoardPosition;
use crate::utils::layout_generator::generate_layout;
use crate::utils::layout_parser::parse_layout;
use crate::utils::match_trace;

/// Read-only summary handed to front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchStatus {
    pub turn_number: u32,
    pub active_color: Color,
    pub in_check: bool,
    pub in_checkmate: bool,
}

/// A pawn that reached its last row and may still be re-chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingPromotion {
    pub square: SquarePosition,
    pub color: Color,
    /// Turn number of the promoting move, needed to re-settle the status.
    pub turn: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessMatch {
    pub(crate) config: MatchConfig,

    // --- Board ---
    pub(crate) grid: Grid,
    pub(crate) captured: Vec<Piece>,

    // --- Side and state flags ---
    pub(crate) turn: u32,
    pub(crate) current_player: Color,
    /// The side on move is in check, or after checkmate the mated side is.
    pub(crate) check: bool,
    pub(crate) checkmate: bool,

    // --- One-move slots ---
    pub(crate) en_passant: Option<PieceId>,
    pub(crate) promoted: Option<PendingPromotion>,

    pub(crate) history: Vec<MoveRecord>,
    next_piece_id: PieceId,
}

impl Default for ChessMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessMatch {
    /// Standard game with default configuration.
    pub fn new() -> Self {
        Self::from_config(MatchConfig::default()).expect("standard layout should always set up")
    }

    pub fn from_config(config: MatchConfig) -> Result<Self, ChessErrors> {
        let layout = config.setup.layout();
        Self::from_layout(config, layout)
    }

    /// Start a match from a placement layout such as `"4k3/8/8/8/8/8/8/4K2R w"`.
    ///
    /// Every piece starts with `move_count == 0`, so castling and the pawn
    /// double step are available wherever the geometry allows them.
    pub fn from_layout(config: MatchConfig, layout: &str) -> Result<Self, ChessErrors> {
        if !config.default_promotion.is_promotion_target() {
            return Err(ChessErrors::InvalidConfig(format!(
                "default promotion must be R, N, B or Q, got {}",
                config.default_promotion.letter()
            )));
        }

        let parsed = parse_layout(layout)?;
        for color in [Color::White, Color::Black] {
            let kings = parsed
                .placements
                .iter()
                .filter(|p| p.kind == PieceKind::King && p.color == color)
                .count();
            if kings != 1 {
                return Err(ChessErrors::InvalidLayout(format!(
                    "expected exactly one {color} king, found {kings}"
                )));
            }
        }

        let mut game = ChessMatch {
            config,
            grid: Grid::new(),
            captured: Vec::new(),
            turn: FIRST_TURN,
            current_player: parsed.active_color,
            check: false,
            checkmate: false,
            en_passant: None,
            promoted: None,
            history: Vec::new(),
            next_piece_id: 0,
        };

        for placement in parsed.placements {
            let piece = game.new_piece(placement.kind, placement.color);
            game.grid
                .place(piece, placement.square)
                .map_err(|_| ChessErrors::InvalidLayout(format!("square {} used twice", placement.square)))?;
        }

        let active = game.current_player;
        if is_attacked(&game.grid, active.opposite(), &game.attack_context())? {
            return Err(ChessErrors::InvalidLayout(format!(
                "{} king is already attacked while {active} is to move",
                active.opposite()
            )));
        }
        game.check =is_attacked(&game.grid, active, &game.attack_context())?;
        let mated = game.check && is_checkmate(&mut game, active)?;
        game.checkmate = mated;
        if mated {
            // A finished match names the side that delivered mate.
            game.current_player = active.opposite();
        }

        match_trace::event("match_start", || {
            format!("layout={} check={} checkmate={}", game.layout(), game.check, game.checkmate)
        });
        Ok(game)
    }

    fn new_piece(&mut self, kind: PieceKind, color: Color) -> Piece {
        let id = self.next_piece_id;
        self.next_piece_id += 1;
        Piece::new(id, kind, color)
    }

    /// Generator context for `color`'s own moves.
    pub(crate) fn move_context(&self, color: Color) -> MoveContext {
        MoveContext {
            en_passant: self.en_passant,
            in_check: color == self.current_player && self.check,
        }
    }

    /// Context for attack detection. Castling never attacks, so `in_check`
    /// does not matter here.
    pub(crate) fn attack_context(&self) -> MoveContext {
        MoveContext {
            en_passant: self.en_passant,
            in_check: false,
        }
    }

    #[inline]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> MatchStatus {
        MatchStatus {
            turn_number: self.turn,
            active_color: self.current_player,
            in_check: self.check,
            in_checkmate: self.checkmate,
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.checkmate
    }

    /// Descriptor per square, indexed `[row][column]` with row 0 = rank 8.
    pub fn board_snapshot(&self) -> [[Option<PieceDescriptor>; BOARD_COLUMNS as usize]; BOARD_ROWS as usize] {
        let mut snapshot = [[None; BOARD_COLUMNS as usize]; BOARD_ROWS as usize];
        for (square, piece) in self.grid.occupied_cells() {
            snapshot[square.row as usize][square.column as usize] = Some(piece.descriptor());
        }
        snapshot
    }

    /// Placement layout plus side to move, readable by `from_layout`.
    pub fn layout(&self) -> String {
        generate_layout(&self.grid, self.current_player)
    }

    /// Captured pieces in capture order.
    pub fn captured_pieces(&self) -> Vec<PieceDescriptor> {
        self.captured.iter().map(Piece::descriptor).collect()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The piece standing on the promotion square while a promotion is
    /// pending (the default kind until resolved).
    pub fn pending_promotion(&self) -> Option<PieceDescriptor> {
        let pending = self.promoted?;
        self.grid
            .occupant_at(pending.square)
            .ok()
            .flatten()
            .map(Piece::descriptor)
    }

    fn ensure_in_progress(&self) -> Result<(), ChessErrors> {
        if self.checkmate {
            return Err(ChessErrors::MatchTerminated);
        }
        Ok(())
    }

    fn validate_source(&mut self, from: SquarePosition) -> Result<(Piece, SquareSet), ChessErrors> {
        self.ensure_in_progress()?;
        let piece = *self
            .grid
            .occupant_at(from)?
            .ok_or(ChessErrors::NoPieceAtSource(from))?;
        if piece.color != self.current_player {
            return Err(ChessErrors::WrongOwner(from));
        }
        let legal = legal_destinations_from(self, from)?;
        if legal.is_empty() {
            return Err(ChessErrors::NoLegalMoves(from));
        }
        Ok((piece, legal))
    }

    pub fn legal_destinations(&mut self, source: BoardPosition) -> Result<Vec<BoardPosition>, ChessErrors> {
        self.legal_destinations_at(source.to_square())?
            .iter()
            .map(BoardPosition::from_square)
            .collect()
    }

    /// Destinations of the piece on `from` that keep its king safe.
    pub fn legal_destinations_at(&mut self, from: SquarePosition) -> Result<SquareSet, ChessErrors> {
        let (_, legal) = self.validate_source(from)?;
        Ok(legal)
    }

    pub fn perform_move(
        &mut self,
        source: BoardPosition,
        destination: BoardPosition,
    ) -> Result<Option<PieceDescriptor>, ChessErrors> {
        self.perform_move_at(source.to_square(), destination.to_square())
    }

    /// Validate and execute `from -> to`, returning the captured piece if any.
    ///
    /// On any error the match is unchanged.
    pub fn perform_move_at(
        &mut self,
        from: SquarePosition,
        to: SquarePosition,
    ) -> Result<Option<PieceDescriptor>, ChessErrors> {
        let (piece, legal) = self.validate_source(from)?;
        if !candidate_destinations(self, from)?.contains(to) {
            return Err(ChessErrors::IllegalDestination((from, to)));
        }

        let undo = execute_move(self, from, to)?;
        let exposed = is_attacked(&self.grid, piece.color, &self.attack_context())?;
        // Legal set also excludes castling through an attacked square.
        if exposed || !legal.contains(to) {
            undo_move(self, undo)?;
            match_trace::event("rollback", || format!("{from}{to} would expose the {} king", piece.color));
            return Err(ChessErrors::SelfCheckViolation);
        }

        self.promoted = None;
        let captured = undo
            .captured_square
            .and_then(|_| self.captured.last())
            .map(Piece::descriptor);

        let mut promotion = None;
        if piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row() {
            let kind = self.config.default_promotion;
            self.replace_piece(to, kind)?;
            self.promoted = Some(PendingPromotion {
                square: to,
                color: piece.color,
                turn: self.turn,
            });
            promotion = Some(kind);
            match_trace::event("promotion", || format!("{to} becomes {kind:?} pending choice"));
        }

        // Set before the checkmate search so en passant counts as an escape.
        self.en_passant = match undo.special {
            Some(SpecialMove::DoublePawnPush) => Some(piece.id),
            _ => None,
        };

        let move_turn = self.turn;
        self.history.push(MoveRecord {
            turn: move_turn,
            color: piece.color,
            piece: piece.kind,
            from,
            to,
            captured,
            special: undo.special,
            promotion,
            gives_check: false,
            checkmate: false,
        });
        self.settle_status(piece.color, move_turn)?;

        match_trace::event("move", || {
            format!(
                "turn={move_turn} {} {from}{to} captured={:?} check={} checkmate={}",
                piece.color, captured, self.check, self.checkmate
            )
        });
        Ok(captured)
    }

    /// Swap the pending promotion piece for the kind named by `kind`
    /// (`R`, `N`, `B` or `Q`, any case).
    ///
    /// An unknown letter returns the current piece and keeps the promotion
    /// pending so the caller can ask again.
    pub fn resolve_promotion(&mut self, kind: &str) -> Result<PieceDescriptor, ChessErrors> {
        let pending = self.promoted.ok_or(ChessErrors::NoPendingPromotion)?;
        let current = self
            .grid
            .occupant_at(pending.square)?
            .map(Piece::descriptor)
            .ok_or_else(|| {
                ChessErrors::InvariantViolation(format!(
                    "pending promotion square {} is empty",
                    pending.square
                ))
            })?;

        let Some(new_kind) = PieceKind::from_promotion_letter(kind) else {
            match_trace::event("promotion", || format!("rejected choice '{kind}'"));
            return Ok(current);
        };

        let promoted = self.replace_piece(pending.square, new_kind)?;
        self.promoted = None;
        if let Some(last) = self.history.last_mut() {
            last.promotion = Some(new_kind);
        }
        self.settle_status(pending.color, pending.turn)?;

        match_trace::event("promotion", || {
            format!("{} resolved to {new_kind:?} check={}", pending.square, self.check)
        });
        Ok(promoted)
    }

    /// Put a fresh piece of `kind` where the current occupant stands. The new
    /// piece keeps the move counter of the one it replaces.
    fn replace_piece(&mut self, square: SquarePosition, kind: PieceKind) -> Result<PieceDescriptor, ChessErrors> {
        let old = self.grid.remove(square)?.ok_or_else(|| {
            ChessErrors::InvariantViolation(format!("no piece to replace on {square}"))
        })?;
        let mut replacement = self.new_piece(kind, old.color);
        replacement.move_count = old.move_count;
        self.grid.place(replacement, square)?;
        Ok(replacement.descriptor())
    }

    /// Recompute check and checkmate for the opponent of `mover` and advance
    /// the turn unless the move mated.
    fn settle_status(&mut self, mover: Color, move_turn: u32) -> Result<(), ChessErrors> {
        let opponent = mover.opposite();
        let check = is_attacked(&self.grid, opponent, &self.attack_context())?;
        let mated = check && is_checkmate(self, opponent)?;

        self.check = check;
        self.checkmate = mated;
        if mated {
            self.turn = move_turn;
            self.current_player = mover;
        } else {
            self.turn = move_turn + 1;
            self.current_player = opponent;
        }

        if let Some(last) = self.history.last_mut() {
            last.gives_check = check;
            last.checkmate = mated;
        }
        if check {
            match_trace::event("check", || format!("{opponent} king attacked, checkmate={mated}"));
        }
        Ok(())
    }

    /// Cross-check the structural invariants: each placed piece records the
    /// cell holding it, captured pieces are detached, ids are unique, each
    /// side has one king and the one-move slots point at sensible pieces.
    pub fn verify_integrity(&self) -> Result<(), ChessErrors> {
        let mut seen_ids = HashSet::new();
        let mut kings = [0usize; 2];

        for (square, piece) in self.grid.occupied_cells() {
            if piece.position != Some(square) {
                return Err(ChessErrors::InvariantViolation(format!(
                    "piece {} on {square} records position {:?}",
                    piece.id, piece.position
                )));
            }
            if !seen_ids.insert(piece.id) {
                return Err(ChessErrors::InvariantViolation(format!("duplicate piece id {}", piece.id)));
            }
            if piece.kind == PieceKind::King {
                kings[piece.color.index()] += 1;
            }
        }

        for piece in &self.captured {
            if piece.position.is_some() {
                return Err(ChessErrors::InvariantViolation(format!(
                    "captured piece {} still records a position",
                    piece.id
                )));
            }
            if !seen_ids.insert(piece.id) {
                return Err(ChessErrors::InvariantViolation(format!(
                    "captured piece {} is also on the board",
                    piece.id
                )));
            }
        }

        if kings != [1, 1] {
            return Err(ChessErrors::InvariantViolation(format!(
                "expected one king per side, found white={} black={}",
                kings[0], kings[1]
            )));
        }

        if let Some(id) = self.en_passant {
            let is_pawn = self.grid.pieces().any(|p| p.id == id && p.kind == PieceKind::Pawn);
            if !is_pawn {
                return Err(ChessErrors::InvariantViolation(format!(
                    "en passant slot names piece {id} which is not a pawn on the board"
                )));
            }
        }

        if let Some(pending) = self.promoted {
            match self.grid.occupant_at(pending.square)? {
                Some(p) if p.color == pending.color && p.kind.is_promotion_target() => {}
                other => {
                    return Err(ChessErrors::InvariantViolation(format!(
                        "pending promotion on {} holds {:?}",
                        pending.square,
                        other.map(Piece::descriptor)
                    )))
                }
            }
        }

        let watched = if self.checkmate {
            self.current_player.opposite()
        } else {
            self.current_player
        };
        if self.check != is_attacked(&self.grid, watched, &self.attack_context())? {
            return Err(ChessErrors::InvariantViolation(format!(
                "check flag {} disagrees with the board",
                self.check
            )));
        }
        if self.checkmate && !self.check {
            return Err(ChessErrors::InvariantViolation("checkmate without check".to_owned()));
        }
        if self.turn < FIRST_TURN {
            return Err(ChessErrors::InvariantViolation(format!("turn number {}", self.turn)));
        }
        Ok(())
    }
}
