//! Crate root module declarations for the chess match engine.
//!
//! Exposes the match state machine, the per-piece candidate generators, the
//! legality layer built on execute/undo, and the diagnostic utilities
//! (coordinates, layouts, rendering, tracing, random self-play) so binaries,
//! benches and front ends can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_match;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod grid;
    pub mod match_config;
    pub mod move_record;
    pub mod piece;
    pub mod undo_state;

    #[cfg(test)]
    mod match_scenarios;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_shared;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod utils {
    pub mod algebraic;
    pub mod layout_generator;
    pub mod layout_parser;
    pub mod match_trace;
    pub mod random_match_harness;
    pub mod render_game_state;
}
