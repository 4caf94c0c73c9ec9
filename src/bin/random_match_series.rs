//! Standalone random self-play series runner.
//!
//! Run with:
//! `cargo run --release --bin random_match_series`
//! `cargo run --release --bin random_match_series -- --verbose`
//!
//! The match setup follows `CHESS_MATCH_SETUP` / `CHESS_MATCH_CASTLING`.

use chess_match::chess_errors::ChessErrors;
use chess_match::game_state::match_config::MatchConfig;
use chess_match::utils::random_match_harness::{
    play_random_match_series, RandomMatchConfig, RandomSeriesConfig,
};

fn main() -> Result<(), ChessErrors> {
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");

    let stats = play_random_match_series(&RandomSeriesConfig {
        games: 20,
        base_seed: 1234,
        per_game: RandomMatchConfig {
            max_plies: 300,
            match_config: MatchConfig::from_env(),
            ..RandomMatchConfig::default()
        },
        verbose,
    })?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
