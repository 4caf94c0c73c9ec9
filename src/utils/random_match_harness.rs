//! Seeded random self-play harness for local testing.
//!
//! Drives `ChessMatch` through its public API with uniformly random legal
//! moves, occasionally throws a raw (possibly self-checking) candidate at it
//! and checks that rejected requests leave the match untouched. The match's
//! structural invariants are verified after every ply.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_match::ChessMatch;
use crate::game_state::chess_types::{Color, SquarePosition};
use crate::game_state::match_config::MatchConfig;
use crate::move_generation::legal_move_generator::{all_legal_moves, candidate_destinations};
use crate::utils::algebraic::BoardPosition;

const PROMOTION_CHOICES: [&str; 5] = ["Q", "R", "B", "N", "x"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomMatchOutcome {
    Checkmate { winner: Color },
    /// Side on move has no legal move and is not in check.
    NoLegalMoves { stuck: Color },
    PlyLimit,
}

#[derive(Debug, Clone)]
pub struct RandomMatchConfig {
    pub max_plies: u16,
    /// Chance per ply of first trying a raw candidate that may be illegal.
    pub probe_rate: f64,
    pub match_config: MatchConfig,
}

impl Default for RandomMatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            probe_rate: 0.25,
            match_config: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RandomMatchResult {
    pub outcome: RandomMatchOutcome,
    pub final_match: ChessMatch,
    pub played_moves_lan: Vec<String>,
    pub plies: u32,
    pub rejected_probes: u32,
    pub promotions: u32,
}

#[derive(Debug, Clone)]
pub struct RandomSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: RandomMatchConfig,
    pub verbose: bool,
}

impl Default for RandomSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: RandomMatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RandomSeriesStats {
    pub games: u16,
    pub white_wins: u16,
    pub black_wins: u16,
    pub stalemates: u16,
    pub ply_limits: u16,
    pub total_plies: u64,
    pub rejected_probes: u64,
    pub promotions: u64,
    pub outcomes: Vec<RandomMatchOutcome>,
}

impl RandomSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} white_wins={} black_wins={} stalemates={} ply_limits={} avg_plies={:.1} rejected_probes={} promotions={}",
            self.games,
            self.white_wins,
            self.black_wins,
            self.stalemates,
            self.ply_limits,
            avg_plies(self.total_plies, self.games),
            self.rejected_probes,
            self.promotions
        )
    }
}

#[inline]
fn avg_plies(total: u64, games: u16) -> f64 {
    if games == 0 {
        0.0
    } else {
        total as f64 / f64::from(games)
    }
}

fn board(square: SquarePosition) -> Result<BoardPosition, ChessErrors> {
    BoardPosition::from_square(square)
}

/// Play one seeded random match to completion or the ply limit.
pub fn play_random_match(seed: u64, config: &RandomMatchConfig) -> Result<RandomMatchResult, ChessErrors> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = ChessMatch::from_config(config.match_config.clone())?;
    let mut played_moves_lan = Vec::new();
    let mut rejected_probes = 0u32;
    let mut promotions = 0u32;

    for _ in 0..config.max_plies {
        if game.is_over() {
            break;
        }

        let legal_moves = all_legal_moves(&mut game)?;
        if legal_moves.is_empty() {
            return Ok(RandomMatchResult {
                outcome: RandomMatchOutcome::NoLegalMoves {
                    stuck: game.status().active_color,
                },
                plies: played_moves_lan.len() as u32,
                final_match: game,
                played_moves_lan,
                rejected_probes,
                promotions,
            });
        }

        if rng.random_bool(config.probe_rate) && probe_raw_candidate(&mut game, &mut rng)? {
            rejected_probes += 1;
        }

        let (from, to) = legal_moves[rng.random_range(0..legal_moves.len())];
        game.perform_move(board(from)?, board(to)?)?;

        if game.pending_promotion().is_some() {
            promotions += 1;
            let choice = PROMOTION_CHOICES[rng.random_range(0..PROMOTION_CHOICES.len())];
            game.resolve_promotion(choice)?;
        }

        game.verify_integrity()?;
        if let Some(record) = game.history().last() {
            played_moves_lan.push(record.long_algebraic());
        }
    }

    let outcome = if game.is_over() {
        RandomMatchOutcome::Checkmate {
            winner: game.status().active_color,
        }
    } else {
        RandomMatchOutcome::PlyLimit
    };

    Ok(RandomMatchResult {
        outcome,
        plies: played_moves_lan.len() as u32,
        final_match: game,
        played_moves_lan,
        rejected_probes,
        promotions,
    })
}

/// Try a random raw candidate of the side on move when it is not legal.
/// Returns whether a rejected request was exercised.
fn probe_raw_candidate(game: &mut ChessMatch, rng: &mut StdRng) -> Result<bool, ChessErrors> {
    let color = game.status().active_color;
    let sources: Vec<SquarePosition> = game
        .grid()
        .occupied_cells()
        .filter(|(_, piece)| piece.color == color)
        .map(|(square, _)| square)
        .collect();
    let from = sources[rng.random_range(0..sources.len())];
    let candidates: Vec<SquarePosition> = candidate_destinations(game, from)?.iter().collect();
    if candidates.is_empty() {
        return Ok(false);
    }
    let to = candidates[rng.random_range(0..candidates.len())];

    let legal = match game.legal_destinations_at(from) {
        Ok(legal) => legal,
        Err(e) if e.is_recoverable() => return Ok(false),
        Err(e) => return Err(e),
    };
    if legal.contains(to) {
        return Ok(false);
    }

    let before = game.clone();
    match game.perform_move(board(from)?, board(to)?) {
        Err(ChessErrors::SelfCheckViolation) if *game == before => Ok(true),
        Err(ChessErrors::SelfCheckViolation) => Err(ChessErrors::InvariantViolation(format!(
            "rejected move {from}{to} changed the match"
        ))),
        Err(e) => Err(e),
        Ok(_) => Err(ChessErrors::InvariantViolation(format!(
            "{from}{to} was accepted although it is not a legal destination"
        ))),
    }
}

/// Play `config.games` seeded matches and aggregate the outcomes.
pub fn play_random_match_series(config: &RandomSeriesConfig) -> Result<RandomSeriesStats, ChessErrors> {
    let mut stats = RandomSeriesStats {
        games: config.games,
        ..RandomSeriesStats::default()
    };

    for i in 0..config.games {
        let seed = config.base_seed.wrapping_add(u64::from(i));
        let result = play_random_match(seed, &config.per_game)?;

        match result.outcome {
            RandomMatchOutcome::Checkmate { winner: Color::White } => stats.white_wins += 1,
            RandomMatchOutcome::Checkmate { winner: Color::Black } => stats.black_wins += 1,
            RandomMatchOutcome::NoLegalMoves { .. } => stats.stalemates += 1,
            RandomMatchOutcome::PlyLimit => stats.ply_limits += 1,
        }
        stats.total_plies += u64::from(result.plies);
        stats.rejected_probes += u64::from(result.rejected_probes);
        stats.promotions += u64::from(result.promotions);
        stats.outcomes.push(result.outcome);

        if config.verbose {
            println!(
                "[series] game {}/{} seed={} result={:?} plies={} moves={}",
                i + 1,
                config.games,
                seed,
                result.outcome,
                result.plies,
                result.played_moves_lan.join(" ")
            );
        }
    }

    Ok(stats)
}
