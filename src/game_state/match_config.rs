//! Match configuration.
//!
//! `MatchConfig::default()` is the standard game. `MatchConfig::from_env()`
//! lets tools switch setups without recompiling:
//!
//! - `CHESS_MATCH_SETUP` = `standard` | `reference`
//! - `CHESS_MATCH_CASTLING` = `unverified` | `verified`
//!
//! Unknown or missing values fall back to the defaults.

use crate::game_state::chess_rules::{REFERENCE_LAYOUT, STANDARD_LAYOUT};
use crate::game_state::chess_types::PieceKind;

pub const SETUP_ENV_VAR: &str = "CHESS_MATCH_SETUP";
pub const CASTLING_ENV_VAR: &str = "CHESS_MATCH_CASTLING";

/// Starting position of a new match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InitialSetup {
    /// Full 16-piece armies.
    #[default]
    Standard,
    /// Six non-pawn pieces per side (five rooks and a king).
    Reference,
}

impl InitialSetup {
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("standard") {
            Some(InitialSetup::Standard)
        } else if name.eq_ignore_ascii_case("reference") {
            Some(InitialSetup::Reference)
        } else {
            None
        }
    }

    pub fn layout(self) -> &'static str {
        match self {
            InitialSetup::Standard => STANDARD_LAYOUT,
            InitialSetup::Reference => REFERENCE_LAYOUT,
        }
    }
}

/// Whether castling also requires the square the king crosses to be safe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CastlingTransit {
    /// Only occupancy of the squares between king and rook is tested.
    #[default]
    Unverified,
    /// The crossed square must not be attacked either.
    Verified,
}

impl CastlingTransit {
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("unverified") {
            Some(CastlingTransit::Unverified)
        } else if name.eq_ignore_ascii_case("verified") {
            Some(CastlingTransit::Verified)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    pub setup: InitialSetup,
    pub castling_transit: CastlingTransit,
    /// Piece a pawn becomes the moment it reaches the last row, before any
    /// `resolve_promotion` call. Must be a promotion target.
    pub default_promotion: PieceKind,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            setup: InitialSetup::default(),
            castling_transit: CastlingTransit::default(),
            default_promotion: PieceKind::Queen,
        }
    }
}

impl MatchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; used by `from_env` and tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(setup) = lookup(SETUP_ENV_VAR).and_then(|v| InitialSetup::from_name(&v)) {
            config.setup = setup;
        }
        if let Some(rule) = lookup(CASTLING_ENV_VAR).and_then(|v| CastlingTransit::from_name(&v)) {
            config.castling_transit = rule;
        }
        config
    }

    pub fn with_setup(mut self, setup: InitialSetup) -> Self {
        self.setup = setup;
        self
    }

    pub fn with_castling_transit(mut self, rule: CastlingTransit) -> Self {
        self.castling_transit = rule;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_overrides_defaults() {
        let config = MatchConfig::from_lookup(|key| match key {
            SETUP_ENV_VAR => Some("Reference".to_owned()),
            CASTLING_ENV_VAR => Some("verified".to_owned()),
            _ => None,
        });
        assert_eq!(config.setup, InitialSetup::Reference);
        assert_eq!(config.castling_transit, CastlingTransit::Verified);
        assert_eq!(config.default_promotion, PieceKind::Queen);
    }

    #[test]
    fn unknown_values_fall_back_to_defaults() {
        let config = MatchConfig::from_lookup(|_| Some("sideways".to_owned()));
        assert_eq!(config, MatchConfig::default());
    }
}
