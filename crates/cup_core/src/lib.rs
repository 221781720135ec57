//! # cup_core - Tournament Site Data Engine
//!
//! This library derives the static data files behind the tournament
//! website: group standings, top scorers, per-player statistics and
//! the knockout bracket, all computed from two hand-maintained JSON
//! stores (teams and matches).
//!
//! ## Features
//! - Full recompute on every run, no incremental state
//! - Deterministic ordering (stable sorts, insertion-order ties)
//! - JSON stores mirrored into script-loadable `.js` companions so
//!   the site works without a server

pub mod engine;
pub mod error;
pub mod jsdata;
pub mod models;
pub mod store;

pub use engine::{PlayerIndex, RunSummary, TeamIndex, TournamentEngine};
pub use error::{Result, StoreError};
pub use models::{
    Bracket, BracketMatch, Goal, MatchRecord, Phase, Player, PlayerStatRow, ScorerEntry,
    StandingRow, Team,
};
