pub mod derived;
pub mod match_record;
pub mod team;

pub use derived::{Bracket, BracketMatch, PlayerStatRow, ScorerEntry, StandingRow};
pub use match_record::{Goal, MatchRecord, Phase};
pub use team::{Player, Team};
