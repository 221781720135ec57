//! Derived datasets the engine writes for the site. Field order here
//! is the on-disk JSON field order.

use serde::{Deserialize, Serialize};

/// One row of the group-stage table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub team_id: u32,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_diff: i32,
    pub points: u32,
}

impl StandingRow {
    pub(crate) fn zeroed(team_id: u32, team_name: &str) -> Self {
        Self {
            team_id,
            team_name: team_name.to_string(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_diff: 0,
            points: 0,
        }
    }

    /// Ranking key, compared descending. Ties beyond this tuple keep
    /// input order.
    pub(crate) fn rank_key(&self) -> (u32, i32, u32) {
        (self.points, self.goal_diff, self.goals_for)
    }
}

/// Goal tally for one scorer. Name, team and position are snapshots
/// taken from the player index when the first goal is seen, never
/// refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerEntry {
    pub member_id: u32,
    pub name: String,
    pub team: String,
    pub position: String,
    pub goals: u32,
}

/// Per-player counters. `games_played` counts matches the player
/// scored in — there is no lineup data, so true attendance is
/// unknowable here. Assists and cards have no event source and stay
/// zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatRow {
    pub member_id: u32,
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub games_played: u32,
}

impl PlayerStatRow {
    pub(crate) fn zeroed(member_id: u32) -> Self {
        Self {
            member_id,
            goals: 0,
            assists: 0,
            yellow_cards: 0,
            red_cards: 0,
            games_played: 0,
        }
    }
}

/// One seeded quarterfinal pairing. `winner_id` is published as null
/// and stays null: nothing in this codebase resolves bracket matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub round: String,
    pub match_id: u32,
    pub team1_seed: u32,
    pub team1_id: u32,
    pub team1_name: String,
    pub team2_seed: u32,
    pub team2_id: u32,
    pub team2_name: String,
    pub winner_id: Option<u32>,
}

/// Knockout bracket seeded from the final group standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub phase: String,
    pub winners_bracket: Vec<BracketMatch>,
    pub consolation_bracket: Vec<BracketMatch>,
}

impl Bracket {
    /// Empty bracket shell, also the result when there are too few
    /// teams to draw quarterfinals.
    pub fn shell() -> Self {
        Self {
            phase: "knockout".to_string(),
            winners_bracket: Vec::new(),
            consolation_bracket: Vec::new(),
        }
    }
}
