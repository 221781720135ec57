use serde::{Deserialize, Serialize};

/// Tournament phase a match belongs to. Only group matches feed the
/// standings; goals count toward scorer totals in any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Group,
    Knockout,
    /// Anything else found in a hand-edited match file. Kept loadable
    /// so one odd tag does not make the whole store unparseable; like
    /// knockout, it never feeds the standings.
    #[serde(other)]
    Other,
}

/// A single goal event. The engine only reads the scorer reference;
/// any extra annotations in the match file (minute, assist notes)
/// ride along untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub member_id: u32,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A match between two teams. Absent scores mean the match has not
/// been played yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: u32,
    pub date: String,
    #[serde(default)]
    pub location: String,
    pub team1_id: u32,
    pub team2_id: u32,
    #[serde(default)]
    pub score1: Option<u32>,
    #[serde(default)]
    pub score2: Option<u32>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub phase: Phase,
}

impl MatchRecord {
    /// A match affects the standings only when it is a group match
    /// with a recorded final score.
    pub fn counts_for_standings(&self) -> bool {
        self.phase == Phase::Group && self.is_played()
    }

    pub fn is_played(&self) -> bool {
        self.score1.is_some() && self.score2.is_some()
    }
}
