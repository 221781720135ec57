//! Insertion-ordered indexes over the loaded roster.
//!
//! Both indexes pair a Vec spine with an FxHashMap position map: the
//! Vec keeps file order (standings ties and the player-stats output
//! order depend on it), the map gives O(1) lookup by id during
//! aggregation.

use rustc_hash::FxHashMap;

use crate::models::{Player, Team};

/// Read-only projection of a player with its owning team denormalized
/// in. Built once at load time; snapshots taken from here are frozen,
/// never re-joined against the roster.
#[derive(Debug, Clone)]
pub struct IndexedPlayer {
    pub id: u32,
    pub name: String,
    pub position: String,
    pub team_id: u32,
    pub team_name: String,
}

/// Teams keyed by id, iterable in roster-file order.
#[derive(Debug, Default)]
pub struct TeamIndex {
    teams: Vec<Team>,
    by_id: FxHashMap<u32, usize>,
}

impl TeamIndex {
    pub fn insert(&mut self, team: Team) {
        self.by_id.insert(team.id, self.teams.len());
        self.teams.push(team);
    }

    pub fn get(&self, id: u32) -> Option<&Team> {
        self.by_id.get(&id).map(|&i| &self.teams[i])
    }

    pub fn contains(&self, id: u32) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// All players across all teams, keyed by player id, iterable in
/// roster order.
#[derive(Debug, Default)]
pub struct PlayerIndex {
    players: Vec<IndexedPlayer>,
    by_id: FxHashMap<u32, usize>,
}

impl PlayerIndex {
    pub fn insert(&mut self, player: &Player, team: &Team) {
        let entry = IndexedPlayer {
            id: player.id,
            name: player.name.clone(),
            position: player.position.clone(),
            team_id: team.id,
            team_name: team.name.clone(),
        };
        self.by_id.insert(entry.id, self.players.len());
        self.players.push(entry);
    }

    pub fn get(&self, id: u32) -> Option<&IndexedPlayer> {
        self.by_id.get(&id).map(|&i| &self.players[i])
    }

    pub fn contains(&self, id: u32) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedPlayer> {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
