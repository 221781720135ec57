//! Tournament statistics engine.
//!
//! Loads the team and match stores and derives the four datasets the
//! site renders: standings, top scorers, player statistics and the
//! knockout bracket. Every run recomputes everything from the loaded
//! snapshot; nothing persists between runs. The four computations are
//! pure over that snapshot — only the bracket depends on another
//! output (the finished standings).

mod index;

pub use index::{IndexedPlayer, PlayerIndex, TeamIndex};

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use log::info;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::error::Result;
use crate::jsdata;
use crate::models::{
    Bracket, BracketMatch, MatchRecord, PlayerStatRow, ScorerEntry, StandingRow, Team,
};
use crate::store;

const WIN_POINTS: u32 = 3;
const DRAW_POINTS: u32 = 1;

/// First knockout match id; group matches are numbered below this in
/// the hand-maintained match file.
const KNOCKOUT_MATCH_ID_BASE: u32 = 201;

/// Quarterfinal seedings by zero-based standings index: 1v8, 2v7,
/// 3v6, 4v5.
const QUARTERFINAL_PAIRINGS: [(usize, usize); 4] = [(0, 7), (1, 6), (2, 5), (3, 4)];

/// Sentinel for goal events whose scorer is not in the player index.
const UNKNOWN: &str = "Unknown";

/// Row counts from a completed [`TournamentEngine::save_results`] run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub standings_rows: usize,
    pub scorers: usize,
    pub player_rows: usize,
    pub bracket_matches: usize,
}

pub struct TournamentEngine {
    data_dir: PathBuf,
    teams: TeamIndex,
    players: PlayerIndex,
    matches: Vec<MatchRecord>,
}

impl TournamentEngine {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            teams: TeamIndex::default(),
            players: PlayerIndex::default(),
            matches: Vec::new(),
        }
    }

    /// Load the team and match stores from the data directory.
    ///
    /// Either store may be absent; the engine then runs over the
    /// empty collection. A store that exists but does not parse is
    /// fatal.
    pub fn load(&mut self) -> Result<()> {
        let teams_path = self.data_dir.join("teams.json");
        match store::load_json::<Vec<Team>>(&teams_path)? {
            Some(teams) => {
                for team in teams {
                    for player in &team.members {
                        self.players.insert(player, &team);
                    }
                    self.teams.insert(team);
                }
            }
            None => info!(
                "teams store {} not found, starting with an empty roster",
                teams_path.display()
            ),
        }

        let matches_path = self.data_dir.join("matches.json");
        match store::load_json::<Vec<MatchRecord>>(&matches_path)? {
            Some(matches) => self.matches = matches,
            None => info!(
                "matches store {} not found, no results to process",
                matches_path.display()
            ),
        }

        Ok(())
    }

    pub fn teams(&self) -> &TeamIndex {
        &self.teams
    }

    pub fn players(&self) -> &PlayerIndex {
        &self.players
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    /// Group-stage table: one row per known team, ranked descending
    /// by points, then goal difference, then goals scored. The sort
    /// is stable, so teams level on all three keys keep roster-file
    /// order.
    pub fn calculate_standings(&self) -> Vec<StandingRow> {
        let mut rows: Vec<StandingRow> = self
            .teams
            .iter()
            .map(|t| StandingRow::zeroed(t.id, &t.name))
            .collect();
        let row_pos: FxHashMap<u32, usize> = rows
            .iter()
            .enumerate()
            .map(|(i, r)| (r.team_id, i))
            .collect();

        for m in &self.matches {
            if !m.counts_for_standings() {
                continue;
            }
            let (Some(s1), Some(s2)) = (m.score1, m.score2) else {
                continue;
            };
            // A result naming a team that is not in the roster is
            // dropped whole rather than half-counted.
            let (Some(&i1), Some(&i2)) = (row_pos.get(&m.team1_id), row_pos.get(&m.team2_id))
            else {
                continue;
            };

            rows[i1].played += 1;
            rows[i2].played += 1;
            rows[i1].goals_for += s1;
            rows[i1].goals_against += s2;
            rows[i2].goals_for += s2;
            rows[i2].goals_against += s1;

            match s1.cmp(&s2) {
                Ordering::Greater => {
                    rows[i1].won += 1;
                    rows[i1].points += WIN_POINTS;
                    rows[i2].lost += 1;
                }
                Ordering::Less => {
                    rows[i2].won += 1;
                    rows[i2].points += WIN_POINTS;
                    rows[i1].lost += 1;
                }
                Ordering::Equal => {
                    rows[i1].drawn += 1;
                    rows[i1].points += DRAW_POINTS;
                    rows[i2].drawn += 1;
                    rows[i2].points += DRAW_POINTS;
                }
            }
        }

        for row in &mut rows {
            row.goal_diff = row.goals_for as i32 - row.goals_against as i32;
        }

        rows.sort_by(|a, b| b.rank_key().cmp(&a.rank_key()));
        rows
    }

    /// Goal tallies per scorer, all phases included. The first goal a
    /// player scores snapshots name/team/position from the player
    /// index; later goals only bump the counter. A goal referencing
    /// an id outside the index still gets an entry, flagged
    /// "Unknown". Ties keep first-seen order.
    pub fn calculate_top_scorers(&self) -> Vec<ScorerEntry> {
        let mut entries: Vec<ScorerEntry> = Vec::new();
        let mut by_id: FxHashMap<u32, usize> = FxHashMap::default();

        for m in &self.matches {
            for goal in &m.goals {
                let pos = match by_id.get(&goal.member_id) {
                    Some(&pos) => pos,
                    None => {
                        entries.push(self.snapshot_scorer(goal.member_id));
                        by_id.insert(goal.member_id, entries.len() - 1);
                        entries.len() - 1
                    }
                };
                entries[pos].goals += 1;
            }
        }

        entries.sort_by(|a, b| b.goals.cmp(&a.goals));
        entries
    }

    fn snapshot_scorer(&self, member_id: u32) -> ScorerEntry {
        match self.players.get(member_id) {
            Some(p) => ScorerEntry {
                member_id,
                name: p.name.clone(),
                team: p.team_name.clone(),
                position: p.position.clone(),
                goals: 0,
            },
            None => ScorerEntry {
                member_id,
                name: UNKNOWN.to_string(),
                team: UNKNOWN.to_string(),
                position: UNKNOWN.to_string(),
                goals: 0,
            },
        }
    }

    /// Per-player counters covering every player in the index,
    /// scorers or not, in roster order. `games_played` is really
    /// "matches scored in": without lineup data a player is only
    /// visible in matches where they scored. Goals from unknown ids
    /// are dropped here (unlike the top-scorer list).
    pub fn calculate_player_stats(&self) -> Vec<PlayerStatRow> {
        let mut rows: Vec<PlayerStatRow> = self
            .players
            .iter()
            .map(|p| PlayerStatRow::zeroed(p.id))
            .collect();
        let row_pos: FxHashMap<u32, usize> = rows
            .iter()
            .enumerate()
            .map(|(i, r)| (r.member_id, i))
            .collect();

        for m in &self.matches {
            let mut scored_here: FxHashSet<u32> = FxHashSet::default();
            for goal in &m.goals {
                if let Some(&i) = row_pos.get(&goal.member_id) {
                    rows[i].goals += 1;
                    scored_here.insert(goal.member_id);
                }
            }
            if m.is_played() {
                for id in &scored_here {
                    if let Some(&i) = row_pos.get(id) {
                        rows[i].games_played += 1;
                    }
                }
            }
        }

        rows
    }

    /// Seed the quarterfinal bracket from the finished standings.
    ///
    /// Fewer than four teams: no bracket to draw, the empty shell
    /// comes back. Four to seven teams: only the pairings whose low
    /// seed exists are emitted, nothing is padded with byes. Emitted
    /// pairings get sequential match ids from 201.
    pub fn generate_bracket(&self, standings: &[StandingRow]) -> Bracket {
        let mut bracket = Bracket::shell();
        if standings.len() < 4 {
            return bracket;
        }

        let mut next_id = KNOCKOUT_MATCH_ID_BASE;
        for &(seed1, seed2) in &QUARTERFINAL_PAIRINGS {
            if seed1 >= standings.len() || seed2 >= standings.len() {
                continue;
            }
            let (high, low) = (&standings[seed1], &standings[seed2]);
            bracket.winners_bracket.push(BracketMatch {
                round: "quarterfinals".to_string(),
                match_id: next_id,
                team1_seed: seed1 as u32 + 1,
                team1_id: high.team_id,
                team1_name: high.team_name.clone(),
                team2_seed: seed2 as u32 + 1,
                team2_id: low.team_id,
                team2_name: low.team_name.clone(),
                winner_id: None,
            });
            next_id += 1;
        }

        bracket
    }

    /// Run all four computations and persist each dataset as JSON
    /// plus its JS mirror. Files are written independently; an error
    /// stops the sequence but leaves earlier outputs in place.
    pub fn save_results(&self) -> Result<RunSummary> {
        let standings = self.calculate_standings();
        let top_scorers = self.calculate_top_scorers();
        let player_stats = self.calculate_player_stats();
        let bracket = self.generate_bracket(&standings);

        self.save_dataset("standings.json", "STANDINGS_DATA", &standings)?;
        self.save_dataset("top_scorers.json", "TOP_SCORERS_DATA", &top_scorers)?;
        self.save_dataset("player_stats.json", "PLAYER_STATS_DATA", &player_stats)?;
        self.save_dataset("bracket.json", "BRACKET_DATA", &bracket)?;

        Ok(RunSummary {
            standings_rows: standings.len(),
            scorers: top_scorers.len(),
            player_rows: player_stats.len(),
            bracket_matches: bracket.winners_bracket.len(),
        })
    }

    fn save_dataset<T: Serialize>(
        &self,
        file_name: &str,
        global_name: &str,
        value: &T,
    ) -> Result<()> {
        let json_path = self.data_dir.join(file_name);
        store::save_json(&json_path, value)?;
        let js_path = json_path.with_extension("js");
        jsdata::mirror_json_to_js(&json_path, &js_path, global_name)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Goal, Phase, Player};
    use tempfile::tempdir;

    fn player(id: u32, name: &str, position: &str) -> Player {
        Player {
            id,
            name: name.to_string(),
            nickname: String::new(),
            number: id % 100,
            position: position.to_string(),
            age: 25,
            head_photo: String::new(),
            bio: String::new(),
        }
    }

    fn team(id: u32, name: &str, members: Vec<Player>) -> Team {
        Team {
            id,
            name: name.to_string(),
            logo: String::new(),
            coach: "Coach".to_string(),
            members,
        }
    }

    fn goal(member_id: u32) -> Goal {
        Goal {
            member_id,
            extra: serde_json::Map::new(),
        }
    }

    fn group_match(id: u32, t1: u32, t2: u32, s1: u32, s2: u32, goals: Vec<Goal>) -> MatchRecord {
        MatchRecord {
            id,
            date: "2026-03-01".to_string(),
            location: String::new(),
            team1_id: t1,
            team2_id: t2,
            score1: Some(s1),
            score2: Some(s2),
            goals,
            phase: Phase::Group,
        }
    }

    fn engine_with(teams: Vec<Team>, matches: Vec<MatchRecord>) -> TournamentEngine {
        let mut engine = TournamentEngine::new(Path::new("unused"));
        for team in teams {
            for p in &team.members {
                engine.players.insert(p, &team);
            }
            engine.teams.insert(team);
        }
        engine.matches = matches;
        engine
    }

    fn three_teams() -> Vec<Team> {
        vec![
            team(1, "Eagles", vec![player(100, "Sami", "FWD")]),
            team(2, "Lions", vec![player(101, "Omar", "MID")]),
            team(3, "Falcons", vec![player(102, "Karim", "DEF")]),
        ]
    }

    #[test]
    fn test_standings_single_win() {
        let engine = engine_with(
            three_teams(),
            vec![group_match(1, 1, 2, 2, 1, vec![])],
        );
        let standings = engine.calculate_standings();

        assert_eq!(standings.len(), 3);

        let winner = &standings[0];
        assert_eq!(winner.team_id, 1);
        assert_eq!(
            (winner.played, winner.won, winner.points, winner.goal_diff),
            (1, 1, 3, 1)
        );

        // Team 3 never played but still outranks the loser on goal
        // difference.
        assert_eq!(standings[1].team_id, 3);
        assert_eq!(standings[1].played, 0);

        let loser = &standings[2];
        assert_eq!(loser.team_id, 2);
        assert_eq!(
            (loser.played, loser.lost, loser.points, loser.goal_diff),
            (1, 1, 0, -1)
        );
    }

    #[test]
    fn test_standings_draw_and_goal_symmetry() {
        let engine = engine_with(
            three_teams(),
            vec![group_match(1, 1, 2, 2, 2, vec![])],
        );
        let standings = engine.calculate_standings();

        for row in standings.iter().filter(|r| r.played > 0) {
            assert_eq!(row.drawn, 1);
            assert_eq!(row.points, 1);
            assert_eq!(row.goals_for, 2);
            assert_eq!(row.goals_against, 2);
            assert_eq!(row.goal_diff, 0);
        }
    }

    #[test]
    fn test_standings_goal_diff_invariant() {
        let engine = engine_with(
            three_teams(),
            vec![
                group_match(1, 1, 2, 4, 1, vec![]),
                group_match(2, 2, 3, 0, 2, vec![]),
                group_match(3, 3, 1, 3, 3, vec![]),
            ],
        );
        for row in engine.calculate_standings() {
            assert_eq!(row.goal_diff, row.goals_for as i32 - row.goals_against as i32);
        }
    }

    #[test]
    fn test_standings_ties_keep_roster_order() {
        // No matches at all: every row is level on every key.
        let engine = engine_with(three_teams(), vec![]);
        let ids: Vec<u32> = engine
            .calculate_standings()
            .iter()
            .map(|r| r.team_id)
            .collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn test_standings_ignores_knockout_unplayed_and_unknown_teams() {
        let mut knockout = group_match(5, 1, 2, 3, 0, vec![]);
        knockout.phase = Phase::Knockout;

        let mut unplayed = group_match(6, 2, 3, 0, 0, vec![]);
        unplayed.score1 = None;
        unplayed.score2 = None;

        // Team 99 is not in the roster; the whole result is dropped,
        // including team 1's side of it.
        let dangling = group_match(7, 1, 99, 5, 0, vec![]);

        let engine = engine_with(three_teams(), vec![knockout, unplayed, dangling]);
        for row in engine.calculate_standings() {
            assert_eq!(row.played, 0);
            assert_eq!(row.points, 0);
        }
    }

    #[test]
    fn test_top_scorers_totals_and_order() {
        let engine = engine_with(
            three_teams(),
            vec![
                group_match(1, 1, 2, 2, 1, vec![goal(100), goal(100), goal(101)])
            ],
        );
        let scorers = engine.calculate_top_scorers();

        assert_eq!(scorers.len(), 2);
        let total: u32 = scorers.iter().map(|s| s.goals).sum();
        assert_eq!(total, 3);

        assert_eq!(scorers[0].member_id, 100);
        assert_eq!(scorers[0].goals, 2);
        assert_eq!(scorers[0].name, "Sami");
        assert_eq!(scorers[0].team, "Eagles");
        assert_eq!(scorers[0].position, "FWD");
    }

    #[test]
    fn test_top_scorers_ties_keep_first_seen_order() {
        let engine = engine_with(
            three_teams(),
            vec![
                group_match(1, 1, 2, 1, 1, vec![goal(102), goal(100)]),
                group_match(2, 2, 3, 1, 1, vec![goal(101)]),
            ],
        );
        let ids: Vec<u32> = engine
            .calculate_top_scorers()
            .iter()
            .map(|s| s.member_id)
            .collect();
        assert_eq!(ids, [102, 100, 101]);
    }

    #[test]
    fn test_top_scorers_count_knockout_goals() {
        let mut knockout = group_match(9, 1, 2, 1, 0, vec![goal(100)]);
        knockout.phase = Phase::Knockout;

        let engine = engine_with(three_teams(), vec![knockout]);
        let scorers = engine.calculate_top_scorers();
        assert_eq!(scorers.len(), 1);
        assert_eq!(scorers[0].goals, 1);
    }

    #[test]
    fn test_unrecognized_phase_feeds_scorers_not_standings() {
        let mut oddball = group_match(9, 1, 2, 2, 0, vec![goal(100), goal(100)]);
        oddball.phase = Phase::Other;

        let engine = engine_with(three_teams(), vec![oddball]);

        for row in engine.calculate_standings() {
            assert_eq!(row.played, 0);
            assert_eq!(row.points, 0);
        }

        let scorers = engine.calculate_top_scorers();
        assert_eq!(scorers.len(), 1);
        assert_eq!(scorers[0].goals, 2);
    }

    #[test]
    fn test_top_scorers_unknown_reference_gets_sentinel() {
        let engine = engine_with(
            three_teams(),
            vec![group_match(1, 1, 2, 1, 0, vec![goal(555)])],
        );
        let scorers = engine.calculate_top_scorers();

        assert_eq!(scorers.len(), 1);
        assert_eq!(scorers[0].member_id, 555);
        assert_eq!(scorers[0].name, "Unknown");
        assert_eq!(scorers[0].team, "Unknown");
        assert_eq!(scorers[0].position, "Unknown");
    }

    #[test]
    fn test_player_stats_one_row_per_indexed_player() {
        let engine = engine_with(
            three_teams(),
            vec![group_match(1, 1, 2, 1, 0, vec![goal(100)])],
        );
        let stats = engine.calculate_player_stats();

        // Every known player gets a row, in roster order, including
        // those who never scored.
        let ids: Vec<u32> = stats.iter().map(|s| s.member_id).collect();
        assert_eq!(ids, [100, 101, 102]);
        assert_eq!(stats[1].goals, 0);
        assert_eq!(stats[1].games_played, 0);
    }

    #[test]
    fn test_player_stats_games_played_is_matches_scored_in() {
        // Two goals in one played match: goals 2, games_played 1.
        let played = group_match(1, 1, 2, 2, 0, vec![goal(100), goal(100)]);

        // Goals logged against a match with no final score do not
        // count as an appearance.
        let mut unscored = group_match(2, 1, 3, 0, 0, vec![goal(100)]);
        unscored.score1 = None;
        unscored.score2 = None;

        let engine = engine_with(three_teams(), vec![played, unscored]);
        let stats = engine.calculate_player_stats();

        let sami = stats.iter().find(|s| s.member_id == 100).unwrap();
        assert_eq!(sami.goals, 3);
        assert_eq!(sami.games_played, 1);
    }

    #[test]
    fn test_player_stats_zero_assists_and_cards() {
        let engine = engine_with(
            three_teams(),
            vec![group_match(1, 1, 2, 1, 0, vec![goal(100)])],
        );
        for row in engine.calculate_player_stats() {
            assert_eq!(row.assists, 0);
            assert_eq!(row.yellow_cards, 0);
            assert_eq!(row.red_cards, 0);
        }
    }

    #[test]
    fn test_player_stats_drop_unknown_scorers() {
        let engine = engine_with(
            three_teams(),
            vec![group_match(1, 1, 2, 1, 0, vec![goal(555)])],
        );
        let total: u32 = engine
            .calculate_player_stats()
            .iter()
            .map(|s| s.goals)
            .sum();
        assert_eq!(total, 0);
    }

    fn standings_of(n: u32) -> Vec<StandingRow> {
        (1..=n)
            .map(|i| StandingRow::zeroed(i, &format!("Team {i}")))
            .collect()
    }

    #[test]
    fn test_bracket_full_field_of_eight() {
        let engine = engine_with(vec![], vec![]);
        let bracket = engine.generate_bracket(&standings_of(8));

        assert_eq!(bracket.phase, "knockout");
        assert!(bracket.consolation_bracket.is_empty());
        assert_eq!(bracket.winners_bracket.len(), 4);

        let first = &bracket.winners_bracket[0];
        assert_eq!(first.round, "quarterfinals");
        assert_eq!((first.team1_seed, first.team2_seed), (1, 8));
        assert_eq!(first.winner_id, None);

        let ids: Vec<u32> = bracket.winners_bracket.iter().map(|m| m.match_id).collect();
        assert_eq!(ids, [201, 202, 203, 204]);

        let seeds: Vec<(u32, u32)> = bracket
            .winners_bracket
            .iter()
            .map(|m| (m.team1_seed, m.team2_seed))
            .collect();
        assert_eq!(seeds, [(1, 8), (2, 7), (3, 6), (4, 5)]);
    }

    #[test]
    fn test_bracket_seven_teams_omits_out_of_range_pairing() {
        let engine = engine_with(vec![], vec![]);
        let bracket = engine.generate_bracket(&standings_of(7));

        // 1v8 has no 8th seed, so only three pairings come out, ids
        // still sequential from 201.
        assert_eq!(bracket.winners_bracket.len(), 3);
        let ids: Vec<u32> = bracket.winners_bracket.iter().map(|m| m.match_id).collect();
        assert_eq!(ids, [201, 202, 203]);

        let seeds: Vec<(u32, u32)> = bracket
            .winners_bracket
            .iter()
            .map(|m| (m.team1_seed, m.team2_seed))
            .collect();
        assert_eq!(seeds, [(2, 7), (3, 6), (4, 5)]);
    }

    #[test]
    fn test_bracket_under_four_teams_is_empty_shell() {
        let engine = engine_with(vec![], vec![]);
        let bracket = engine.generate_bracket(&standings_of(3));

        assert_eq!(bracket.phase, "knockout");
        assert!(bracket.winners_bracket.is_empty());
        assert!(bracket.consolation_bracket.is_empty());
    }

    #[test]
    fn test_save_results_writes_stores_and_mirrors() {
        let dir = tempdir().unwrap();

        let teams = three_teams();
        store::save_json(&dir.path().join("teams.json"), &teams).unwrap();
        let matches = vec![group_match(1, 1, 2, 2, 1, vec![goal(100), goal(100), goal(101)])];
        store::save_json(&dir.path().join("matches.json"), &matches).unwrap();

        let mut engine = TournamentEngine::new(dir.path());
        engine.load().unwrap();
        let summary = engine.save_results().unwrap();

        assert_eq!(summary.standings_rows, 3);
        assert_eq!(summary.scorers, 2);
        assert_eq!(summary.player_rows, 3);
        assert_eq!(summary.bracket_matches, 0);

        for name in ["standings", "top_scorers", "player_stats", "bracket"] {
            assert!(dir.path().join(format!("{name}.json")).exists());
            assert!(dir.path().join(format!("{name}.js")).exists());
        }

        // The primary store round-trips to what was computed.
        let loaded: Vec<StandingRow> =
            store::load_json(&dir.path().join("standings.json")).unwrap().unwrap();
        assert_eq!(loaded, engine.calculate_standings());

        // The mirror carries the identical payload.
        let script = std::fs::read_to_string(dir.path().join("standings.js")).unwrap();
        let body = script
            .strip_prefix("// Auto-generated from standings.json\nwindow.STANDINGS_DATA = ")
            .unwrap()
            .strip_suffix(";\n")
            .unwrap();
        let mirrored: Vec<StandingRow> = serde_json::from_str(body).unwrap();
        assert_eq!(mirrored, loaded);
    }

    #[test]
    fn test_load_tolerates_missing_stores() {
        let dir = tempdir().unwrap();
        let mut engine = TournamentEngine::new(dir.path());
        engine.load().unwrap();

        assert!(engine.teams().is_empty());
        assert!(engine.players().is_empty());
        assert!(engine.matches().is_empty());

        let summary = engine.save_results().unwrap();
        assert_eq!(summary.standings_rows, 0);
        assert_eq!(summary.scorers, 0);
    }
}
