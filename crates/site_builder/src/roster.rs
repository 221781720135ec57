//! CSV roster import.
//!
//! Reads the hand-collected signup sheet and produces the teams store
//! the statistics engine consumes. Identifier assignment happens here
//! and only here: team ids in first-seen order from 1, player ids
//! sequential from 100 across the whole roster. The engine trusts
//! whatever this importer persisted and never re-derives ids.
//!
//! Expected CSV columns (header row skipped):
//! team, first name, last name, nickname, number, position, age, bio.
//! Rows shorter than that are read as having empty trailing fields.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use cup_core::models::{Player, Team};
use cup_core::store;

/// Base for player ids. Shirt-number defaulting (`id % 100`) leans on
/// this being 100.
const PLAYER_ID_BASE: u32 = 100;
const FIRST_TEAM_ID: u32 = 1;
const DEFAULT_AGE: u32 = 25;
const DEFAULT_POSITION: &str = "Player";
const DEFAULT_COACH: &str = "Coach";

/// Sequential id source, seeded and scoped per import run.
#[derive(Debug)]
struct IdAllocator {
    next_id: u32,
}

impl IdAllocator {
    fn new(base: u32) -> Self {
        Self { next_id: base }
    }

    fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Counters from one import run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportStats {
    pub total_rows: u32,
    pub players: u32,
    pub skipped: u32,
}

/// Parse the roster CSV into Team records. Does not write anything.
pub fn parse_roster(csv_path: &Path) -> Result<(Vec<Team>, ImportStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("failed to open roster CSV: {}", csv_path.display()))?;

    let mut teams: Vec<Team> = Vec::new();
    let mut team_pos: HashMap<String, usize> = HashMap::new();
    let mut team_ids = IdAllocator::new(FIRST_TEAM_ID);
    let mut player_ids = IdAllocator::new(PLAYER_ID_BASE);
    let mut stats = ImportStats::default();

    for record in reader.records() {
        let record =
            record.with_context(|| format!("failed to read roster CSV: {}", csv_path.display()))?;
        stats.total_rows += 1;

        let field = |i: usize| record.get(i).unwrap_or("").trim();

        // No team cell means a blank or separator line.
        let team_name = field(0);
        if team_name.is_empty() {
            stats.skipped += 1;
            continue;
        }

        let first_name = field(1);
        let last_name = field(2);
        let nickname = field(3);
        let number = field(4);
        let position = field(5);
        let age = field(6);
        let bio = field(7);

        // A row with no resolvable player name is not a player.
        if first_name.is_empty() && last_name.is_empty() && nickname.is_empty() {
            stats.skipped += 1;
            continue;
        }

        let id = player_ids.allocate();

        let name = if first_name.is_empty() && last_name.is_empty() {
            nickname.to_string()
        } else {
            format!("{first_name} {last_name}").trim().to_string()
        };
        let display_nickname = if !nickname.is_empty() {
            nickname
        } else if !first_name.is_empty() {
            first_name
        } else {
            last_name
        };

        let player = Player {
            id,
            name,
            nickname: display_nickname.to_string(),
            number: number.parse().unwrap_or(id % 100),
            // Default first, then normalize: an empty cell persists
            // as "PLAYER", not "Player".
            position: if position.is_empty() {
                DEFAULT_POSITION
            } else {
                position
            }
            .to_uppercase(),
            age: age.parse().unwrap_or(DEFAULT_AGE),
            head_photo: format!("assets/images/players/heads/{id}.jpg"),
            bio: if bio.is_empty() {
                format!("Player for {team_name}")
            } else {
                bio.to_string()
            },
        };

        let pos = match team_pos.get(team_name) {
            Some(&pos) => pos,
            None => {
                let team = Team {
                    id: team_ids.allocate(),
                    name: team_name.to_string(),
                    logo: team_logo_path(team_name),
                    coach: DEFAULT_COACH.to_string(),
                    members: Vec::new(),
                };
                team_pos.insert(team_name.to_string(), teams.len());
                teams.push(team);
                teams.len() - 1
            }
        };
        teams[pos].members.push(player);
        stats.players += 1;
    }

    teams.sort_by_key(|t| t.id);
    Ok((teams, stats))
}

/// Parse the roster CSV and write the teams store.
pub fn import_roster(csv_path: &Path, out_path: &Path) -> Result<(Vec<Team>, ImportStats)> {
    let (teams, stats) = parse_roster(csv_path)?;
    store::save_json(out_path, &teams)
        .with_context(|| format!("failed to write teams store: {}", out_path.display()))?;
    Ok((teams, stats))
}

fn team_logo_path(team_name: &str) -> String {
    format!(
        "assets/images/teams/{}.png",
        team_name.to_lowercase().replace(' ', "_")
    )
}
