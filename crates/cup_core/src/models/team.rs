use serde::{Deserialize, Serialize};

/// A roster entry for a single player.
///
/// Everything but `id` is defaulted when absent from the store; the
/// roster importer fills these fields before the engine ever sees
/// them, so defaults only matter for hand-edited files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub head_photo: String,
    #[serde(default)]
    pub bio: String,
}

/// A tournament team and the players it owns. Created once by the
/// roster importer; read-only to the statistics engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub coach: String,
    #[serde(default)]
    pub members: Vec<Player>,
}
