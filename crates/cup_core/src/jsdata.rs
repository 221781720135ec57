//! JSON → script-loadable mirror files.
//!
//! The site is served statically with no fetch layer, so every data
//! file gets a `.js` companion assigning the same JSON to a window
//! global; pages load it with a plain `<script>` tag.

use std::fs;
use std::path::Path;

use log::warn;

use crate::error::{Result, StoreError};

/// The site's data files and the globals their mirrors bind.
pub const DATA_FILES: &[(&str, &str)] = &[
    ("teams.json", "TEAMS_DATA"),
    ("matches.json", "MATCHES_DATA"),
    ("standings.json", "STANDINGS_DATA"),
    ("top_scorers.json", "TOP_SCORERS_DATA"),
    ("player_stats.json", "PLAYER_STATS_DATA"),
    ("bracket.json", "BRACKET_DATA"),
    ("news.json", "NEWS_DATA"),
];

/// Mirror a JSON file into a `window.<name> = ...;` script.
///
/// The JSON is re-emitted verbatim (same fields, same order, same
/// 2-space indentation), only wrapped in the assignment. Returns
/// `Ok(false)` without writing when the source file does not exist.
pub fn mirror_json_to_js(json_path: &Path, js_path: &Path, global_name: &str) -> Result<bool> {
    if !json_path.exists() {
        warn!("skipped mirroring {}: not found", json_path.display());
        return Ok(false);
    }

    let text = fs::read_to_string(json_path).map_err(|source| StoreError::Read {
        path: json_path.to_path_buf(),
        source,
    })?;

    // Round-trip through Value so the mirror is well-formed whatever
    // the source formatting; preserve_order keeps fields as written.
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: json_path.to_path_buf(),
            source,
        })?;

    let body = serde_json::to_string_pretty(&value).map_err(|source| StoreError::Encode {
        path: js_path.to_path_buf(),
        source,
    })?;

    let file_name = json_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("data.json");

    let script = format!("// Auto-generated from {file_name}\nwindow.{global_name} = {body};\n");

    fs::write(js_path, script).map_err(|source| StoreError::Write {
        path: js_path.to_path_buf(),
        source,
    })?;

    Ok(true)
}

/// Mirror every known data file under `data_dir`, skipping absent
/// ones with a warning. Returns the number of mirrors written.
pub fn mirror_data_dir(data_dir: &Path) -> Result<u32> {
    let mut written = 0;
    for (json_name, global_name) in DATA_FILES {
        let json_path = data_dir.join(json_name);
        let js_path = json_path.with_extension("js");
        if mirror_json_to_js(&json_path, &js_path, global_name)? {
            written += 1;
        }
    }
    Ok(written)
}
