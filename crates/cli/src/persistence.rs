use anyhow::{bail, Context};
use rusequence_core::EngineSnapshot;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SAVE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedGame {
    pub version: u32,
    #[serde(default)]
    pub turns_played: u32,
    pub snapshot: EngineSnapshot,
}

pub fn default_state_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("RUSEQUENCE_SAVE") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".rusequence_state.json"))
}

pub fn save_state_file(
    snapshot: EngineSnapshot,
    turns_played: u32,
    path: &Path,
) -> anyhow::Result<()> {
    let payload = SavedGame {
        version: SAVE_SCHEMA_VERSION,
        turns_played,
        snapshot,
    };
    let body = serde_json::to_string_pretty(&payload)?;
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))
}

pub fn load_state_file(path: &Path) -> anyhow::Result<SavedGame> {
    let body =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let payload: SavedGame = serde_json::from_str(&body)?;
    if payload.version != SAVE_SCHEMA_VERSION {
        bail!(
            "unsupported save version {} (expected {})",
            payload.version,
            SAVE_SCHEMA_VERSION
        );
    }
    Ok(payload)
}
