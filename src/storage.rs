//! Tiny JSON persistence for the bits that survive a run: the high score and
//! the ability trigger key. Anything unreadable falls back to defaults; the
//! game never refuses to start over a bad save file.

use std::{fs, path::PathBuf};

use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};

use crate::constants::game;
use crate::utils::get_data_dir;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storage {
    high_score: u32,
    ability_key: String,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Storage {
    fn default() -> Self {
        Storage {
            high_score: 0,
            ability_key: game::DEFAULT_ABILITY_KEY.to_string(),
            path: None,
        }
    }
}

impl Storage {
    pub fn load() -> Self {
        Self::load_from(get_data_dir().join("save.json"))
    }

    pub fn load_from(path: PathBuf) -> Self {
        let mut storage = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("unreadable save file {path:?}: {e}");
                Storage::default()
            }),
            Err(_) => Storage::default(),
        };
        storage.path = Some(path);
        storage
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn set_high_score(&mut self, score: u32) {
        self.high_score = score;
    }

    pub fn ability_key(&self) -> &str {
        &self.ability_key
    }

    pub fn set_ability_key(&mut self, key: impl Into<String>) {
        self.ability_key = key.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("flappy-rs-test-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let storage = Storage::load_from(temp_path("missing/save.json"));
        assert_eq!(storage.high_score(), 0);
        assert_eq!(storage.ability_key(), game::DEFAULT_ABILITY_KEY);
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("round-trip.json");
        let mut storage = Storage::load_from(path.clone());
        storage.set_high_score(42);
        storage.set_ability_key("x");
        storage.save().unwrap();

        let reloaded = Storage::load_from(path.clone());
        assert_eq!(reloaded.high_score(), 42);
        assert_eq!(reloaded.ability_key(), "x");

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let path = temp_path("corrupt.json");
        fs::write(&path, "{not json").unwrap();
        let storage = Storage::load_from(path.clone());
        assert_eq!(storage.high_score(), 0);
        let _ = fs::remove_file(path);
    }
}
