//! Save-slot backends for simulated games.
use std::convert::Infallible;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratrace_game::{GameSnapshot, GameStorage};

/// One pretty-printed JSON file per save slot.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn path_for(&self, save_name: &str) -> PathBuf {
        self.dir.join(format!("{save_name}.json"))
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl GameStorage for JsonFileStorage {
    type Error = io::Error;

    fn save_game(&self, save_name: &str, snapshot: &GameSnapshot) -> Result<(), Self::Error> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(self.path_for(save_name), json)
    }

    fn load_game(&self, save_name: &str) -> Result<Option<GameSnapshot>, Self::Error> {
        let path = self.path_for(save_name);
        match fs::read_to_string(&path) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error> {
        match fs::remove_file(self.path_for(save_name)) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

/// Discards saves; used when no save directory is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStorage;

impl GameStorage for NullStorage {
    type Error = Infallible;

    fn save_game(&self, _save_name: &str, _snapshot: &GameSnapshot) -> Result<(), Self::Error> {
        Ok(())
    }

    fn load_game(&self, _save_name: &str) -> Result<Option<GameSnapshot>, Self::Error> {
        Ok(None)
    }

    fn delete_save(&self, _save_name: &str) -> Result<(), Self::Error> {
        Ok(())
    }
}
