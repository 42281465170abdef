use super::error::SaveError;
use super::format::{decompress_and_deserialize, serialize_and_compress, SeasonSave};
use crate::models::Season;

use std::fs::{remove_file, rename, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_SAVE_NAME: &str = "diamond_season";

/// A single named season record inside a directory.
///
/// Saving replaces the previous record; there is no history.
#[derive(Debug, Clone)]
pub struct SeasonStore {
    dir: PathBuf,
    name: String,
}

impl SeasonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), name: DEFAULT_SAVE_NAME.to_string() }
    }

    pub fn with_name(dir: impl Into<PathBuf>, name: &str) -> Result<Self, SaveError> {
        let valid = !name.is_empty()
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(SaveError::InvalidName { name: name.to_string() });
        }
        Ok(Self { dir: dir.into(), name: name.to_string() })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.dat", self.name))
    }

    pub fn save(&self, season: &Season) -> Result<(), SaveError> {
        let save = SeasonSave::new(season.clone());
        Self::save_to_path(&self.path(), &save)?;
        info!(season = %season.id, day = season.current_day, "season saved");
        Ok(())
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<Season>, SaveError> {
        match Self::load_from_path(&self.path()) {
            Ok(save) => {
                info!(season = %save.season.id, day = save.season.current_day, "season loaded");
                Ok(Some(save.season))
            }
            Err(SaveError::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn has_save(&self) -> bool {
        self.path().exists()
    }

    /// Removing a record that does not exist is not an error.
    pub fn clear(&self) -> Result<(), SaveError> {
        match remove_file(self.path()) {
            Ok(()) => {
                info!(path = %self.path().display(), "season save cleared");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn save_to_path(path: &Path, save: &SeasonSave) -> Result<(), SaveError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = serialize_and_compress(save)?;

        // write-then-rename so readers never see a partial file
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, path)?;

        debug!("Saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    fn load_from_path(path: &Path) -> Result<SeasonSave, SaveError> {
        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let save = decompress_and_deserialize(&data)?;
        save.validate()?;

        debug!("Loaded {} bytes from {:?}", data.len(), path);
        Ok(save)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season::{advance_season_one_day, create_season, ScheduleConfig};
    use crate::testing::sample_league;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tempfile::TempDir;

    fn season() -> Season {
        create_season(2024, sample_league(4), &ScheduleConfig::default())
    }

    #[test]
    fn test_load_without_save_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = SeasonStore::new(temp_dir.path());
        assert!(!store.has_save());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = SeasonStore::new(temp_dir.path().join("nested"));

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let played = advance_season_one_day(&season(), &mut rng);
        store.save(&played).unwrap();

        assert!(store.has_save());
        assert_eq!(store.load().unwrap(), Some(played));
    }

    #[test]
    fn test_save_overwrites_previous() {
        let temp_dir = TempDir::new().unwrap();
        let store = SeasonStore::new(temp_dir.path());
        let first = season();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let second = advance_season_one_day(&first, &mut rng);

        store.save(&first).unwrap();
        store.save(&second).unwrap();
        assert_eq!(store.load().unwrap().unwrap().current_day, 2);
    }

    #[test]
    fn test_atomic_save() {
        let temp_dir = TempDir::new().unwrap();
        let store = SeasonStore::new(temp_dir.path());
        store.save(&season()).unwrap();

        assert!(store.path().exists());
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = SeasonStore::new(temp_dir.path());
        store.save(&season()).unwrap();

        store.clear().unwrap();
        assert!(!store.has_save());
        assert!(store.load().unwrap().is_none());
        // already gone
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupted_file_reported() {
        let temp_dir = TempDir::new().unwrap();
        let store = SeasonStore::new(temp_dir.path());
        std::fs::write(store.path(), b"definitely not a season save file at all").unwrap();
        assert!(matches!(store.load(), Err(SaveError::ChecksumMismatch)));
    }

    #[test]
    fn test_named_stores_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let a = SeasonStore::with_name(temp_dir.path(), "league_a").unwrap();
        let b = SeasonStore::with_name(temp_dir.path(), "league_b").unwrap();
        a.save(&season()).unwrap();
        assert!(a.has_save());
        assert!(!b.has_save());

        assert!(SeasonStore::with_name(temp_dir.path(), "../escape").is_err());
        assert!(SeasonStore::with_name(temp_dir.path(), "").is_err());
    }
}
