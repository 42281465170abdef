use super::error::SaveError;
use super::SAVE_VERSION;
use crate::models::Season;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

const CHECKSUM_LEN: usize = 32;

/// Persisted season snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeasonSave {
    /// Format version for forward compatibility checks
    pub version: u32,

    /// Unix milliseconds at save time
    pub timestamp: u64,

    pub season: Season,
}

impl SeasonSave {
    pub fn new(season: Season) -> Self {
        Self { version: SAVE_VERSION, timestamp: current_timestamp(), season }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        let mut team_ids = HashSet::new();
        for team in &self.season.teams {
            if !team_ids.insert(team.id.as_str()) {
                return Err(SaveError::Corrupted);
            }
        }
        self.season.check_invariants()?;
        Ok(())
    }
}

/// Serialize and compress a season save
pub fn serialize_and_compress(save: &SeasonSave) -> Result<Vec<u8>, SaveError> {
    save.validate()?;

    let msgpack = to_vec_named(save)?;
    let compressed = compress_prepend_size(&msgpack);

    let checksum = Sha256::digest(&compressed);
    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Verify, decompress and deserialize a season save
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<SeasonSave, SaveError> {
    // size header + checksum
    if bytes.len() < 4 + CHECKSUM_LEN {
        return Err(SaveError::Corrupted);
    }

    let (payload, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if Sha256::digest(payload).as_slice() != checksum {
        return Err(SaveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;
    let save: SeasonSave = from_slice(&msgpack)?;

    if save.version > SAVE_VERSION {
        return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
    }

    Ok(save)
}

pub fn current_timestamp() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season::{create_season, play_out_season, ScheduleConfig};
    use crate::testing::sample_league;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fresh_save() -> SeasonSave {
        SeasonSave::new(create_season(2024, sample_league(4), &ScheduleConfig::default()))
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let save = fresh_save();
        let bytes = serialize_and_compress(&save).unwrap();
        let loaded = decompress_and_deserialize(&bytes).unwrap();
        assert_eq!(loaded, save);
    }

    #[test]
    fn test_played_season_roundtrip() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let season = play_out_season(&fresh_save().season, &mut rng);
        let save = SeasonSave::new(season);

        let loaded = decompress_and_deserialize(&serialize_and_compress(&save).unwrap()).unwrap();
        assert_eq!(loaded.season.standings, save.season.standings);
        assert_eq!(loaded.season.schedule, save.season.schedule);
    }

    #[test]
    fn test_checksum_validation() {
        let mut bytes = serialize_and_compress(&fresh_save()).unwrap();
        if let Some(last) = bytes.last_mut() {
            *last = last.wrapping_add(1);
        }
        assert!(matches!(decompress_and_deserialize(&bytes), Err(SaveError::ChecksumMismatch)));
    }

    #[test]
    fn test_truncated_data_is_corrupted() {
        assert!(matches!(decompress_and_deserialize(&[0u8; 10]), Err(SaveError::Corrupted)));
    }

    #[test]
    fn test_future_version_rejected() {
        let mut save = fresh_save();
        save.version = SAVE_VERSION + 1;
        let bytes = serialize_and_compress(&save).unwrap();
        assert!(matches!(
            decompress_and_deserialize(&bytes),
            Err(SaveError::VersionMismatch { found: 2, expected: 1 })
        ));
    }

    #[test]
    fn test_inconsistent_season_not_saved() {
        let mut save = fresh_save();
        save.season.standings.get_mut("t1").unwrap().losses = 3;
        assert!(matches!(serialize_and_compress(&save), Err(SaveError::InvalidSeason(_))));

        let mut save = fresh_save();
        save.season.teams.push(save.season.teams[0].clone());
        assert!(matches!(serialize_and_compress(&save), Err(SaveError::Corrupted)));
    }

    #[test]
    fn test_compression_shrinks_schedule() {
        let save = fresh_save();
        let raw = to_vec_named(&save).unwrap();
        let packed = serialize_and_compress(&save).unwrap();
        assert!(packed.len() < raw.len());
    }
}
