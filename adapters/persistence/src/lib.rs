#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Career statistics persisted across sessions as a JSON document.
//!
//! The simulation never touches this crate. Adapters hand it the
//! [`SessionSummary`] of a finished session and decide what to do when the
//! store is unavailable; a failed load or save never stops play.

use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use bastion_core::SessionSummary;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Milestones unlocked by career statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// Defeat a first enemy.
    FirstBlood,
    /// Reach wave 5.
    Survivor,
    /// Reach wave 10.
    Veteran,
    /// Defeat 100 enemies over all sessions.
    Centurion,
    /// Score 1000 points in one session.
    HighRoller,
}

impl Achievement {
    /// Every achievement in unlock-check order.
    pub const ALL: [Self; 5] = [
        Self::FirstBlood,
        Self::Survivor,
        Self::Veteran,
        Self::Centurion,
        Self::HighRoller,
    ];

    /// Human readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::FirstBlood => "First Blood",
            Self::Survivor => "Survivor",
            Self::Veteran => "Veteran",
            Self::Centurion => "Centurion",
            Self::HighRoller => "High Roller",
        }
    }

    fn is_earned(self, record: &CareerRecord) -> bool {
        match self {
            Self::FirstBlood => record.total_enemies_defeated >= 1,
            Self::Survivor => record.highest_wave >= 5,
            Self::Veteran => record.highest_wave >= 10,
            Self::Centurion => record.total_enemies_defeated >= 100,
            Self::HighRoller => record.high_score >= 1_000,
        }
    }
}

/// Cumulative statistics over every recorded session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CareerRecord {
    /// Best final score.
    pub high_score: u64,
    /// Best final wave.
    #[serde(default = "first_wave")]
    pub highest_wave: u32,
    /// Number of recorded sessions.
    #[serde(default)]
    pub total_games_played: u32,
    /// Enemies defeated over all sessions.
    #[serde(default)]
    pub total_enemies_defeated: u64,
    /// Unlocked achievements.
    #[serde(default)]
    pub achievements: BTreeSet<Achievement>,
    /// Opaque adapter preferences, preserved verbatim.
    #[serde(default)]
    pub settings: Map<String, Value>,
    /// Milliseconds since the Unix epoch at the last save.
    pub saved_at_ms: u64,
}

fn first_wave() -> u32 {
    1
}

impl CareerRecord {
    /// Merges a finished session and returns the achievements it unlocked.
    pub fn record_session(&mut self, summary: &SessionSummary) -> Vec<Achievement> {
        self.high_score = self.high_score.max(summary.final_score);
        self.highest_wave = self.highest_wave.max(summary.final_wave);
        self.total_games_played = self.total_games_played.saturating_add(1);
        self.total_enemies_defeated = self
            .total_enemies_defeated
            .saturating_add(u64::from(summary.enemies_defeated));

        let unlocked: Vec<_> = Achievement::ALL
            .into_iter()
            .filter(|achievement| !self.achievements.contains(achievement))
            .filter(|achievement| achievement.is_earned(self))
            .collect();
        self.achievements.extend(unlocked.iter().copied());
        unlocked
    }
}

impl Default for CareerRecord {
    fn default() -> Self {
        Self {
            high_score: 0,
            highest_wave: first_wave(),
            total_games_played: 0,
            total_enemies_defeated: 0,
            achievements: BTreeSet::new(),
            settings: Map::new(),
            saved_at_ms: 0,
        }
    }
}

/// Failures of the career store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The file could not be read, written or removed.
    #[error("career file {path:?} is unavailable: {source}")]
    Io {
        /// File that was accessed.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// The file exists but does not hold a career record.
    #[error("career file {path:?} is malformed: {source}")]
    Malformed {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: serde_json::Error,
    },
    /// The record could not be encoded.
    #[error("failed to encode career record: {0}")]
    Encode(#[source] serde_json::Error),
}

/// JSON file holding a single [`CareerRecord`].
#[derive(Clone, Debug)]
pub struct CareerStore {
    path: PathBuf,
}

impl CareerStore {
    /// Creates a store backed by `path`; nothing is touched until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File backing the store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored record; a missing file yields `None`.
    pub fn load(&self) -> Result<Option<CareerRecord>, PersistenceError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!("no career file at {:?}", self.path);
                return Ok(None);
            }
            Err(source) => return Err(self.io_error(source)),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| PersistenceError::Malformed {
                path: self.path.clone(),
                source,
            })
    }

    /// Stamps `record` with the current time and writes it.
    ///
    /// The document is written next to the target first and renamed over it,
    /// so a failed write leaves the previous record intact.
    pub fn save(&self, record: &mut CareerRecord) -> Result<(), PersistenceError> {
        record.saved_at_ms = unix_millis();
        let encoded = serde_json::to_string_pretty(record).map_err(PersistenceError::Encode)?;

        if let Some(parent) = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, encoded).map_err(|source| self.io_error(source))?;
        fs::rename(&staging, &self.path).map_err(|source| self.io_error(source))
    }

    /// Merges `summary` into the stored record and saves the result.
    ///
    /// Returns the updated record together with the achievements unlocked by
    /// this session.
    pub fn record_session(
        &self,
        summary: &SessionSummary,
    ) -> Result<(CareerRecord, Vec<Achievement>), PersistenceError> {
        let mut record = self.load()?.unwrap_or_default();
        let unlocked = record.record_session(summary);
        self.save(&mut record)?;

        for achievement in &unlocked {
            info!("achievement unlocked: {}", achievement.title());
        }
        Ok((record, unlocked))
    }

    /// Removes the stored record; a missing file is not an error.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
