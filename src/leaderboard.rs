use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Append-only list of winners' names. Rank is insertion order.
pub trait LeaderboardStore {
    /// Prepares the backing storage, creating it if absent.
    fn open(&mut self) -> Result<()>;
    fn insert(&mut self, name: &str) -> Result<()>;
    /// Names in insertion order, read fresh from the backing storage.
    fn read(&self) -> Result<Vec<String>>;
    fn close(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub recorded_at: DateTime<Local>,
}

/// Leaderboard kept as a pretty-printed JSON array on disk.
pub struct JsonLeaderboard {
    path: PathBuf,
    // Err holds why the store cannot be used: not opened yet, or the open failure
    status: Result<()>,
}

impl JsonLeaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let status = Err(not_open(&path));
        JsonLeaderboard { path, status }
    }

    fn ensure_open(&self) -> Result<()> {
        self.status.clone()
    }

    fn try_open(&self) -> Result<()> {
        if !self.path.exists() {
            fs::write(&self.path, "[]").map_err(|e| {
                Error::StoreUnavailable(format!("{}: {}", self.path.display(), e))
            })?;
            debug!("created leaderboard file {}", self.path.display());
        }
        // refuse to run on top of a file we would clobber on the next insert
        self.load_entries()
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        Ok(())
    }

    fn load_entries(&self) -> Result<Vec<LeaderboardEntry>> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| Error::StoreReadFailed(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::StoreReadFailed(format!("{}: {}", self.path.display(), e)))
    }

    fn save_entries(&self, entries: &[LeaderboardEntry]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| Error::StoreWriteFailed(e.to_string()))?;
        fs::write(&self.path, json)
            .map_err(|e| Error::StoreWriteFailed(format!("{}: {}", self.path.display(), e)))
    }
}

impl LeaderboardStore for JsonLeaderboard {
    fn open(&mut self) -> Result<()> {
        self.status = self.try_open();
        self.status.clone()
    }

    fn insert(&mut self, name: &str) -> Result<()> {
        self.ensure_open()?;
        let mut entries = self
            .load_entries()
            .map_err(|e| Error::StoreWriteFailed(e.to_string()))?;
        entries.push(LeaderboardEntry {
            name: name.to_string(),
            recorded_at: Local::now(),
        });
        self.save_entries(&entries)
    }

    fn read(&self) -> Result<Vec<String>> {
        self.ensure_open()?;
        Ok(self
            .load_entries()?
            .into_iter()
            .map(|entry| entry.name)
            .collect())
    }

    fn close(&mut self) -> Result<()> {
        self.status = Err(not_open(&self.path));
        Ok(())
    }
}

fn not_open(path: &Path) -> Error {
    Error::StoreUnavailable(format!("{} is not open", path.display()))
}

/// In-process leaderboard. Can be told to fail, for exercising the
/// degraded paths.
#[derive(Debug, Default, Clone)]
pub struct MemoryLeaderboard {
    pub names: Vec<String>,
    pub opened: bool,
    pub fail_open: bool,
    pub fail_writes: bool,
    pub fail_reads: bool,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryLeaderboard {
            names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl LeaderboardStore for MemoryLeaderboard {
    fn open(&mut self) -> Result<()> {
        if self.fail_open {
            return Err(Error::StoreUnavailable("memory store refused to open".to_string()));
        }
        self.opened = true;
        Ok(())
    }

    fn insert(&mut self, name: &str) -> Result<()> {
        if !self.opened {
            return Err(Error::StoreUnavailable("memory store is not open".to_string()));
        }
        if self.fail_writes {
            return Err(Error::StoreWriteFailed("memory store rejected write".to_string()));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    fn read(&self) -> Result<Vec<String>> {
        if !self.opened {
            return Err(Error::StoreUnavailable("memory store is not open".to_string()));
        }
        if self.fail_reads {
            return Err(Error::StoreReadFailed("memory store rejected read".to_string()));
        }
        Ok(self.names.clone())
    }

    fn close(&mut self) -> Result<()> {
        self.opened = false;
        Ok(())
    }
}

/// Lines shown on the leaderboard screen for a read result.
pub fn ranking_lines(result: &Result<Vec<String>>) -> Vec<String> {
    match result {
        Ok(names) => names
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{}\t{}", i + 1, name))
            .collect(),
        Err(e) => vec![format!("err: {}", e)],
    }
}
