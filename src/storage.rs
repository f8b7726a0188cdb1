//! Small persistent key-value store for advisory UX state (onboarding,
//! celebrated milestones). Last writer wins; writes are upserts.

use crate::error::FinderError;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const ONBOARDING_COMPLETED_KEY: &str = "onboarding_completed";
pub const COMPLETED_MILESTONES_KEY: &str = "completed_milestones";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), FinderError>;

    fn remove(&mut self, key: &str) -> Result<(), FinderError>;
}

/// Process-lifetime store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FinderError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), FinderError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object on disk, rewritten on every change
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open `path`, starting empty if the file does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FinderError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No store at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(JsonFileStore { path, entries })
    }

    fn flush(&self) -> Result<(), FinderError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FinderError> {
        if self.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), FinderError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Tracks the onboarding tour and which milestones have been celebrated
pub struct OnboardingTracker<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> OnboardingTracker<S> {
    pub fn new(store: S) -> Self {
        OnboardingTracker { store }
    }

    pub fn is_onboarding_completed(&self) -> bool {
        self.store.get(ONBOARDING_COMPLETED_KEY).as_deref() == Some("true")
    }

    pub fn complete_onboarding(&mut self) -> Result<(), FinderError> {
        self.store.set(ONBOARDING_COMPLETED_KEY, "true")
    }

    /// Show the tour again next time
    pub fn reset_onboarding(&mut self) -> Result<(), FinderError> {
        self.store.remove(ONBOARDING_COMPLETED_KEY)
    }

    pub fn completed_milestones(&self) -> Vec<String> {
        let Some(raw) = self.store.get(COMPLETED_MILESTONES_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring malformed milestone list: {}", e);
            Vec::new()
        })
    }

    /// Record a milestone. Returns true only the first time, when the UI
    /// should celebrate it.
    pub fn mark_milestone(&mut self, milestone: &str) -> Result<bool, FinderError> {
        let mut milestones = self.completed_milestones();
        if milestones.iter().any(|m| m == milestone) {
            return Ok(false);
        }
        milestones.push(milestone.to_string());
        self.store
            .set(COMPLETED_MILESTONES_KEY, &serde_json::to_string(&milestones)?)?;
        Ok(true)
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
