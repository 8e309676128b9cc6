//! Settings read from `config.json` in the application directory. Every field is optional in the
//! file; command line flags take precedence over it.

use std::{
    io::ErrorKind,
    num::NonZeroU32,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::query::window::WindowSelector;

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Relative paths are resolved against the application directory.
    pub mood_database: PathBuf,
    pub journal_database: PathBuf,
    pub default_window: WindowSelector,
    /// Attempts per question before giving up. Unlimited when absent.
    pub max_attempts: Option<NonZeroU32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mood_database: PathBuf::from("mood_sleep_tracker.db"),
            journal_database: PathBuf::from("journal.db"),
            default_window: WindowSelector::Week,
            max_attempts: None,
        }
    }
}

impl Settings {
    /// Missing file means defaults. A file that can't be parsed is an error.
    pub fn load(app_dir: &Path) -> Result<Self> {
        let path = app_dir.join(CONFIG_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                debug!("Loading settings from {path:?}");
                serde_json::from_str(&text)
                    .with_context(|| format!("failed to parse {}", path.display()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    pub fn mood_database_path(&self, app_dir: &Path) -> PathBuf {
        app_dir.join(&self.mood_database)
    }

    pub fn journal_database_path(&self, app_dir: &Path) -> PathBuf {
        app_dir.join(&self.journal_database)
    }
}
