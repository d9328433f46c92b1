use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

const SESSION_FILE: &str = "session.json";

/// Theme preference, persisted alongside the session email.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

/// The persisted user session: the three keys the mobile app kept in
/// device storage, stored here as one flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "user_email", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "user_photo", default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default)]
    pub theme: Theme,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.email.is_some()
    }

    /// The logged-in email, or the alert shown when a screen needs one
    /// and it is missing.
    pub fn require_email(&self) -> anyhow::Result<&str> {
        self.email
            .as_deref()
            .context("User email not found. Please log in again.")
    }
}

/// File-backed store for [`Session`], one file under the data dir.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn open(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the session. A missing or unreadable file yields an empty
    /// session rather than an error; a corrupt one is logged and dropped.
    pub fn load(&self) -> Session {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Session::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "session file corrupt, starting empty");
                Session::default()
            }
        }
    }

    pub fn save(&self, session: &Session) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw).with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }

    /// Remove every stored key, as the logout screen does.
    pub fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove {}", self.path.display())),
        }
    }
}
