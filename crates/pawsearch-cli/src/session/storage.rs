//! Session storage for persisting login state.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use pawsearch_core::{AuthToken, ServiceUrl, Session};
use pawsearch_http::HttpConfig;

use super::CliSession;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredSession {
    pub service: String,
    pub user: String,
    token: String,
    pub logged_in_at: DateTime<Utc>,
}

impl StoredSession {
    /// Rebuild a live session from the stored token.
    pub fn open(&self, config: &HttpConfig) -> Result<CliSession> {
        let service = ServiceUrl::new(&self.service).context("Invalid service URL in session")?;
        let token = AuthToken::new(self.token.clone());
        CliSession::resume(service, &self.user, token, config).context("Failed to resume session")
    }
}

/// Get the session file path.
fn session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "pawsearch").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Save a session to disk.
pub fn save_session(session: &CliSession) -> Result<()> {
    let stored = StoredSession {
        service: session.service().to_string(),
        user: session.user().to_string(),
        token: session.token().as_str().to_string(),
        logged_in_at: Utc::now(),
    };

    let path = session_path()?;
    let json = serde_json::to_string_pretty(&stored)?;

    fs::write(&path, &json).context("Failed to write session file")?;

    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}

/// Read the stored session record without opening it.
pub fn read_session() -> Result<Option<StoredSession>> {
    let path = session_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read session file")?;
    let stored = serde_json::from_str(&json).context("Invalid session file")?;
    Ok(Some(stored))
}

/// Load the stored session, failing if there is none.
pub fn require_session(config: &HttpConfig) -> Result<CliSession> {
    read_session()?
        .context("No active session. Run 'pawsearch login' first.")?
        .open(config)
}

/// Clear the stored session.
pub fn clear_session() -> Result<()> {
    let path = session_path()?;

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove session file")?;
    }

    Ok(())
}
